//! Scanner for the most probable k-mer of a sequence under a profile.

use super::abc::Alphabet;
use super::pwm::FrequencyMatrix;
use super::seq::EncodedSequence;

/// A hit describing a scored window somewhere in the sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub position: usize,
    pub probability: f64,
}

impl Hit {
    /// Create a new hit.
    pub fn new(position: usize, probability: f64) -> Self {
        Self {
            position,
            probability,
        }
    }

    /// The start position of the hit in the sequence.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The probability of the window under the profile.
    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }
}

/// An iterator over the probabilities of every window of a sequence.
///
/// Windows are yielded from left to right, there are `seq.len() - k + 1`
/// of them for a profile of width `k`, and none at all when the sequence
/// is shorter than the profile.
#[derive(Debug, Clone)]
pub struct Scanner<'a, A: Alphabet> {
    profile: &'a FrequencyMatrix<A>,
    seq: &'a EncodedSequence<A>,
    position: usize,
}

impl<'a, A: Alphabet> Scanner<'a, A> {
    /// Create a new scanner for the given profile and sequence.
    pub fn new(profile: &'a FrequencyMatrix<A>, seq: &'a EncodedSequence<A>) -> Self {
        Self {
            profile,
            seq,
            position: 0,
        }
    }

    /// Get the most probable window of the sequence.
    ///
    /// Ties are resolved in favour of the leftmost window. Returns `None`
    /// when the sequence contains no window of the profile width.
    pub fn best(self) -> Option<Hit> {
        let mut best: Option<Hit> = None;
        for hit in self {
            match &best {
                Some(b) if hit.probability <= b.probability => (),
                _ => best = Some(hit),
            }
        }
        best
    }
}

impl<'a, A: Alphabet> Iterator for Scanner<'a, A> {
    type Item = Hit;
    fn next(&mut self) -> Option<Self::Item> {
        let width = self.profile.len();
        if width == 0 || self.position + width > self.seq.len() {
            return None;
        }
        let window = &self.seq.as_slice()[self.position..self.position + width];
        let hit = Hit::new(self.position, self.profile.probability(window));
        self.position += 1;
        Some(hit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let width = self.profile.len();
        let n = if width == 0 {
            0
        } else {
            (self.seq.len() + 1).saturating_sub(self.position + width)
        };
        (n, Some(n))
    }
}

impl<'a, A: Alphabet> ExactSizeIterator for Scanner<'a, A> {}
