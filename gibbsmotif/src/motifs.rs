//! Sets of motifs, one per input sequence.

use rand::distributions::Uniform;
use rand::Rng;

use super::abc::Alphabet;
use super::abc::Pseudocounts;
use super::err::InvalidData;
use super::err::InvalidInput;
use super::pwm::CountMatrix;
use super::pwm::FrequencyMatrix;
use super::seq::EncodedSequence;

/// Check that every sequence can hold at least one motif of the given width.
pub(crate) fn check_sequences<A: Alphabet>(
    sequences: &[EncodedSequence<A>],
    width: usize,
) -> Result<(), InvalidInput> {
    if width == 0 {
        return Err(InvalidInput::ZeroWidth);
    }
    for (index, seq) in sequences.iter().enumerate() {
        if seq.len() < width {
            return Err(InvalidInput::SequenceTooShort {
                index,
                length: seq.len(),
                width,
            });
        }
    }
    Ok(())
}

// --- MotifSet ----------------------------------------------------------------

/// An ordered set of motifs of identical width.
///
/// Motif `i` is a window of sequence `i`, starting at `starts()[i]`.
#[derive(Clone, Debug)]
pub struct MotifSet<A: Alphabet> {
    width: usize,
    starts: Vec<usize>,
    motifs: Vec<EncodedSequence<A>>,
}

impl<A: Alphabet> MotifSet<A> {
    /// Select one motif at a random position in each sequence.
    ///
    /// Start positions are drawn uniformly in `0..=len - width`, with one
    /// draw from `rng` per sequence.
    pub fn random<R: Rng>(
        sequences: &[EncodedSequence<A>],
        width: usize,
        rng: &mut R,
    ) -> Result<Self, InvalidInput> {
        check_sequences(sequences, width)?;
        let starts = sequences
            .iter()
            .map(|seq| rng.sample(Uniform::new(0, seq.len() - width + 1)))
            .collect::<Vec<usize>>();
        Self::from_starts(sequences, width, starts)
    }

    /// Select the motifs starting at the given position in each sequence.
    pub fn from_starts(
        sequences: &[EncodedSequence<A>],
        width: usize,
        starts: Vec<usize>,
    ) -> Result<Self, InvalidInput> {
        check_sequences(sequences, width)?;
        if starts.len() != sequences.len() {
            return Err(InvalidInput::CountMismatch {
                expected: sequences.len(),
                found: starts.len(),
            });
        }
        let motifs = sequences
            .iter()
            .zip(&starts)
            .map(|(seq, &start)| seq.kmer(start, width).ok_or(InvalidData))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            width,
            starts,
            motifs,
        })
    }

    /// The width of the motifs.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of motifs in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.motifs.len()
    }

    /// Check whether the set contains no motifs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.motifs.is_empty()
    }

    /// The start position of each motif in its sequence.
    #[inline]
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// The motifs of the set.
    #[inline]
    pub fn motifs(&self) -> &[EncodedSequence<A>] {
        &self.motifs
    }

    /// Iterate over the motifs of the set.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, EncodedSequence<A>> {
        self.motifs.iter()
    }

    /// Replace motif `index` with a new motif starting at `start`.
    pub fn replace(
        &mut self,
        index: usize,
        start: usize,
        motif: EncodedSequence<A>,
    ) -> Result<(), InvalidData> {
        if motif.len() != self.width || index >= self.motifs.len() {
            return Err(InvalidData);
        }
        self.starts[index] = start;
        self.motifs[index] = motif;
        Ok(())
    }

    /// Count the symbols of every motif in the set.
    pub fn counts(&self) -> CountMatrix<A> {
        let mut counts = CountMatrix::with_width(self.width);
        for motif in self.motifs.iter() {
            counts.add(motif.as_slice());
        }
        counts
    }

    /// Count the symbols of every motif in the set except motif `index`.
    pub fn counts_without(&self, index: usize) -> CountMatrix<A> {
        let mut counts = CountMatrix::with_width(self.width);
        for (i, motif) in self.motifs.iter().enumerate() {
            if i != index {
                counts.add(motif.as_slice());
            }
        }
        counts
    }

    /// Build the profile of the set without motif `index`.
    pub fn profile_without<P>(&self, index: usize, pseudo: P) -> FrequencyMatrix<A>
    where
        P: Into<Pseudocounts<A>>,
    {
        self.counts_without(index).to_freq(pseudo)
    }

    /// Build the consensus sequence of the set.
    ///
    /// See [`CountMatrix::consensus`] for the tie-break order.
    pub fn consensus(&self) -> EncodedSequence<A> {
        self.counts().consensus()
    }

    /// Compute the total Hamming distance of the motifs to their consensus.
    pub fn score(&self) -> usize {
        let consensus = self.consensus();
        self.motifs.iter().map(|m| m.hamming(&consensus)).sum()
    }
}

impl<'a, A: Alphabet> IntoIterator for &'a MotifSet<A> {
    type Item = &'a EncodedSequence<A>;
    type IntoIter = std::slice::Iter<'a, EncodedSequence<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.motifs.iter()
    }
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    use super::*;

    use crate::abc::Dna;

    fn encode(sequences: &[&str]) -> Vec<EncodedSequence<Dna>> {
        sequences
            .iter()
            .map(|x| EncodedSequence::encode(x).unwrap())
            .collect()
    }

    #[test]
    fn test_random() {
        let dna = encode(&["ACGTACGTAC", "TTTTGGGG", "ACGTA"]);
        let mut rng = Xoshiro256StarStar::seed_from_u64(42);
        for _ in 0..100 {
            let motifs = MotifSet::random(&dna, 4, &mut rng).unwrap();
            assert_eq!(motifs.len(), 3);
            for ((motif, &start), seq) in motifs.iter().zip(motifs.starts()).zip(&dna) {
                assert_eq!(motif.len(), 4);
                assert!(start + 4 <= seq.len());
                assert_eq!(motif, &seq.kmer(start, 4).unwrap());
            }
        }
    }

    #[test]
    fn test_random_exact_width() {
        let dna = encode(&["ACGT", "TTGA"]);
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        for _ in 0..20 {
            let motifs = MotifSet::random(&dna, 4, &mut rng).unwrap();
            assert_eq!(motifs.starts(), &[0, 0]);
        }
    }

    #[test]
    fn test_random_too_short() {
        let dna = encode(&["ACGTACGT", "ACG"]);
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        let err = MotifSet::random(&dna, 4, &mut rng).unwrap_err();
        assert_eq!(
            err,
            InvalidInput::SequenceTooShort {
                index: 1,
                length: 3,
                width: 4
            }
        );
        let err = MotifSet::random(&dna, 0, &mut rng).unwrap_err();
        assert_eq!(err, InvalidInput::ZeroWidth);
    }

    #[test]
    fn test_from_starts_out_of_bounds() {
        let dna = encode(&["ACGTACGT"]);
        assert!(MotifSet::from_starts(&dna, 4, vec![5]).is_err());
        assert!(MotifSet::from_starts(&dna, 4, vec![0, 1]).is_err());
    }

    #[test]
    fn test_score() {
        let dna = encode(&["TCGGGGGTTTTT", "CCGGTGACTTAC", "ACGGGGATTTTC"]);
        let motifs = MotifSet::from_starts(&dna, 3, vec![0, 0, 0]).unwrap();
        // TCG / CCG / ACG -> consensus ACG, score 2
        assert_eq!(motifs.consensus().to_string(), "ACG");
        assert_eq!(motifs.score(), 2);
    }

    #[test]
    fn test_score_identical() {
        let dna = encode(&["GATTACA", "GATTACA", "GATTACA"]);
        let motifs = MotifSet::from_starts(&dna, 7, vec![0, 0, 0]).unwrap();
        assert_eq!(motifs.consensus().to_string(), "GATTACA");
        assert_eq!(motifs.score(), 0);
    }

    #[test]
    fn test_score_zero_iff_consensus() {
        let dna = encode(&["GATTACA", "GATTACC", "GATTACA"]);
        let motifs = MotifSet::from_starts(&dna, 7, vec![0, 0, 0]).unwrap();
        let consensus = motifs.consensus();
        assert!(motifs.iter().any(|m| m != &consensus));
        assert_eq!(motifs.score(), 1);
    }

    #[test]
    fn test_profile_without() {
        let dna = encode(&["AAA", "CCC", "GGG"]);
        let motifs = MotifSet::from_starts(&dna, 3, vec![0, 0, 0]).unwrap();
        let counts = motifs.counts_without(1);
        assert_eq!(counts.sequences(), 2);
        assert_eq!(&counts.counts()[0], &[1, 0, 1, 0]);
        let profile = motifs.profile_without(1, Pseudocounts::laplace());
        for row in profile.frequencies().iter() {
            assert_eq!(row, [2.0 / 6.0, 1.0 / 6.0, 2.0 / 6.0, 1.0 / 6.0]);
        }
    }

    #[test]
    fn test_replace() {
        let dna = encode(&["AAAA", "CCCC"]);
        let mut motifs = MotifSet::from_starts(&dna, 2, vec![0, 1]).unwrap();
        let new = EncodedSequence::encode("GT").unwrap();
        motifs.replace(1, 2, new).unwrap();
        assert_eq!(motifs.starts(), &[0, 2]);
        assert_eq!(motifs.motifs()[1].to_string(), "GT");
        assert!(motifs
            .replace(0, 0, EncodedSequence::encode("GTA").unwrap())
            .is_err());
        assert!(motifs
            .replace(2, 0, EncodedSequence::encode("GT").unwrap())
            .is_err());
    }
}
