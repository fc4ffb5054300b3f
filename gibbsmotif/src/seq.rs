//! Linear storage for alphabet-encoded sequences.

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::ops::Index;
use std::str::FromStr;

use super::abc::Alphabet;
use super::abc::Symbol;
use super::err::InvalidSymbol;

// --- EncodedSequence ---------------------------------------------------------

/// A biological sequence encoded with an alphabet.
#[derive(Clone, Debug)]
pub struct EncodedSequence<A: Alphabet> {
    alphabet: std::marker::PhantomData<A>,
    data: Vec<A::Symbol>,
}

impl<A: Alphabet> EncodedSequence<A> {
    /// Create a new encoded sequence.
    pub fn new(data: Vec<A::Symbol>) -> Self {
        Self {
            data,
            alphabet: std::marker::PhantomData,
        }
    }

    /// Create a new encoded sequence from a textual representation.
    pub fn encode(sequence: &str) -> Result<Self, InvalidSymbol> {
        sequence
            .chars()
            .map(A::Symbol::from_char)
            .collect::<Result<_, _>>()
            .map(Self::new)
    }

    /// Create a new encoded sequence from raw ASCII bytes.
    pub fn encode_ascii(sequence: &[u8]) -> Result<Self, InvalidSymbol> {
        sequence
            .iter()
            .map(|&c| A::Symbol::from_ascii(c))
            .collect::<Result<_, _>>()
            .map(Self::new)
    }

    /// Return the number of symbols in the sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// View the sequence as a slice of symbols.
    #[inline]
    pub fn as_slice(&self) -> &[A::Symbol] {
        self.data.as_slice()
    }

    /// Iterate over the symbols in the sequence.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, A::Symbol> {
        self.data.iter()
    }

    /// Extract the `width`-long subsequence starting at `start`.
    ///
    /// Returns `None` when the window does not fit inside the sequence.
    pub fn kmer(&self, start: usize, width: usize) -> Option<Self> {
        let end = start.checked_add(width)?;
        self.data.get(start..end).map(|s| Self::new(s.to_vec()))
    }

    /// Count the positions where this sequence differs from another one.
    ///
    /// Only the overlapping prefix of both sequences is compared.
    pub fn hamming<S>(&self, other: S) -> usize
    where
        S: AsRef<[A::Symbol]>,
    {
        self.data
            .iter()
            .zip(AsRef::<[A::Symbol]>::as_ref(&other))
            .filter(|(x, y)| x != y)
            .count()
    }
}

impl<A: Alphabet> AsRef<EncodedSequence<A>> for EncodedSequence<A> {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl<A: Alphabet> AsRef<[<A as Alphabet>::Symbol]> for EncodedSequence<A> {
    fn as_ref(&self) -> &[<A as Alphabet>::Symbol] {
        self.data.as_slice()
    }
}

impl<A: Alphabet> Default for EncodedSequence<A> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<A: Alphabet> Display for EncodedSequence<A> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for c in self.data.iter() {
            write!(f, "{}", c.as_char())?;
        }
        Ok(())
    }
}

impl<A: Alphabet> FromStr for EncodedSequence<A> {
    type Err = InvalidSymbol;
    fn from_str(seq: &str) -> Result<Self, Self::Err> {
        Self::encode(seq)
    }
}

impl<A: Alphabet> From<Vec<A::Symbol>> for EncodedSequence<A> {
    fn from(data: Vec<A::Symbol>) -> Self {
        Self::new(data)
    }
}

impl<A: Alphabet> Index<usize> for EncodedSequence<A> {
    type Output = A::Symbol;
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<'a, A: Alphabet> IntoIterator for &'a EncodedSequence<A> {
    type Item = &'a A::Symbol;
    type IntoIter = std::slice::Iter<'a, A::Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<A, S> PartialEq<S> for EncodedSequence<A>
where
    A: Alphabet,
    S: AsRef<[<A as Alphabet>::Symbol]>,
{
    fn eq(&self, other: &S) -> bool {
        let l = self.data.as_slice();
        let r: &[A::Symbol] = other.as_ref();
        l == r
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::abc::Dna;
    use crate::abc::Nucleotide::*;

    #[test]
    fn test_encode() {
        let seq = EncodedSequence::<Dna>::from_str("ACGTa").unwrap();
        assert_eq!(seq, [A, C, G, T, A]);
        assert_eq!(seq.to_string(), "ACGTA");
    }

    #[test]
    fn test_encode_invalid() {
        let err = EncodedSequence::<Dna>::encode("ACNT").unwrap_err();
        assert_eq!(err, InvalidSymbol('N'));
        let err = EncodedSequence::<Dna>::encode_ascii(b"AC-T").unwrap_err();
        assert_eq!(err, InvalidSymbol('-'));
    }

    #[test]
    fn test_kmer() {
        let seq = EncodedSequence::<Dna>::encode("ATGCA").unwrap();
        assert_eq!(seq.kmer(0, 3).unwrap(), [A, T, G]);
        assert_eq!(seq.kmer(2, 3).unwrap(), [G, C, A]);
        assert!(seq.kmer(3, 3).is_none());
        assert!(seq.kmer(usize::MAX, 2).is_none());
    }

    #[test]
    fn test_hamming() {
        let x = EncodedSequence::<Dna>::encode("ACGT").unwrap();
        let y = EncodedSequence::<Dna>::encode("ACCA").unwrap();
        assert_eq!(x.hamming(&y), 2);
        assert_eq!(x.hamming(&x), 0);
    }
}
