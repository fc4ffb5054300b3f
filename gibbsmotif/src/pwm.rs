//! Count and frequency matrices built from aligned motifs.

use typenum::marker_traits::Unsigned;

use super::abc::Alphabet;
use super::abc::Pseudocounts;
use super::abc::Symbol;
use super::dense::DenseMatrix;
use super::dense::MatrixCoordinates;
use super::err::InvalidData;
use super::err::InvalidInput;
use super::scan::Hit;
use super::scan::Scanner;
use super::seq::EncodedSequence;

// --- CountMatrix -------------------------------------------------------------

/// A matrix storing symbol occurences at each position.
#[derive(Clone, Debug)]
pub struct CountMatrix<A: Alphabet> {
    /// The alphabet of the count matrix.
    alphabet: std::marker::PhantomData<A>,
    /// The actual counts for each position of the motif.
    data: DenseMatrix<u32, A::K>,
    /// The number of sequences from which this count matrix was obtained.
    n: u32,
}

impl<A: Alphabet> CountMatrix<A> {
    /// Create a new count matrix without checking the contents.
    fn new_unchecked(data: DenseMatrix<u32, A::K>, n: u32) -> Self {
        Self {
            alphabet: std::marker::PhantomData,
            n,
            data,
        }
    }

    /// Create an empty count matrix for motifs of the given width.
    pub(crate) fn with_width(width: usize) -> Self {
        Self::new_unchecked(DenseMatrix::new(width), 0)
    }

    /// Add the symbols of a motif to the counts.
    ///
    /// The motif must have the same width as the matrix.
    pub(crate) fn add(&mut self, motif: &[A::Symbol]) {
        debug_assert_eq!(motif.len(), self.data.rows());
        for (i, x) in motif.iter().enumerate() {
            self.data[MatrixCoordinates::new(i, x.as_index())] += 1;
        }
        self.n += 1;
    }

    /// Create a new count matrix from the given data.
    ///
    /// The matrix must contain count data, for sequences of the same
    /// length, i.e. rows should all sum to the same value.
    pub fn new(data: DenseMatrix<u32, A::K>) -> Result<Self, InvalidData> {
        let mut sums = data.iter().map(|row| row.iter().sum::<u32>());
        let n = sums.next().unwrap_or(0);
        if sums.any(|s| s != n) {
            return Err(InvalidData);
        }
        Ok(Self::new_unchecked(data, n))
    }

    /// Create a new count matrix from motifs of the given width.
    ///
    /// An empty collection of motifs gives a matrix of `width` rows filled
    /// with zeros.
    pub fn from_sequences<I>(width: usize, sequences: I) -> Result<Self, InvalidData>
    where
        I: IntoIterator,
        <I as IntoIterator>::Item: AsRef<EncodedSequence<A>>,
    {
        let mut counts = Self::with_width(width);
        for seq in sequences {
            let seq = seq.as_ref();
            if seq.len() != width {
                return Err(InvalidData);
            }
            counts.add(seq.as_slice());
        }
        Ok(counts)
    }

    /// Build a probability matrix from this count matrix using pseudo-counts.
    ///
    /// Every cell receives `(count + pseudocount) / (n + sum(pseudocounts))`,
    /// so that each row sums to one.
    pub fn to_freq<P>(&self, pseudo: P) -> FrequencyMatrix<A>
    where
        P: Into<Pseudocounts<A>>,
    {
        let p = pseudo.into();
        let mut probas = DenseMatrix::<f64, A::K>::new(self.data.rows());
        for (src, dst) in self.data.iter().zip(probas.iter_mut()) {
            for (j, &x) in src.iter().enumerate() {
                dst[j] = x as f64 + p.counts()[j];
            }
            let s: f64 = dst.iter().sum();
            for x in dst.iter_mut() {
                *x /= s;
            }
        }
        FrequencyMatrix {
            alphabet: std::marker::PhantomData,
            data: probas,
        }
    }

    /// Build the consensus sequence of the counted motifs.
    ///
    /// Each position receives the most frequent symbol of the column, ties
    /// being resolved in favour of the symbol appearing first in the
    /// alphabet (`A < C < G < T` for DNA).
    pub fn consensus(&self) -> EncodedSequence<A> {
        let symbols = A::symbols();
        self.data
            .iter()
            .map(|row| {
                let mut best = 0;
                for j in 1..A::K::USIZE {
                    if row[j] > row[best] {
                        best = j;
                    }
                }
                symbols[best]
            })
            .collect::<Vec<_>>()
            .into()
    }

    /// The width of the motifs counted in this matrix.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.rows()
    }

    /// Check whether the matrix has zero columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.rows() == 0
    }

    /// The number of motifs counted in this matrix.
    #[inline]
    pub fn sequences(&self) -> u32 {
        self.n
    }

    /// The raw counts from the count matrix.
    #[inline]
    pub fn counts(&self) -> &DenseMatrix<u32, A::K> {
        &self.data
    }
}

impl<A: Alphabet> AsRef<DenseMatrix<u32, A::K>> for CountMatrix<A> {
    fn as_ref(&self) -> &DenseMatrix<u32, A::K> {
        &self.data
    }
}

// --- FrequencyMatrix ---------------------------------------------------------

/// A matrix storing symbol frequencies at each position.
///
/// This is the *profile* of a set of motifs: row `j` holds the probability
/// of observing each symbol at position `j` of the motif.
#[derive(Clone, Debug)]
pub struct FrequencyMatrix<A: Alphabet> {
    alphabet: std::marker::PhantomData<A>,
    data: DenseMatrix<f64, A::K>,
}

impl<A: Alphabet> FrequencyMatrix<A> {
    /// Create a new frequency matrix from the given data.
    ///
    /// Every row must contain probabilities, i.e. non-negative numbers
    /// summing to one.
    pub fn new(data: DenseMatrix<f64, A::K>) -> Result<Self, InvalidData> {
        for row in data.iter() {
            if row.iter().any(|x| !(0.0..=1.0).contains(x)) {
                return Err(InvalidData);
            }
            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > 1e-6 {
                return Err(InvalidData);
            }
        }
        Ok(Self {
            alphabet: std::marker::PhantomData,
            data,
        })
    }

    /// The length of the motif encoded in this frequency matrix.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.rows()
    }

    /// Check whether the matrix has zero columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.rows() == 0
    }

    /// The probabilities of the frequency matrix.
    #[inline]
    pub fn frequencies(&self) -> &DenseMatrix<f64, A::K> {
        &self.data
    }

    /// Compute the probability of a k-mer under this profile.
    ///
    /// This is the product of the probabilities of each symbol at its
    /// position. Only the first `self.len()` symbols are considered.
    pub fn probability<S>(&self, kmer: S) -> f64
    where
        S: AsRef<[A::Symbol]>,
    {
        self.data
            .iter()
            .zip(AsRef::<[A::Symbol]>::as_ref(&kmer))
            .map(|(row, s)| row[s.as_index()])
            .product()
    }

    /// Find the most probable window of a sequence under this profile.
    ///
    /// Ties are resolved in favour of the leftmost window. A sequence shorter
    /// than the profile is reported as sequence `0`, callers scanning one
    /// sequence out of many should rewrite the index.
    pub fn most_probable(&self, seq: &EncodedSequence<A>) -> Result<Hit, InvalidInput> {
        if self.is_empty() {
            return Err(InvalidInput::ZeroWidth);
        }
        Scanner::new(self, seq)
            .best()
            .ok_or(InvalidInput::SequenceTooShort {
                index: 0,
                length: seq.len(),
                width: self.len(),
            })
    }
}

impl<A: Alphabet> AsRef<DenseMatrix<f64, A::K>> for FrequencyMatrix<A> {
    fn as_ref(&self) -> &DenseMatrix<f64, A::K> {
        &self.data
    }
}

impl<A: Alphabet> From<CountMatrix<A>> for FrequencyMatrix<A> {
    fn from(counts: CountMatrix<A>) -> Self {
        counts.to_freq(Pseudocounts::laplace())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::abc::Dna;
    use crate::abc::Nucleotide::*;

    fn encode(motifs: &[&str]) -> Vec<EncodedSequence<Dna>> {
        motifs
            .iter()
            .map(|x| EncodedSequence::encode(x).unwrap())
            .collect()
    }

    #[test]
    fn test_from_sequences() {
        let motifs = encode(&["ACGT", "ACGA", "TCGA"]);
        let cm = CountMatrix::<Dna>::from_sequences(4, &motifs).unwrap();
        assert_eq!(cm.len(), 4);
        assert_eq!(cm.sequences(), 3);
        assert_eq!(&cm.counts()[0], &[2, 0, 0, 1]);
        assert_eq!(&cm.counts()[1], &[0, 3, 0, 0]);
        assert_eq!(&cm.counts()[3], &[2, 0, 0, 1]);
    }

    #[test]
    fn test_from_sequences_invalid_width() {
        let motifs = encode(&["ACGT", "ACG"]);
        assert!(CountMatrix::<Dna>::from_sequences(4, &motifs).is_err());
    }

    #[test]
    fn test_new() {
        let data = DenseMatrix::from_rows([[1, 0, 0, 1], [0, 2, 0, 0]]);
        assert_eq!(CountMatrix::<Dna>::new(data).unwrap().sequences(), 2);
        let data = DenseMatrix::from_rows([[1, 0, 0, 1], [0, 1, 0, 0]]);
        assert!(CountMatrix::<Dna>::new(data).is_err());
    }

    #[test]
    fn test_to_freq_laplace() {
        let motifs = encode(&["ACG", "ACT"]);
        let cm = CountMatrix::<Dna>::from_sequences(3, &motifs).unwrap();
        let pm = cm.to_freq(Pseudocounts::laplace());
        // (count + 1) / (2 + 4)
        assert_eq!(&pm.frequencies()[0], &[3.0 / 6.0, 1.0 / 6.0, 1.0 / 6.0, 1.0 / 6.0]);
        assert_eq!(&pm.frequencies()[2], &[1.0 / 6.0, 1.0 / 6.0, 2.0 / 6.0, 2.0 / 6.0]);
        for row in pm.frequencies().iter() {
            assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-9);
            assert!(row.iter().all(|&x| x > 0.0));
        }
    }

    #[test]
    fn test_to_freq_empty() {
        let cm = CountMatrix::<Dna>::from_sequences(2, Vec::<EncodedSequence<Dna>>::new()).unwrap();
        let pm = FrequencyMatrix::from(cm);
        assert_eq!(pm.len(), 2);
        for row in pm.frequencies().iter() {
            assert_eq!(row, [0.25, 0.25, 0.25, 0.25]);
        }
    }

    #[test]
    fn test_consensus() {
        let motifs = encode(&["ACGT", "ACGA", "TCGA"]);
        let cm = CountMatrix::<Dna>::from_sequences(4, &motifs).unwrap();
        assert_eq!(cm.consensus(), [A, C, G, A]);
    }

    #[test]
    fn test_consensus_ties() {
        let motifs = encode(&["TGCA", "GTAC"]);
        let cm = CountMatrix::<Dna>::from_sequences(4, &motifs).unwrap();
        assert_eq!(cm.consensus(), [G, G, A, A]);
    }

    #[test]
    fn test_probability() {
        let motifs = encode(&["AA", "AC"]);
        let pm = CountMatrix::<Dna>::from_sequences(2, &motifs)
            .unwrap()
            .to_freq(Pseudocounts::laplace());
        let p = pm.probability(EncodedSequence::<Dna>::encode("AC").unwrap());
        assert!((p - (3.0 / 6.0) * (2.0 / 6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_most_probable() {
        let motifs = encode(&["GTA", "GTC", "GAA"]);
        let pm = CountMatrix::<Dna>::from_sequences(3, &motifs)
            .unwrap()
            .to_freq(Pseudocounts::laplace());
        let seq = EncodedSequence::<Dna>::encode("CCGTAGTA").unwrap();
        let hit = pm.most_probable(&seq).unwrap();
        assert_eq!(hit.position, 2);
        assert!((hit.probability - pm.probability(seq.kmer(2, 3).unwrap())).abs() < 1e-12);
    }

    #[test]
    fn test_most_probable_ties_leftmost() {
        let pm = FrequencyMatrix::from(
            CountMatrix::<Dna>::from_sequences(3, Vec::<EncodedSequence<Dna>>::new()).unwrap(),
        );
        let seq = EncodedSequence::<Dna>::encode("ACGTTT").unwrap();
        assert_eq!(pm.most_probable(&seq).unwrap().position, 0);
    }

    #[test]
    fn test_most_probable_too_short() {
        let pm = FrequencyMatrix::from(
            CountMatrix::<Dna>::from_sequences(5, Vec::<EncodedSequence<Dna>>::new()).unwrap(),
        );
        let seq = EncodedSequence::<Dna>::encode("ACG").unwrap();
        assert_eq!(
            pm.most_probable(&seq).unwrap_err(),
            InvalidInput::SequenceTooShort {
                index: 0,
                length: 3,
                width: 5
            }
        );
        let exact = EncodedSequence::<Dna>::encode("ACGTA").unwrap();
        assert_eq!(pm.most_probable(&exact).unwrap().position, 0);
    }

    #[test]
    fn test_frequency_matrix_new() {
        let data = DenseMatrix::from_rows([[0.25, 0.25, 0.25, 0.25]]);
        assert!(FrequencyMatrix::<Dna>::new(data).is_ok());
        let data = DenseMatrix::from_rows([[0.5, 0.25, 0.25, 0.25]]);
        assert!(FrequencyMatrix::<Dna>::new(data).is_err());
    }
}
