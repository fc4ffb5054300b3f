//! Gibbs sampler for motif discovery.
//!
//! The sampler starts from one random motif per sequence, then repeatedly
//! holds out the motif of a random sequence, builds a profile from the
//! remaining motifs, and replaces the held-out motif with the most probable
//! k-mer of its sequence under that profile. A replacement is kept only if
//! it strictly lowers the score of the motif set.

use log::debug;
use log::trace;
use rand::distributions::Uniform;
use rand::Rng;

use super::abc::Alphabet;
use super::abc::Pseudocounts;
use super::err::InvalidInput;
use super::motifs::check_sequences;
use super::motifs::MotifSet;
use super::pwm::FrequencyMatrix;
use super::scan::Hit;
use super::seq::EncodedSequence;

#[derive(Debug)]
pub struct Sampler<'a, R: Rng, A: Alphabet> {
    /// The sequences to sample motifs from.
    sequences: &'a [EncodedSequence<A>],
    /// The random number generator.
    rng: R,

    // -- Parameters ----------------------------
    /// The width of the motif currently being built.
    width: usize,

    // -- Internal data -------------------------
    /// The best motif set found so far.
    best: MotifSet<A>,
    /// The score of the best motif set.
    best_score: usize,
    /// The current step.
    step: usize,
}

impl<'a, R, A> Sampler<'a, R, A>
where
    R: Rng,
    A: Alphabet,
{
    /// Create a new sampler, selecting initial motifs at random.
    pub fn new(
        sequences: &'a [EncodedSequence<A>],
        width: usize,
        mut rng: R,
    ) -> Result<Self, InvalidInput> {
        if sequences.is_empty() {
            return Err(InvalidInput::NoSequences);
        }
        check_sequences(sequences, width)?;

        let best = MotifSet::random(sequences, width, &mut rng)?;
        let best_score = best.score();
        debug!(
            "Initialized {} motifs of width {} with score {}",
            best.len(),
            width,
            best_score
        );

        Ok(Self {
            sequences,
            rng,
            width,
            best,
            best_score,
            step: 0,
        })
    }

    /// The width of the motifs being sampled.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of iterations performed so far.
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    /// The best motif set found so far.
    #[inline]
    pub fn best(&self) -> &MotifSet<A> {
        &self.best
    }

    /// The score of the best motif set found so far.
    #[inline]
    pub fn best_score(&self) -> usize {
        self.best_score
    }

    /// Consume the sampler and return the best motif set.
    #[inline]
    pub fn into_best(self) -> MotifSet<A> {
        self.best
    }

    fn select_holdout(&mut self) -> usize {
        self.rng.sample(Uniform::new(0, self.best.len()))
    }

    /// Perform a single iteration of the sampler.
    pub fn iterate(&mut self) -> Result<GibbsIteration<A>, InvalidInput> {
        // step 1: sampling
        // select the holdout sequence
        let z = self.select_holdout();
        // build a profile from all motifs but the holdout
        let profile = self.best.profile_without(z, Pseudocounts::laplace());

        // step 2: update
        // select the most probable k-mer of sequence Z
        let seq = &self.sequences[z];
        let too_short = InvalidInput::SequenceTooShort {
            index: z,
            length: seq.len(),
            width: self.width,
        };
        let hit = profile.most_probable(seq).map_err(|e| match e {
            InvalidInput::SequenceTooShort { .. } => too_short.clone(),
            other => other,
        })?;
        let motif = seq.kmer(hit.position, self.width).ok_or(too_short)?;
        let mut candidate = self.best.clone();
        candidate.replace(z, hit.position, motif)?;

        // keep the candidate only on strict improvement
        let score = candidate.score();
        let accepted = score < self.best_score;
        if accepted {
            self.best = candidate;
            self.best_score = score;
        }
        trace!(
            "step={} z={} position={} score={} accepted={} best={}",
            self.step,
            z,
            hit.position,
            score,
            accepted,
            self.best_score
        );

        // advance step counter
        self.step += 1;
        Ok(GibbsIteration {
            z,
            profile,
            hit,
            score,
            accepted,
            best_score: self.best_score,
        })
    }

    /// Run the sampler for `n` iterations and return the best motif set.
    pub fn run(mut self, n: usize) -> Result<MotifSet<A>, InvalidInput> {
        for _ in 0..n {
            self.iterate()?;
        }
        debug!(
            "Finished {} iterations with score {}",
            self.step, self.best_score
        );
        Ok(self.best)
    }
}

impl<'a, R, A> Iterator for Sampler<'a, R, A>
where
    R: Rng,
    A: Alphabet,
{
    type Item = Result<GibbsIteration<A>, InvalidInput>;
    fn next(&mut self) -> Option<Self::Item> {
        Some(self.iterate())
    }
}

/// The outcome of a single iteration of the sampler.
#[derive(Debug, Clone)]
pub struct GibbsIteration<A: Alphabet> {
    /// The index of the hold-out sequence.
    pub z: usize,
    /// The profile built from all motifs but *z*.
    pub profile: FrequencyMatrix<A>,
    /// The most probable window of sequence *z* under the profile.
    pub hit: Hit,
    /// The score of the motif set with the new motif for *z*.
    pub score: usize,
    /// Whether the new motif was kept.
    pub accepted: bool,
    /// The best score after this iteration.
    pub best_score: usize,
}

/// Run a Gibbs sampler for `n` iterations.
///
/// `dna` must contain exactly `t` sequences, each at least `k` symbols long.
/// The returned motif set contains one `k`-mer per sequence, in input order.
pub fn gibbs_sampler<A, R>(
    dna: &[EncodedSequence<A>],
    k: usize,
    t: usize,
    n: usize,
    rng: R,
) -> Result<MotifSet<A>, InvalidInput>
where
    A: Alphabet,
    R: Rng,
{
    if t == 0 {
        return Err(InvalidInput::NoSequences);
    }
    if dna.len() != t {
        return Err(InvalidInput::CountMismatch {
            expected: t,
            found: dna.len(),
        });
    }
    Sampler::new(dna, k, rng)?.run(n)
}
