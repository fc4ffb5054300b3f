#![doc = include_str!("../README.md")]

extern crate generic_array;
extern crate rand;
extern crate typenum;

pub mod abc;
pub mod dense;
pub mod err;
pub mod motifs;
pub mod pwm;
pub mod sampler;
pub mod scan;
pub mod seq;

pub use abc::Alphabet;
pub use abc::Dna;
pub use abc::Nucleotide;
pub use abc::Pseudocounts;
pub use abc::Symbol;
pub use dense::DenseMatrix;
pub use err::InvalidData;
pub use err::InvalidInput;
pub use err::InvalidSymbol;
pub use motifs::MotifSet;
pub use pwm::CountMatrix;
pub use pwm::FrequencyMatrix;
pub use sampler::gibbs_sampler;
pub use sampler::GibbsIteration;
pub use sampler::Sampler;
pub use scan::Hit;
pub use scan::Scanner;
pub use seq::EncodedSequence;
