use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use gibbsmotif::abc::Dna;
use gibbsmotif::motifs::MotifSet;
use gibbsmotif::sampler::gibbs_sampler;
use gibbsmotif::seq::EncodedSequence;
use log::debug;
use log::info;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

// --- Parameters --------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Parameters {
    /// sequence file to load (FASTA or one sequence per line, `-` for stdin)
    input: Option<PathBuf>,

    /// width of the motifs to search
    #[arg(short = 'k', long, value_parser = clap::value_parser!(u64).range(1..))]
    width: u64,
    /// number of sampler iterations in each run
    #[arg(short = 'N', long, default_value_t = 100)]
    iterations: usize,
    /// expected number of sequences in the input
    #[arg(short = 't', long)]
    count: Option<usize>,

    /// seed for the random number generator
    #[arg(short, long)]
    seed: Option<u64>,
    /// number of independent runs, keeping the best scoring one
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    runs: u32,

    /// print the start position of each motif before the motif
    #[arg(long)]
    positions: bool,
    /// log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

// --- Input -------------------------------------------------------------------

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        None => Ok(Box::new(BufReader::new(std::io::stdin()))),
        Some(p) if p == Path::new("-") => Ok(Box::new(BufReader::new(std::io::stdin()))),
        Some(p) => File::open(p)
            .map(BufReader::new)
            .map(|r| Box::new(r) as Box<dyn BufRead>)
            .with_context(|| format!("failed to open {}", p.display())),
    }
}

fn read_sequences(mut reader: Box<dyn BufRead>) -> Result<Vec<EncodedSequence<Dna>>> {
    let mut sequences = Vec::new();
    let is_fasta = matches!(reader.fill_buf()?.first(), Some(b'>'));
    if is_fasta {
        let mut fasta = noodles_fasta::io::Reader::new(reader);
        for (i, res) in fasta.records().enumerate() {
            let record = res.with_context(|| format!("failed to read record {}", i + 1))?;
            let seq = EncodedSequence::<Dna>::encode_ascii(record.sequence().as_ref())
                .with_context(|| format!("invalid sequence in record {}", i + 1))?;
            sequences.push(seq);
        }
    } else {
        for (i, res) in reader.lines().enumerate() {
            let line = res?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let seq = EncodedSequence::<Dna>::encode(line)
                .with_context(|| format!("invalid sequence on line {}", i + 1))?;
            sequences.push(seq);
        }
    }
    Ok(sequences)
}

// --- Search ------------------------------------------------------------------

/// Run the sampler `runs` times and keep the lowest scoring motif set.
///
/// Every run owns a copy of `master`, which is jumped ahead after each run
/// so that runs draw from non-overlapping streams. Ties keep the earliest run.
fn best_of(
    dna: &[EncodedSequence<Dna>],
    width: usize,
    t: usize,
    n: usize,
    runs: u32,
    master: &mut Xoshiro256StarStar,
) -> Result<MotifSet<Dna>> {
    let mut best: Option<(usize, MotifSet<Dna>)> = None;
    for run in 0..runs {
        let rng = master.clone();
        master.jump();
        let motifs = gibbs_sampler(dna, width, t, n, rng)?;
        let score = motifs.score();
        debug!("Run {} finished with score {}", run + 1, score);
        if best.as_ref().map(|(s, _)| score < *s).unwrap_or(true) {
            best = Some((score, motifs));
        }
    }
    best.map(|(_, motifs)| motifs)
        .ok_or_else(|| anyhow::anyhow!("at least one run is required"))
}

// --- Main --------------------------------------------------------------------

fn main() -> Result<()> {
    let params = Parameters::parse();

    let level = if params.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let dna = open_input(params.input.as_deref()).and_then(read_sequences)?;
    info!("Loaded {} sequences", dna.len());

    let width = params.width as usize;
    let t = params.count.unwrap_or(dna.len());
    let mut master = match params.seed {
        Some(seed) => Xoshiro256StarStar::seed_from_u64(seed),
        None => Xoshiro256StarStar::from_rng(rand::thread_rng())?,
    };

    let motifs = best_of(&dna, width, t, params.iterations, params.runs, &mut master)?;
    info!(
        "Best score {} (consensus {})",
        motifs.score(),
        motifs.consensus()
    );

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    for (motif, start) in motifs.iter().zip(motifs.starts()) {
        if params.positions {
            writeln!(out, "{}\t{}", start, motif)?;
        } else {
            writeln!(out, "{}", motif)?;
        }
    }
    out.flush()?;

    Ok(())
}
