extern crate env_logger;
#[macro_use]
extern crate log;
use std::{
    fs::File,
    io::{prelude::*, stdout, BufWriter},
    path::Path,
};

use anyhow::{Context, Result};
use clap::Parser;

use nucleo::filter::FilterOpts;
use nucleo::metadata::RunMetadata;
use nucleo::output::{write_composition, write_evolution, write_variants};
use nucleo::{composition, evolution, fasta, variants};

mod cli;

use cli::{Cli, Commands, PairArgs};

/// Creates a `BufWriter` for the given output option. This allows for an output file to be passed
/// or otherwise will default to using standard output.
///
/// If `output` is `Some`, it creates a file at the specified path and returns a `BufWriter` for it.
/// If `output` is `None`, it returns a `BufWriter` for the standard output.
fn get_writer(output: &Option<String>) -> Result<impl Write> {
    // get output as a BufWriter - equal to stdout if None
    let writer = BufWriter::new(match output {
        Some(ref x) => {
            let file = File::create(Path::new(x))
                .with_context(|| format!("Unable to create output file {x}"))?;
            Box::new(file) as Box<dyn Write + Send>
        }
        None => Box::new(stdout()) as Box<dyn Write + Send>,
    });
    Ok(writer)
}

/// Sequences selected for a pairwise comparison, with labels naming where each came from.
struct Pair {
    labels: (String, String),
    seqs: (String, String),
}

/// Resolves the two sequences to compare, reading the FASTA file if one was given.
fn resolve_pair(pair: &PairArgs) -> Result<Pair> {
    if let Some(path) = &pair.fasta {
        info!("Reading sequences from {path}");
        let parsed = fasta::read_path(path)?;
        let (first, second) = parsed.pair(pair.first_id.as_deref(), pair.second_id.as_deref())?;
        info!("Comparing `{}` against `{}`", first.id, second.id);

        return Ok(Pair {
            labels: (first.id.to_string(), second.id.to_string()),
            seqs: (first.seq.to_string(), second.seq.to_string()),
        });
    }

    // clap guarantees both positional sequences are present without --fasta
    let (Some(seq1), Some(seq2)) = (&pair.seq1, &pair.seq2) else {
        anyhow::bail!("two sequences, or a FASTA file via --fasta, are required");
    };

    Ok(Pair {
        labels: ("seq1".to_string(), "seq2".to_string()),
        seqs: (seq1.clone(), seq2.clone()),
    })
}

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    info!("nucleo v{}", cli::VERSION);

    match &cli.command {
        Commands::Stats {
            file,
            output,
            format,
            threads,
            len,
            gc,
        } => {
            // time everything!
            let now = std::time::Instant::now();
            let mut metadata = RunMetadata::new(cli::VERSION, file);

            info!("Reading records from {file}");
            let parsed = fasta::read_path(file)?;
            info!("Read {} records", parsed.len());

            let report = composition::analyze_with_threads(&parsed, *threads)
                .with_context(|| format!("Could not analyse {file}"))?;
            metadata.elapsed = now.elapsed().as_secs_f64();

            let mut writer = get_writer(output)?;
            let opts = FilterOpts { len: *len, gc: *gc };
            write_composition(&mut writer, &report, &opts, &metadata, *format)?;
            writer.flush()?;

            let summary = report.summary();
            info!(
                "Stats: {} records analysed, {} failed, {:.3}s runtime",
                summary.analysed, summary.failed, metadata.elapsed
            );
        }
        Commands::Variants {
            pair,
            output,
            format,
        } => {
            let Pair { labels, seqs } = resolve_pair(pair)?;
            let found = variants::find_variants(&seqs.0, &seqs.1)
                .context("Could not compare sequences")?;

            let mut writer = get_writer(output)?;
            let labels = (labels.0.as_str(), labels.1.as_str());
            write_variants(&mut writer, &found, labels, *format)?;
            writer.flush()?;

            info!(
                "Found {} variants between `{}` and `{}`",
                found.len(),
                labels.0,
                labels.1
            );
        }
        Commands::Evolution {
            pair,
            output,
            format,
        } => {
            let Pair { labels, seqs } = resolve_pair(pair)?;
            let summary = evolution::estimate(&seqs.0, &seqs.1)
                .context("Could not compare sequences")?;

            let mut writer = get_writer(output)?;
            write_evolution(&mut writer, &summary, *format)?;
            writer.flush()?;

            info!(
                "Estimated {} edit operations between `{}` and `{}`",
                summary.total(),
                labels.0,
                labels.1
            );
        }
    };
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        std::process::exit(1);
    }
}
