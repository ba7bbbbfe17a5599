use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::{Args, Parser, Subcommand};

use nucleo::filter::Interval;
use nucleo::output::OutputFormat;

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
🧬 nucleo version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   composition statistics and pairwise comparison for FASTA sequences";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    flatten_help = true,
    styles = STYLES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report the length and GC content of every record in a FASTA file
    #[command(arg_required_else_help = true)]
    Stats {
        /// the input FASTA file
        file: String,

        /// the output file, or standard output if not given
        #[arg(short)]
        output: Option<String>,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// the number of threads to use
        #[arg(short, long, default_value_t = 1)]
        threads: usize,

        /// only report records with a length within the given float interval [a,b].
        /// a is the minimum, and b is the maximum (both inclusive).
        /// alternatively, a can be `-inf` and b can be `inf`.
        /// records which could not be analysed are always reported.
        #[arg(
            long,
            value_parser = |x: &str| Interval::try_from(x),
            default_value = "0,inf",
            verbatim_doc_comment
        )]
        len: Interval,

        /// only report records with a GC percentage within the given float interval [a,b].
        /// see the docs for `--len` for documentation on how to use the interval.
        #[arg(
            long,
            value_parser = |x: &str| Interval::try_from(x),
            default_value = "0,100",
            verbatim_doc_comment
        )]
        gc: Interval,
    },

    /// List the positions at which two sequences differ. Only positions up to the length of
    /// the shorter sequence are compared.
    #[command(arg_required_else_help = true)]
    Variants {
        #[command(flatten)]
        pair: PairArgs,

        /// the output file, or standard output if not given
        #[arg(short)]
        output: Option<String>,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Estimate the insertions, deletions and substitutions separating two sequences
    #[command(arg_required_else_help = true)]
    Evolution {
        #[command(flatten)]
        pair: PairArgs,

        /// the output file, or standard output if not given
        #[arg(short)]
        output: Option<String>,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// The two sequences to compare: either typed directly, or taken from a FASTA file.
#[derive(Args)]
pub struct PairArgs {
    /// the first sequence. it may start with the gap marker `-`, as in `-ACG`.
    #[arg(
        required_unless_present = "fasta",
        conflicts_with = "fasta",
        allow_hyphen_values = true
    )]
    pub seq1: Option<String>,

    /// the second sequence
    #[arg(
        required_unless_present = "fasta",
        conflicts_with = "fasta",
        allow_hyphen_values = true
    )]
    pub seq2: Option<String>,

    /// read both sequences from a FASTA file. the first two records are used unless
    /// `--first-id` or `--second-id` are given.
    #[arg(long, verbatim_doc_comment)]
    pub fasta: Option<String>,

    /// the identifier of the first record to compare
    #[arg(long, requires = "fasta")]
    pub first_id: Option<String>,

    /// the identifier of the second record to compare
    #[arg(long, requires = "fasta")]
    pub second_id: Option<String>,
}
