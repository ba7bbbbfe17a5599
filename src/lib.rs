//! Composition statistics and pairwise comparison of nucleotide sequences read from FASTA text.

#[macro_use]
extern crate log;

pub mod composition;
pub mod error;
pub mod evolution;
pub mod fasta;
pub mod filter;
pub mod metadata;
pub mod output;
pub mod variants;

pub use error::{AnalysisError, Result};
