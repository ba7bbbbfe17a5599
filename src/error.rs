use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the analysis core. Each variant aborts only the call that produced it;
/// the batch composition analyzer stores them per record instead of propagating.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("unable to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("GC content is undefined for a sequence of length 0")]
    DivideByZero,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
