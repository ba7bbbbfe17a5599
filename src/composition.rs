use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::fasta::ParsedFile;

/// Length and GC content of a single sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompositionResult {
    /// Number of characters in the sequence, gaps and ambiguity codes included
    pub length: usize,
    /// Percentage of characters which are `G` or `C`, in [0, 100]
    pub gc_content: f64,
}

/// Aggregate figures for a `CompositionReport`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionSummary {
    pub records: usize,
    pub analysed: usize,
    pub failed: usize,
    pub total_length: usize,
    /// Mean GC content over the successfully analysed records
    pub mean_gc_content: Option<f64>,
}

/// Per-record composition results, in the order of the parsed file. A record which could not
/// be analysed holds the error describing why.
#[derive(Debug, Default)]
pub struct CompositionReport {
    pub entries: IndexMap<String, Result<CompositionResult>>,
}

impl CompositionReport {
    pub fn successes(&self) -> impl Iterator<Item = (&str, &CompositionResult)> + '_ {
        self.entries
            .iter()
            .filter_map(|(id, r)| r.as_ref().ok().map(|r| (id.as_str(), r)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &AnalysisError)> + '_ {
        self.entries
            .iter()
            .filter_map(|(id, r)| r.as_ref().err().map(|e| (id.as_str(), e)))
    }

    pub fn summary(&self) -> CompositionSummary {
        let (analysed, total_length, gc_sum) = self
            .successes()
            .fold((0, 0, 0.0), |(n, len, gc), (_, r)| {
                (n + 1, len + r.length, gc + r.gc_content)
            });

        CompositionSummary {
            records: self.entries.len(),
            analysed,
            failed: self.entries.len() - analysed,
            total_length,
            mean_gc_content: (analysed > 0).then(|| gc_sum / analysed as f64),
        }
    }
}

/// Computes the GC content of a sequence as a percentage.
///
/// Counting is case-insensitive. Every character counts towards the length, but only `G` and
/// `C` count towards the GC total.
///
/// # Errors
///
/// Returns `DivideByZero` for an empty sequence, rather than producing `NaN`.
///
/// # Example
///
/// ```
/// assert_eq!(nucleo::composition::gc_content("gGcA").unwrap(), 75.0);
/// ```
pub fn gc_content(sequence: &str) -> Result<f64> {
    let (length, gc) = sequence.chars().fold((0usize, 0usize), |(len, gc), c| {
        let is_gc = matches!(c.to_ascii_uppercase(), 'G' | 'C');
        (len + 1, gc + is_gc as usize)
    });

    if length == 0 {
        return Err(AnalysisError::DivideByZero);
    }

    Ok(gc as f64 / length as f64 * 100.0)
}

/// Computes length and GC content for a single sequence.
pub fn composition(sequence: &str) -> Result<CompositionResult> {
    Ok(CompositionResult {
        length: sequence.chars().count(),
        gc_content: gc_content(sequence)?,
    })
}

fn log_failures(report: &CompositionReport) {
    for (id, e) in report.failures() {
        warn!("Skipping record `{id}`: {e}");
    }
}

fn ensure_records(parsed: &ParsedFile) -> Result<()> {
    if parsed.is_empty() {
        return Err(AnalysisError::EmptyInput(
            "no FASTA records were found".to_string(),
        ));
    }
    Ok(())
}

/// Analyses every record of a parsed file.
///
/// A record which fails (an empty sequence) is kept in the report as an error and does not
/// stop the remaining records from being analysed.
///
/// # Errors
///
/// Returns `EmptyInput` if the file has no records at all.
pub fn analyze(parsed: &ParsedFile) -> Result<CompositionReport> {
    ensure_records(parsed)?;

    let entries = parsed
        .iter()
        .map(|rec| (rec.id.to_string(), composition(rec.seq)))
        .collect();

    let report = CompositionReport { entries };
    log_failures(&report);
    Ok(report)
}

/// Like `analyze`, but computes records on a dedicated pool of `threads` workers. The report
/// keeps the order of the parsed file.
pub fn analyze_with_threads(parsed: &ParsedFile, threads: usize) -> Result<CompositionReport> {
    if threads == 0 {
        return Err(AnalysisError::InvalidInput(
            "thread count must be at least 1".to_string(),
        ));
    }
    if threads == 1 {
        return analyze(parsed);
    }
    ensure_records(parsed)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| AnalysisError::InvalidInput(format!("unable to start {threads} threads: {e}")))?;

    let records: Vec<_> = parsed.iter().collect();
    let results: Vec<_> = pool.install(|| {
        records
            .par_iter()
            .map(|rec| composition(rec.seq))
            .collect()
    });

    let entries = records
        .iter()
        .zip(results)
        .map(|(rec, r)| (rec.id.to_string(), r))
        .collect();

    let report = CompositionReport { entries };
    log_failures(&report);
    Ok(report)
}
