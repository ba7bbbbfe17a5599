use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// A single position at which two sequences differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Variant {
    /// 1-indexed position in both sequences
    pub position: usize,
    pub base1: char,
    pub base2: char,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{}", self.position, self.base1, self.base2)
    }
}

/// Fails with `EmptyInput` if either sequence is empty; `which` names the comparison.
pub(crate) fn ensure_non_empty(seq1: &str, seq2: &str, which: &str) -> Result<()> {
    for (n, seq) in [(1, seq1), (2, seq2)] {
        if seq.is_empty() {
            return Err(AnalysisError::EmptyInput(format!(
                "sequence {n} passed to {which} is empty"
            )));
        }
    }
    Ok(())
}

/// Reports every position where two sequences differ, in ascending order.
///
/// Characters are compared verbatim, so `a` and `A` differ. Only positions up to the length of
/// the shorter sequence are compared: any trailing characters of the longer sequence are
/// ignored. Use `evolution::estimate` to account for a difference in length.
///
/// # Errors
///
/// Returns `EmptyInput` if either sequence is empty.
pub fn find_variants(seq1: &str, seq2: &str) -> Result<Vec<Variant>> {
    ensure_non_empty(seq1, seq2, "the variant caller")?;

    let variants: Vec<Variant> = seq1
        .chars()
        .zip(seq2.chars())
        .enumerate()
        .filter(|(_, (b1, b2))| b1 != b2)
        .map(|(i, (base1, base2))| Variant {
            position: i + 1,
            base1,
            base2,
        })
        .collect();

    debug!("Found {} variants", variants.len());
    Ok(variants)
}
