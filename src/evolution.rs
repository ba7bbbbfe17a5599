use itertools::{EitherOrBoth, Itertools};
use serde::Serialize;

use crate::error::Result;
use crate::variants::ensure_non_empty;

/// The character used to pad the shorter sequence.
pub const GAP: char = '-';

/// Counts of edit operations between two sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EvolutionSummary {
    pub insertions: usize,
    pub deletions: usize,
    pub substitutions: usize,
}

impl EvolutionSummary {
    pub fn total(&self) -> usize {
        self.insertions + self.deletions + self.substitutions
    }
}

impl std::fmt::Display for EvolutionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "insertions: {}", self.insertions)?;
        writeln!(f, "deletions: {}", self.deletions)?;
        write!(f, "substitutions: {}", self.substitutions)
    }
}

/// Estimates the insertions, deletions and substitutions separating two sequences.
///
/// This is not an alignment. The shorter sequence is padded at its end with `GAP` until both
/// have the same length, and the length difference is charged up front: as insertions when
/// `seq1` is longer, as deletions when `seq2` is longer. The padded pair is then compared
/// position by position: a gap in `seq1` is an insertion, a gap in `seq2` is a deletion, and
/// any other mismatch is a substitution.
///
/// Because the padding is also visited by the positional pass, the padded tail is counted
/// twice, once on each counter. For example `estimate("ACGT", "AC")` reports two insertions
/// and two deletions.
///
/// Comparison is case-sensitive.
///
/// # Errors
///
/// Returns `EmptyInput` if either sequence is empty.
pub fn estimate(seq1: &str, seq2: &str) -> Result<EvolutionSummary> {
    ensure_non_empty(seq1, seq2, "the evolution estimator")?;

    let (len1, len2) = (seq1.chars().count(), seq2.chars().count());
    let mut summary = EvolutionSummary {
        insertions: len1.saturating_sub(len2),
        deletions: len2.saturating_sub(len1),
        substitutions: 0,
    };

    for pair in seq1.chars().zip_longest(seq2.chars()) {
        let (b1, b2) = match pair {
            EitherOrBoth::Both(b1, b2) => (b1, b2),
            EitherOrBoth::Left(b1) => (b1, GAP),
            EitherOrBoth::Right(b2) => (GAP, b2),
        };

        if b1 == b2 {
            continue;
        }
        if b1 == GAP {
            summary.insertions += 1;
        } else if b2 == GAP {
            summary.deletions += 1;
        } else {
            summary.substitutions += 1;
        }
    }

    debug!(
        "Estimated {} insertions, {} deletions, {} substitutions",
        summary.insertions, summary.deletions, summary.substitutions
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    fn summary(insertions: usize, deletions: usize, substitutions: usize) -> EvolutionSummary {
        EvolutionSummary { insertions, deletions, substitutions }
    }

    #[test]
    fn identical_sequences() {
        assert_eq!(estimate("ACGT", "ACGT").unwrap(), summary(0, 0, 0));
    }

    #[test]
    fn all_positions_differ() {
        assert_eq!(estimate("AAAA", "CCCC").unwrap(), summary(0, 0, 4));
        assert_eq!(estimate("ACGT", "TGCA").unwrap(), summary(0, 0, 4));
    }

    #[test]
    fn first_longer_counts_tail_twice() {
        // baseline: 2 insertions for the length difference
        // positional pass: 2 deletions for the padded tail of the second sequence
        assert_eq!(estimate("ACGT", "AC").unwrap(), summary(2, 2, 0));
    }

    #[test]
    fn second_longer_counts_tail_twice() {
        // baseline: 3 deletions; positional pass: 3 insertions for the padded first sequence
        assert_eq!(estimate("AC", "ACGTA").unwrap(), summary(3, 3, 0));
    }

    #[test]
    fn substitutions_and_padding() {
        let s = estimate("AGGTT", "ACG").unwrap();
        assert_eq!(s, summary(2, 2, 1));
        assert_eq!(s.total(), 5);
    }

    #[test]
    fn literal_gap_characters() {
        // a gap already present in the first sequence reads as an insertion
        assert_eq!(estimate("A-GT", "ACGT").unwrap(), summary(1, 0, 0));
        assert_eq!(estimate("ACGT", "AC-T").unwrap(), summary(0, 1, 0));
        // a gap in the longer sequence matches the padding
        assert_eq!(estimate("AC-", "AC").unwrap(), summary(1, 0, 0));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert_eq!(estimate("acgt", "ACGT").unwrap(), summary(0, 0, 4));
    }

    #[test]
    fn empty_sequence_is_an_error() {
        assert!(matches!(estimate("", "AC"), Err(AnalysisError::EmptyInput(_))));
        assert!(matches!(estimate("AC", ""), Err(AnalysisError::EmptyInput(_))));
    }

    #[test]
    fn display() {
        assert_eq!(
            summary(1, 2, 3).to_string(),
            "insertions: 1\ndeletions: 2\nsubstitutions: 3"
        );
    }
}
