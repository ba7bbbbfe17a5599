use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// The character which starts every record header line.
pub const RECORD_MARKER: char = '>';

/// A borrowed view of a single record in a `ParsedFile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequenceRecord<'a> {
    pub id: &'a str,
    pub seq: &'a str,
}

/// An insertion-ordered mapping of record identifier to sequence.
///
/// Identifiers are unique: inserting a record whose identifier already exists replaces the
/// earlier sequence but keeps the earlier position in the ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParsedFile(IndexMap<String, String>);

impl ParsedFile {
    pub fn new() -> Self {
        ParsedFile(IndexMap::new())
    }

    /// Inserts a record, returning the sequence it replaced if the identifier was already present.
    pub fn insert(&mut self, id: String, seq: String) -> Option<String> {
        self.0.insert(id, seq)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over the records in the order their headers first appeared.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = SequenceRecord<'_>> + '_ {
        self.0.iter().map(|(id, seq)| SequenceRecord { id, seq })
    }

    pub fn into_records(self) -> IndexMap<String, String> {
        self.0
    }

    /// Selects two records to compare.
    ///
    /// When an identifier is given it is looked up directly; otherwise the first and second
    /// records of the file are used.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` if the file holds no records. Returns `InvalidInput` if an identifier
    /// is not present, or if the file does not hold enough records to fill an unspecified slot.
    pub fn pair(
        &self,
        first: Option<&str>,
        second: Option<&str>,
    ) -> Result<(SequenceRecord<'_>, SequenceRecord<'_>)> {
        if self.is_empty() {
            return Err(AnalysisError::EmptyInput(
                "no FASTA records were found".to_string(),
            ));
        }
        Ok((self.select(first, 0)?, self.select(second, 1)?))
    }

    fn select(&self, id: Option<&str>, fallback: usize) -> Result<SequenceRecord<'_>> {
        let found = match id {
            Some(id) => self.0.get_key_value(id),
            None => self.0.get_index(fallback),
        };

        found
            .map(|(id, seq)| SequenceRecord { id, seq })
            .ok_or_else(|| match id {
                Some(id) => AnalysisError::InvalidInput(format!("no record with identifier `{id}`")),
                None => AnalysisError::InvalidInput(format!(
                    "at least two records are required for a comparison, found {}",
                    self.len()
                )),
            })
    }
}

/// Accumulates body lines for the record currently being read.
struct OpenRecord {
    id: String,
    body: String,
}

fn flush(parsed: &mut ParsedFile, open: Option<OpenRecord>) {
    if let Some(OpenRecord { id, body }) = open {
        if parsed.0.contains_key(&id) {
            warn!("Duplicate record identifier `{id}`; keeping the later sequence");
        }
        parsed.insert(id, body);
    }
}

/// Feeds one line of input into the parser state.
fn consume_line(parsed: &mut ParsedFile, open: &mut Option<OpenRecord>, line: &str) {
    let line = line.trim_end();

    if let Some(header) = line.strip_prefix(RECORD_MARKER) {
        flush(parsed, open.take());
        *open = Some(OpenRecord {
            id: header.to_string(),
            body: String::new(),
        });
    } else if let Some(record) = open.as_mut() {
        record.body.push_str(line);
    }
    // lines before the first header are discarded
}

/// Parses FASTA text already held in memory.
///
/// Lines before the first `>` header are ignored, so text without any header yields an empty
/// `ParsedFile`.
pub fn parse(text: &str) -> ParsedFile {
    let mut parsed = ParsedFile::new();
    let mut open = None;

    for line in text.lines() {
        consume_line(&mut parsed, &mut open, line);
    }
    flush(&mut parsed, open);

    debug!("Parsed {} records", parsed.len());
    parsed
}

/// Parses FASTA text from any buffered reader, line by line.
///
/// # Errors
///
/// Returns the underlying I/O error if a line cannot be read, including `InvalidData` for
/// input which is not valid UTF-8. A partially read file is never returned.
pub fn parse_reader(reader: impl BufRead) -> std::io::Result<ParsedFile> {
    let mut parsed = ParsedFile::new();
    let mut open = None;

    for line in reader.lines() {
        consume_line(&mut parsed, &mut open, &line?);
    }
    flush(&mut parsed, open);

    debug!("Parsed {} records", parsed.len());
    Ok(parsed)
}

/// Reads and parses a FASTA file. The file handle is closed before this returns, on success
/// and on failure.
pub fn read_path(path: impl AsRef<Path>) -> Result<ParsedFile> {
    let path = path.as_ref();
    let to_err = |source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(to_err)?;
    parse_reader(BufReader::new(file)).map_err(to_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn multiline_records() {
        let parsed = parse(indoc! {"
            >seq1
            ACGT
            ACGT
            >seq2
            GGCC
        "});

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get("seq1"), Some("ACGTACGT"));
        assert_eq!(parsed.get("seq2"), Some("GGCC"));
    }

    #[test]
    fn keeps_header_order() {
        let parsed = parse(">c\nA\n>a\nC\n>b\nG\n");
        let ids: Vec<&str> = parsed.identifiers().collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn body_round_trip() {
        let body = ["ACGTTGCA", "ttgg-NNa", "", "GATTACA"];
        let text = format!(">rec\n{}\n", body.join("\n"));
        assert_eq!(parse(&text).get("rec"), Some(body.concat().as_str()));
    }

    #[test]
    fn no_headers_is_empty() {
        assert!(parse("ACGT\nACGT\n").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn discards_lines_before_first_header() {
        let parsed = parse("\n\n   \nACGT\n>only\nGG\n");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get(""), None);
        assert_eq!(parsed.get("only"), Some("GG"));
    }

    #[test]
    fn strips_trailing_whitespace_and_crlf() {
        let parsed = parse(">id  \r\nAC  \r\nGT\t\r\n");
        assert_eq!(parsed.get("id"), Some("ACGT"));
    }

    #[test]
    fn identifier_keeps_leading_space() {
        let parsed = parse(">  spaced id\nA\n");
        assert_eq!(parsed.get("  spaced id"), Some("A"));
    }

    #[test]
    fn empty_identifier_and_sequence() {
        let parsed = parse(">\nACGT\n>empty\n");
        assert_eq!(parsed.get(""), Some("ACGT"));
        assert_eq!(parsed.get("empty"), Some(""));
    }

    #[test]
    fn duplicate_identifier_last_write_wins() {
        let parsed = parse(">a\nAAAA\n>b\nCCCC\n>a\nGGGG\n");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get("a"), Some("GGGG"));

        // the replaced record keeps its first position
        let ids: Vec<&str> = parsed.identifiers().collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn reader_matches_text() {
        let text = ">x\nAC\nGT\n>y\nTT\n";
        let from_reader = parse_reader(std::io::Cursor::new(text)).unwrap();
        assert_eq!(from_reader, parse(text));
    }

    #[test]
    fn reader_rejects_invalid_utf8() {
        let bytes: &[u8] = b">x\nAC\xff\n";
        let err = parse_reader(bytes).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_path("file_which_does_not_exist.fasta").unwrap_err();
        assert!(matches!(err, AnalysisError::Io { .. }));
    }

    #[test]
    fn pair_defaults_to_first_two() {
        let parsed = parse(">a\nAC\n>b\nAG\n>c\nTT\n");
        let (first, second) = parsed.pair(None, None).unwrap();
        assert_eq!((first.id, second.id), ("a", "b"));

        let (first, second) = parsed.pair(Some("c"), None).unwrap();
        assert_eq!((first.seq, second.seq), ("TT", "AG"));
    }

    #[test]
    fn pair_without_records() {
        let parsed = parse("no header\n");
        assert!(matches!(
            parsed.pair(None, None),
            Err(AnalysisError::EmptyInput(_))
        ));
        assert!(matches!(
            parsed.pair(Some("a"), Some("b")),
            Err(AnalysisError::EmptyInput(_))
        ));
    }

    #[test]
    fn pair_errors() {
        let parsed = parse(">a\nAC\n");
        assert!(matches!(
            parsed.pair(None, None),
            Err(AnalysisError::InvalidInput(_))
        ));
        assert!(matches!(
            parsed.pair(Some("a"), Some("zzz")),
            Err(AnalysisError::InvalidInput(_))
        ));
        assert!(parsed.pair(Some("a"), Some("a")).is_ok());
    }
}
