//! Header-aware CSV parsing for published sheet exports
//!
//! The first non-blank record names the fields (trimmed), blank lines are
//! skipped and every later record is zipped positionally against the headers.
//! Parsing is fail-fast: the first malformed record aborts the whole source.
//! Text with no header record at all (an empty export) parses to no rows.

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;

use super::models::Row;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: quoted field is never closed")]
    UnterminatedQuote { line: u64 },

    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: {message}")]
    Malformed { line: u64, message: String },
}

impl ParseError {
    /// Line the error was detected on
    pub fn line(&self) -> u64 {
        match self {
            ParseError::UnterminatedQuote { line }
            | ParseError::ColumnCount { line, .. }
            | ParseError::Malformed { line, .. } => *line,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse one source's CSV text into rows.
///
/// Rows whose `Front` is missing or blank are dropped.
pub fn parse_rows(text: &str) -> Result<Vec<Row>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    // csv accepts an unclosed quote by running the field to EOF; catch it first
    if let Some(line) = find_unterminated_quote(text) {
        return Err(ParseError::UnterminatedQuote { line });
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    let mut skipped_blank = 0usize;
    let mut skipped_no_front = 0usize;

    for result in reader.records() {
        let record = result.map_err(to_parse_error)?;

        if is_blank(&record) {
            skipped_blank += 1;
            continue;
        }

        let Some(headers) = headers.as_ref() else {
            headers = Some(record.iter().map(|h| h.trim().to_string()).collect());
            continue;
        };

        if record.len() != headers.len() {
            return Err(ParseError::ColumnCount {
                line: record_line(&record),
                expected: headers.len(),
                found: record.len(),
            });
        }

        let row = Row::from_pairs(
            headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.as_str(), value)),
        );

        if !row.has_front() {
            skipped_no_front += 1;
            continue;
        }

        rows.push(row);
    }

    if headers.is_none() {
        log::debug!("parse_rows: no header record, treating source as empty");
        return Ok(rows);
    }

    log::debug!(
        "parse_rows: {} rows, {} blank lines skipped, {} rows without Front dropped",
        rows.len(),
        skipped_blank,
        skipped_no_front
    );

    Ok(rows)
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn to_parse_error(err: csv::Error) -> ParseError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    ParseError::Malformed {
        line,
        message: err.to_string(),
    }
}

/// Return the line on which a never-closed quoted field starts.
///
/// A quote only opens a field when it is the field's first character; a quote
/// anywhere else in an unquoted field is literal text, as the csv reader
/// treats it. Inside a quoted field `""` is an escaped quote.
fn find_unterminated_quote(text: &str) -> Option<u64> {
    let mut line = 1u64;
    let mut in_quotes = false;
    let mut field_start = true;
    let mut opened_at = 0u64;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            line += 1;
        }

        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }

        match c {
            '"' if field_start => {
                in_quotes = true;
                opened_at = line;
                field_start = false;
            }
            ',' | '\n' => field_start = true,
            '\r' => {}
            _ => field_start = false,
        }
    }

    in_quotes.then_some(opened_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_sheet() {
        let text = "Front,Back,Sentence\nHund,dog,Der Hund läuft.\nKatze,cat,\n";
        let rows = parse_rows(text).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].front(), "Hund");
        assert_eq!(rows[0].back(), "dog");
        assert_eq!(rows[0].sentence(), Some("Der Hund läuft."));
        assert_eq!(rows[1].sentence(), None);
    }

    #[test]
    fn test_headers_are_trimmed() {
        let text = " Front , Back \nHaus,house\n";
        let rows = parse_rows(text).unwrap();
        assert_eq!(rows[0].front(), "Haus");
        assert_eq!(rows[0].back(), "house");
    }

    #[test]
    fn test_row_count_law() {
        // 1 header + 6 lines: 2 blank, 1 with empty Front, 3 usable
        let text = "Front,Back\nHund,dog\n\nKatze,cat\n   \n ,nothing\nHaus,house\n";
        let lines = text.lines().count();
        let blank = text.lines().filter(|l| l.trim().is_empty()).count();
        let rows = parse_rows(text).unwrap();

        assert_eq!(rows.len(), lines - 1 - blank - 1);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_quoted_fields_with_commas_and_newlines() {
        let text = "Front,Back,Sentence\n\"Bank\",\"bank, bench\",\"Er sitzt\nauf der Bank.\"\n";
        let rows = parse_rows(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].back(), "bank, bench");
        assert_eq!(rows[0].sentence(), Some("Er sitzt\nauf der Bank."));
    }

    #[test]
    fn test_escaped_quotes_are_not_unterminated() {
        let text = "Front,Back\n\"sagen \"\"hallo\"\"\",say hello\n";
        let rows = parse_rows(text).unwrap();
        assert_eq!(rows[0].front(), "sagen \"hallo\"");
    }

    #[test]
    fn test_quote_inside_unquoted_field_is_literal() {
        let text = "Front,Back\n12\" Pizza,12-inch pizza\nHund,dog\n";
        let rows = parse_rows(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].front(), "12\" Pizza");
        assert_eq!(rows[1].front(), "Hund");
    }

    #[test]
    fn test_unterminated_quote_after_literal_quote() {
        let text = "Front,Back\n12\" Pizza,pizza\nHund,\"dog\n";
        let err = parse_rows(text).unwrap_err();
        assert_eq!(err, ParseError::UnterminatedQuote { line: 3 });
    }

    #[test]
    fn test_unterminated_quote_reports_line() {
        let text = "Front,Back\nHund,dog\n\"Katze,cat\nHaus,house\n";
        let err = parse_rows(text).unwrap_err();
        assert_eq!(err, ParseError::UnterminatedQuote { line: 3 });
    }

    #[test]
    fn test_column_count_mismatch() {
        let text = "Front,Back\nHund,dog\nKatze,cat,extra\n";
        let err = parse_rows(text).unwrap_err();
        assert_eq!(
            err,
            ParseError::ColumnCount {
                line: 3,
                expected: 2,
                found: 3
            }
        );
        assert_eq!(err.line(), 3);
    }

    #[test]
    fn test_header_only_yields_no_rows() {
        assert!(parse_rows("Front,Back,Sentence\n").unwrap().is_empty());
    }

    #[test]
    fn test_empty_export_yields_no_rows() {
        assert!(parse_rows("").unwrap().is_empty());
        assert!(parse_rows("\n  \n\r\n").unwrap().is_empty());
        assert!(parse_rows("\u{feff}").unwrap().is_empty());
    }

    #[test]
    fn test_leading_blank_lines_before_header() {
        let rows = parse_rows("\n \nFront,Back\nHund,dog\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].back(), "dog");
    }

    #[test]
    fn test_missing_front_column_drops_everything() {
        let rows = parse_rows("Word,Back\nHund,dog\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let rows = parse_rows("\u{feff}Front,Back\nHund,dog\n").unwrap();
        assert_eq!(rows[0].front(), "Hund");
    }
}
