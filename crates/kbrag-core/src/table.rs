//! Lenient delimited-text parser for record sources.
//!
//! Comma separated, `"` quoting with `""` escapes, `\n` or `\r\n` row ends.
//! The first row names the columns. Short rows are padded with `""`, long rows
//! are cut to the header width, and rows that are blank in every field are
//! dropped. Whitespace between a field's start and its opening quote is
//! ignored, so `x, "b,c" ,d` still has three fields. Unbalanced quotes never
//! fail the parse: the reader keeps whatever field boundaries it ends up with.

use csv::{ReaderBuilder, Trim};

use crate::error::ParseError;
use crate::types::Record;

pub fn parse(raw: &str) -> Result<Vec<Record>, ParseError> {
    let raw = strip_space_before_quotes(raw);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(raw.as_bytes());

    let header: Vec<String> = reader.headers().map_err(malformed)?.iter().map(str::to_string).collect();
    if header.iter().all(String::is_empty) { return Err(ParseError::MissingHeader); }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(malformed)?;
        if row.iter().all(str::is_empty) { continue; }
        let record: Record = header
            .iter()
            .enumerate()
            .map(|(idx, column)| (column.as_str(), row.get(idx).unwrap_or("")))
            .collect();
        records.push(record);
    }
    Ok(records)
}

/// The reader only opens a quoted field on a leading `"`, so drop the blanks
/// in front of one. Quote state follows the reader: quoting starts at a field
/// start only, `""` inside quotes is an escape.
fn strip_space_before_quotes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blanks = String::new();
    let mut at_field_start = true;
    let mut in_quotes = false;
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            out.push(c);
            if c == '"' {
                if chars.peek() == Some(&'"') { out.push('"'); chars.next(); } else { in_quotes = false; }
            }
            continue;
        }
        if at_field_start && (c == ' ' || c == '\t') { blanks.push(c); continue; }
        if c == '"' && at_field_start {
            blanks.clear();
            in_quotes = true;
        } else {
            out.push_str(&blanks);
            blanks.clear();
        }
        out.push(c);
        at_field_start = matches!(c, ',' | '\n' | '\r');
    }
    out.push_str(&blanks);
    out
}

fn malformed(err: csv::Error) -> ParseError { ParseError::Malformed(err.to_string()) }
