//! Record source for gene rows: `species,sequence,name,expression`.

use crate::gene::GeneRecord;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const FIELD_COUNT: usize = 4;

/// A row rejected at the record-source boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordError {
    /// 1-based line number in the input
    pub line: u64,
    pub reason: String,
}

/// Records parsed from one input, plus the rows that were rejected.
#[derive(Debug, Clone, Default)]
pub struct ParsedRecords {
    pub records: Vec<GeneRecord>,
    pub rejected: Vec<RecordError>,
}

/// Converts one delimited row into a typed record.
fn parse_row(row: &StringRecord, line: u64) -> std::result::Result<GeneRecord, String> {
    if row.len() != FIELD_COUNT {
        return Err(format!("expected {} fields, found {}", FIELD_COUNT, row.len()));
    }
    let expression = row[3]
        .parse::<i64>()
        .map_err(|e| format!("invalid expression value '{}': {}", &row[3], e))?;

    Ok(GeneRecord {
        species: row[0].to_string(),
        sequence: row[1].to_string(),
        name: row[2].to_string(),
        expression,
        line: Some(line),
    })
}

/// Reads gene rows from any reader. Malformed rows, including rows that are
/// not valid UTF-8, are collected in `rejected` rather than failing the
/// whole input. Only I/O errors abort the read.
pub fn read_records<R: Read>(reader: R) -> Result<ParsedRecords> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut parsed = ParsedRecords::default();
    for result in csv_reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => {
                return Err(e).context("Failed to read delimited record");
            }
            Err(e) => {
                let line = e.position().map_or(0, |p| p.line());
                warn!("Rejecting line {}: {}", line, e);
                parsed.rejected.push(RecordError { line, reason: e.to_string() });
                continue;
            }
        };
        let line = row.position().map_or(0, |p| p.line());

        // Blank lines carry a single empty field
        if row.len() == 1 && row[0].is_empty() {
            continue;
        }

        match parse_row(&row, line) {
            Ok(record) => parsed.records.push(record),
            Err(reason) => {
                warn!("Rejecting line {}: {}", line, reason);
                parsed.rejected.push(RecordError { line, reason });
            }
        }
    }

    Ok(parsed)
}

pub fn read_records_file(path: &Path) -> Result<ParsedRecords> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open records file: {}", path.display()))?;
    let parsed = read_records(file)
        .with_context(|| format!("Failed to read records from {}", path.display()))?;

    info!(
        "Read {} records from {} ({} rejected)",
        parsed.records.len(),
        path.display(),
        parsed.rejected.len()
    );
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_typed_records() {
        let input = "Drosophila melanogaster,atgcatgc,kdr,350\nDrosophila simulans, ATAT ,ninaE,12\n";
        let parsed = read_records(input.as_bytes()).unwrap();

        assert!(parsed.rejected.is_empty());
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].species, "Drosophila melanogaster");
        assert_eq!(parsed.records[0].expression, 350);
        assert_eq!(parsed.records[1].sequence, "ATAT");
        assert_eq!(parsed.records[1].line, Some(2));
    }

    #[test]
    fn test_malformed_rows_are_rejected() {
        let input = "Drosophila yakuba,ATGC,a,12\nDrosophila yakuba,ATGC,b,lots\nshort,row\n\nDrosophila erecta,GGCC,c,-4\n";
        let parsed = read_records(input.as_bytes()).unwrap();

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[1].expression, -4);
        assert_eq!(parsed.rejected.len(), 2);
        assert_eq!(parsed.rejected[0].line, 2);
        assert!(parsed.rejected[0].reason.contains("lots"));
        assert_eq!(parsed.rejected[1].line, 3);
        assert!(parsed.rejected[1].reason.contains("expected 4 fields"));
    }

    #[test]
    fn test_invalid_utf8_row_is_rejected() {
        let input: &[u8] = b"Drosophila simulans,ATGC,good1,300\nDrosophila simulans,AT\xffGC,bad,300\nDrosophila simulans,GGCC,good2,300\n";
        let parsed = read_records(input).unwrap();

        let names: Vec<&str> = parsed.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["good1", "good2"]);
        assert_eq!(parsed.records[1].line, Some(3));
        assert_eq!(parsed.rejected.len(), 1);
        assert_eq!(parsed.rejected[0].line, 2);
        assert!(parsed.rejected[0].reason.contains("invalid utf-8"));
    }
}
