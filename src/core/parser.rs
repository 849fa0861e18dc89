use crate::domain::model::Record;
use crate::utils::error::{EtlError, Result};

/// Pages of the extracted document are separated by a form feed.
pub const PAGE_BREAK: char = '\u{0c}';

const FIELD_DELIMITER: char = ',';
const MIN_FIELDS: usize = 4;

/// Parses every page of `text` in order.
///
/// Lines with fewer than four fields are dropped. A line with a non-integer
/// age aborts the whole document.
pub fn parse_document(text: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut dropped = 0usize;

    let lines = text.split(PAGE_BREAK).flat_map(str::lines);
    for (index, line) in lines.enumerate() {
        match parse_line(line, index + 1)? {
            Some(record) => records.push(record),
            None if !line.trim().is_empty() => dropped += 1,
            None => {}
        }
    }

    if dropped > 0 {
        tracing::debug!("Dropped {} malformed lines", dropped);
    }

    Ok(records)
}

/// `"Ana,34,62kg,R$1.250,00"` -> Record. `line_number` is only used in errors.
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<Record>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if parts.len() < MIN_FIELDS {
        return Ok(None);
    }

    let raw_age = parts[1].trim();
    let age = raw_age.parse::<i64>().map_err(|_| EtlError::InvalidAge {
        line: line_number,
        value: raw_age.to_string(),
    })?;

    // 金額本身可能含有逗號，剩餘欄位重新以逗號接回
    let money = parts[3..].join(",").trim().to_string();

    Ok(Some(Record {
        name: parts[0].trim().to_string(),
        age,
        weight: parts[2].trim().to_string(),
        money,
    }))
}
