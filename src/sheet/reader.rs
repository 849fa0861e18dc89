use crate::domain::model::{
    COL_AGE, COL_MEAN_AGE, COL_MEAN_MONEY, COL_MEAN_WEIGHT, COL_MONEY, COL_NAME, COL_WEIGHT,
};
use crate::domain::normalize::parse_money;
use crate::utils::error::{EtlError, Result};
use calamine::{Data, Range, Reader, Xlsx};
use std::collections::HashMap;
use std::io::Cursor;

static EMPTY_CELL: Data = Data::Empty;

/// Money as found in the sheet: the extractor writes text, hand-edited sheets may hold numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum MoneyCell {
    Text(String),
    Number(f64),
}

impl MoneyCell {
    pub fn value(&self) -> Result<f64> {
        match self {
            MoneyCell::Text(text) => parse_money(text),
            MoneyCell::Number(value) => Ok(*value),
        }
    }
}

/// One data row of the spreadsheet, before dashboard enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRecord {
    pub name: String,
    pub age: i64,
    pub weight: String,
    pub money: MoneyCell,
    pub mean_age: Option<f64>,
    pub mean_weight: Option<String>,
    pub mean_money: Option<String>,
}

/// Reads `sheet_name` (or the first sheet when it is absent) from xlsx bytes.
pub fn read_sheet(bytes: Vec<u8>, sheet_name: &str) -> Result<Vec<SheetRecord>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

    let names = workbook.sheet_names();
    let target = if names.iter().any(|n| n == sheet_name) {
        sheet_name.to_string()
    } else {
        let first = names.first().cloned().ok_or_else(|| EtlError::ProcessingError {
            message: "workbook has no sheets".to_string(),
        })?;
        tracing::warn!("Sheet '{}' not found, using '{}'", sheet_name, first);
        first
    };

    let range = workbook.worksheet_range(&target)?;
    records_from_range(&range, &target)
}

fn records_from_range(range: &Range<Data>, sheet: &str) -> Result<Vec<SheetRecord>> {
    let mut rows = range.rows();
    let header: HashMap<String, usize> = match rows.next() {
        Some(cells) => cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (cell_text(cell), i))
            .collect(),
        None => return Ok(Vec::new()),
    };

    let column = |name: &str| {
        header.get(name).copied().ok_or_else(|| EtlError::MissingColumn {
            sheet: sheet.to_string(),
            column: name.to_string(),
        })
    };
    let name_col = column(COL_NAME)?;
    let age_col = column(COL_AGE)?;
    let weight_col = column(COL_WEIGHT)?;
    let money_col = column(COL_MONEY)?;
    // 平均值欄位是選用的
    let mean_age_col = header.get(COL_MEAN_AGE).copied();
    let mean_weight_col = header.get(COL_MEAN_WEIGHT).copied();
    let mean_money_col = header.get(COL_MEAN_MONEY).copied();

    let mut records = Vec::new();
    for cells in rows {
        let get = |col: usize| cells.get(col).unwrap_or(&EMPTY_CELL);
        if matches!(get(name_col), Data::Empty) {
            continue;
        }

        records.push(SheetRecord {
            name: cell_text(get(name_col)),
            age: cell_integer(get(age_col))?,
            weight: cell_text(get(weight_col)),
            money: money_cell(get(money_col)),
            mean_age: mean_age_col.and_then(|c| cell_float(get(c))),
            mean_weight: mean_weight_col.and_then(|c| non_empty_text(get(c))),
            mean_money: mean_money_col.and_then(|c| non_empty_text(get(c))),
        });
    }

    Ok(records)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(text) => text.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn non_empty_text(cell: &Data) -> Option<String> {
    let text = cell_text(cell);
    (!text.is_empty()).then_some(text)
}

fn cell_float(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(value) => Some(*value),
        Data::Int(value) => Some(*value as f64),
        Data::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn cell_integer(cell: &Data) -> Result<i64> {
    match cell {
        Data::Int(value) => Ok(*value),
        Data::Float(value) if value.fract() == 0.0 => Ok(*value as i64),
        Data::String(text) => text.trim().parse().map_err(|_| invalid_age(cell)),
        _ => Err(invalid_age(cell)),
    }
}

fn invalid_age(cell: &Data) -> EtlError {
    EtlError::InvalidAge {
        line: 0,
        value: cell.to_string(),
    }
}

fn money_cell(cell: &Data) -> MoneyCell {
    match cell {
        Data::Float(value) => MoneyCell::Number(*value),
        Data::Int(value) => MoneyCell::Number(*value as f64),
        other => MoneyCell::Text(cell_text(other)),
    }
}
