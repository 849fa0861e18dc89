use crate::domain::model::{TransformResult, SHEET_COLUMNS};
use crate::domain::normalize::{display_float, parse_money};
use crate::utils::error::Result;

/// Extra characters added to the longest value of each column.
pub const WIDTH_PADDING: usize = 2;

/// Only the record columns (name, age, weight, money) receive the fill.
pub const HIGHLIGHT_SPAN: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Blank,
}

impl CellValue {
    /// Text as it appears in the cell, used for column sizing.
    pub fn rendered(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Integer(value) => value.to_string(),
            CellValue::Number(value) => display_float(*value),
            CellValue::Blank => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub cells: Vec<CellValue>,
    pub highlighted: bool,
}

#[derive(Debug, Clone)]
pub struct SheetLayout {
    pub sheet_name: String,
    pub header: Vec<String>,
    pub rows: Vec<SheetRow>,
}

impl SheetLayout {
    /// Longest rendered value (header included) plus [`WIDTH_PADDING`], per column.
    pub fn column_widths(&self) -> Vec<f64> {
        (0..self.header.len())
            .map(|col| {
                let longest_cell = self
                    .rows
                    .iter()
                    .filter_map(|row| row.cells.get(col))
                    .map(|cell| cell.rendered().chars().count())
                    .max()
                    .unwrap_or(0);
                let longest = longest_cell.max(self.header[col].chars().count());
                (longest + WIDTH_PADDING) as f64
            })
            .collect()
    }

    pub fn highlighted_count(&self) -> usize {
        self.rows.iter().filter(|row| row.highlighted).count()
    }
}

/// `money < threshold`, evaluated on the stored text.
pub fn is_highlighted(money_text: &str, threshold: f64) -> Result<bool> {
    Ok(parse_money(money_text)? < threshold)
}

/// Header plus one row per record; the summary goes on the first data row only.
pub fn layout_sheet(result: &TransformResult, sheet_name: &str, threshold: f64) -> Result<SheetLayout> {
    let mut rows = Vec::with_capacity(result.records.len());

    for (index, record) in result.records.iter().enumerate() {
        let mut cells = vec![
            CellValue::Text(record.name.clone()),
            CellValue::Integer(record.age),
            CellValue::Text(record.weight.clone()),
            CellValue::Text(record.money.clone()),
        ];

        if index == 0 {
            cells.push(CellValue::Number(result.summary.mean_age));
            cells.push(CellValue::Text(result.summary.mean_weight.clone()));
            cells.push(CellValue::Text(result.summary.mean_money.clone()));
        } else {
            cells.extend([CellValue::Blank, CellValue::Blank, CellValue::Blank]);
        }

        rows.push(SheetRow {
            cells,
            highlighted: is_highlighted(&record.money, threshold)?,
        });
    }

    Ok(SheetLayout {
        sheet_name: sheet_name.to_string(),
        header: SHEET_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
    })
}
