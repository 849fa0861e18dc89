use serde::{Deserialize, Serialize};

/// Rows with money strictly below this value are flagged.
pub const DEFAULT_MONEY_THRESHOLD: f64 = 50_000.0;

pub const COL_NAME: &str = "Pessoa";
pub const COL_AGE: &str = "Idade";
pub const COL_WEIGHT: &str = "Peso";
pub const COL_MONEY: &str = "Dinheiro";
pub const COL_MEAN_AGE: &str = "MIdade";
pub const COL_MEAN_WEIGHT: &str = "MPeso";
pub const COL_MEAN_MONEY: &str = "MValor";

/// Spreadsheet column order.
pub const SHEET_COLUMNS: [&str; 7] = [
    COL_NAME,
    COL_AGE,
    COL_WEIGHT,
    COL_MONEY,
    COL_MEAN_AGE,
    COL_MEAN_WEIGHT,
    COL_MEAN_MONEY,
];

/// One accepted document line, fields kept as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub age: i64,
    pub weight: String,
    pub money: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub mean_age: f64,
    pub mean_weight: String,
    pub mean_money: String,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<Record>,
    pub summary: SummaryRow,
}
