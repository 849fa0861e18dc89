use crate::domain::model::{Record, SummaryRow};
use crate::domain::normalize::{format_money, format_weight, parse_money, parse_weight_int, round2};
use crate::utils::error::{EtlError, Result};

/// Means of age, weight and money over all records.
pub fn summarize(records: &[Record]) -> Result<SummaryRow> {
    if records.is_empty() {
        return Err(EtlError::EmptyDataset);
    }
    let count = records.len() as f64;

    let mut age_total = 0.0;
    let mut weight_total = 0.0;
    let mut money_total = 0.0;
    for record in records {
        age_total += record.age as f64;
        weight_total += parse_weight_int(&record.weight)? as f64;
        money_total += parse_money(&record.money)?;
    }

    Ok(SummaryRow {
        mean_age: round2(age_total / count),
        mean_weight: format_weight(weight_total / count),
        mean_money: format_money(money_total / count),
    })
}
