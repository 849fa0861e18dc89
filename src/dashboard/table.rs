use crate::domain::model::DEFAULT_MONEY_THRESHOLD;
use crate::domain::normalize::{format_money, parse_weight_float};
use crate::sheet::SheetRecord;
use crate::utils::error::{EtlError, Result};
use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

const SALES_RANGE: std::ops::Range<u32> = 100..1000;

/// Parameters of the synthetic demo columns.
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    pub sales_seed: u64,
    pub start_date: NaiveDate,
    pub threshold: f64,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            sales_seed: 42,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            threshold: DEFAULT_MONEY_THRESHOLD,
        }
    }
}

/// A spreadsheet row plus the numeric and synthetic columns the charts need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardRow {
    #[serde(rename = "Pessoa")]
    pub name: String,
    #[serde(rename = "Idade")]
    pub age: i64,
    #[serde(rename = "Peso")]
    pub weight: f64,
    #[serde(rename = "Dinheiro")]
    pub money: String,
    #[serde(rename = "MIdade")]
    pub mean_age: Option<f64>,
    #[serde(rename = "MPeso")]
    pub mean_weight: Option<String>,
    #[serde(rename = "MValor")]
    pub mean_money: Option<String>,
    #[serde(rename = "Dinheiro_Num")]
    pub money_num: f64,
    #[serde(rename = "Mês")]
    pub month: NaiveDate,
    #[serde(rename = "Vendas")]
    pub sales: u32,
    #[serde(rename = "Valor_Restante")]
    pub remaining: f64,
}

/// Column titles of the data table, in display order.
pub const TABLE_COLUMNS: [&str; 11] = [
    "Pessoa",
    "Idade",
    "Peso",
    "Dinheiro",
    "MIdade",
    "MPeso",
    "MValor",
    "Dinheiro_Num",
    "Mês",
    "Vendas",
    "Valor_Restante",
];

/// Read-only table built once at startup.
#[derive(Debug, Clone)]
pub struct DashboardTable {
    rows: Vec<DashboardRow>,
    threshold: f64,
}

impl DashboardTable {
    pub fn build(records: Vec<SheetRecord>, options: &EnrichOptions) -> Result<Self> {
        let months = month_ends(options.start_date, records.len())?;
        let mut rng = StdRng::seed_from_u64(options.sales_seed);

        let mut rows = Vec::with_capacity(records.len());
        for (record, month) in records.into_iter().zip(months) {
            let money_num = record.money.value()?;
            rows.push(DashboardRow {
                weight: parse_weight_float(&record.weight)?,
                money: format_money(money_num),
                name: record.name,
                age: record.age,
                mean_age: record.mean_age,
                mean_weight: record.mean_weight,
                mean_money: record.mean_money,
                money_num,
                month,
                sales: rng.gen_range(SALES_RANGE),
                remaining: remaining_to(options.threshold, money_num),
            });
        }

        Ok(Self {
            rows,
            threshold: options.threshold,
        })
    }

    pub fn rows(&self) -> &[DashboardRow] {
        &self.rows
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows strictly below the threshold.
    pub fn below_threshold(&self) -> impl Iterator<Item = &DashboardRow> {
        self.rows.iter().filter(move |row| row.money_num < self.threshold)
    }
}

/// `max(0, threshold - money)`.
pub fn remaining_to(threshold: f64, money: f64) -> f64 {
    (threshold - money).max(0.0)
}

/// `periods` month-end dates, the first one being the end of `start`'s month.
pub fn month_ends(start: NaiveDate, periods: usize) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::with_capacity(periods);
    let (mut year, mut month) = (start.year(), start.month());

    for _ in 0..periods {
        dates.push(last_day_of_month(year, month)?);
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }

    Ok(dates)
}

fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .ok_or_else(|| EtlError::ProcessingError {
            message: format!("date out of range: {}-{}", year, month),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::MoneyCell;

    fn record(name: &str, weight: &str, money: MoneyCell) -> SheetRecord {
        SheetRecord {
            name: name.to_string(),
            age: 30,
            weight: weight.to_string(),
            money,
            mean_age: None,
            mean_weight: None,
            mean_money: None,
        }
    }

    fn sample_table() -> DashboardTable {
        DashboardTable::build(
            vec![
                record("Ana", "60kg", MoneyCell::Text("R$50.000,00".to_string())),
                record("Bruno", "85.5kg", MoneyCell::Text("R$30.000,00".to_string())),
                record("Carla", "58kg", MoneyCell::Number(1234.56)),
            ],
            &EnrichOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_month_ends_from_january() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let dates = month_ends(start, 14).unwrap();

        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2023, 1, 31).unwrap());
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
        assert_eq!(dates[11], NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(dates[13], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_build_normalizes_fields() {
        let table = sample_table();
        let rows = table.rows();

        assert_eq!(rows[0].money_num, 50000.0);
        assert_eq!(rows[0].money, "R$50.000,00");
        assert_eq!(rows[1].weight, 85.5);
        assert_eq!(rows[2].money, "R$1.234,56");
        assert_eq!(rows[2].month, NaiveDate::from_ymd_opt(2023, 3, 31).unwrap());
    }

    #[test]
    fn test_remaining_to_threshold() {
        let table = sample_table();
        let remaining: Vec<f64> = table.rows().iter().map(|r| r.remaining).collect();

        assert_eq!(remaining[0], 0.0);
        assert_eq!(remaining[1], 20000.0);
        assert!((remaining[2] - 48765.44).abs() < 1e-6);
        assert_eq!(remaining_to(50000.0, 90000.0), 0.0);
    }

    #[test]
    fn test_sales_are_seeded_and_in_range() {
        let first = sample_table();
        let second = sample_table();

        let sales: Vec<u32> = first.rows().iter().map(|r| r.sales).collect();
        let again: Vec<u32> = second.rows().iter().map(|r| r.sales).collect();
        assert_eq!(sales, again);
        assert!(sales.iter().all(|s| (100..1000).contains(s)));
    }

    #[test]
    fn test_below_threshold_excludes_boundary() {
        let table = sample_table();
        let names: Vec<&str> = table.below_threshold().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bruno", "Carla"]);
    }

    #[test]
    fn test_rows_serialize_with_column_titles() {
        let table = sample_table();
        let json = serde_json::to_value(&table.rows()[0]).unwrap();
        let object = json.as_object().unwrap();

        for column in TABLE_COLUMNS {
            assert!(object.contains_key(column), "missing {column}");
        }
        assert_eq!(json["Mês"], "2023-01-31");
    }
}
