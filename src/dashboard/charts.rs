//! Chart selection and the figure builders behind it.
//!
//! Figures serialize to the JSON shape plotly.js expects (`data` + `layout`),
//! so the page only has to hand them to `Plotly.react`.

use super::table::DashboardTable;
use crate::domain::normalize::format_money;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ChartKind {
    #[default]
    MoneyPerPerson,
    WeightVsAge,
    MoneyDistribution,
    RemainingPie,
    SalesTrend,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::MoneyPerPerson,
        ChartKind::WeightVsAge,
        ChartKind::MoneyDistribution,
        ChartKind::RemainingPie,
        ChartKind::SalesTrend,
    ];

    /// Dropdown value.
    pub fn id(&self) -> &'static str {
        match self {
            ChartKind::MoneyPerPerson => "dinheiro_pessoa",
            ChartKind::WeightVsAge => "peso_idade",
            ChartKind::MoneyDistribution => "distribuicao_dinheiro",
            ChartKind::RemainingPie => "pizza_restante",
            ChartKind::SalesTrend => "tendencia_vendas",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::MoneyPerPerson => "Dinheiro por Pessoa",
            ChartKind::WeightVsAge => "Peso vs Idade",
            ChartKind::MoneyDistribution => "Distribuição do Dinheiro",
            ChartKind::RemainingPie => "Gráfico de Pizza - Valor Restante",
            ChartKind::SalesTrend => "Tendência de Vendas",
        }
    }

    /// Unknown ids fall back to [`ChartKind::MoneyPerPerson`].
    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == id)
            .unwrap_or_default()
    }

    pub fn build(&self, table: &DashboardTable) -> Figure {
        let builder: fn(&DashboardTable) -> Figure = match self {
            ChartKind::MoneyPerPerson => money_per_person,
            ChartKind::WeightVsAge => weight_vs_age,
            ChartKind::MoneyDistribution => money_distribution,
            ChartKind::RemainingPie => remaining_pie,
            ChartKind::SalesTrend => sales_trend,
        };
        builder(table)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Axis {
    Numbers(Vec<f64>),
    Labels(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Bar {
        x: Axis,
        y: Axis,
    },
    Scatter {
        x: Axis,
        y: Axis,
        mode: &'static str,
    },
    Histogram {
        name: String,
        x: Axis,
        y: Axis,
        histfunc: &'static str,
    },
    Pie {
        labels: Vec<String>,
        values: Vec<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutTitle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLayout {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: LayoutTitle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<AxisLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<AxisLayout>,
}

impl Layout {
    /// No title text, only the centered position.
    fn centered() -> Self {
        Self {
            title: LayoutTitle { text: None, x: 0.5 },
            xaxis: None,
            yaxis: None,
        }
    }

    fn titled(text: &str) -> Self {
        let mut layout = Self::centered();
        layout.title.text = Some(text.to_string());
        layout
    }

    fn axes(mut self, x: &str, y: &str) -> Self {
        self.xaxis = Some(AxisLayout {
            title: Title { text: x.to_string() },
        });
        self.yaxis = Some(AxisLayout {
            title: Title { text: y.to_string() },
        });
        self
    }
}

fn money_per_person(table: &DashboardTable) -> Figure {
    let rows = table.rows();
    Figure {
        data: vec![Trace::Bar {
            x: Axis::Labels(rows.iter().map(|r| r.name.clone()).collect()),
            y: Axis::Numbers(rows.iter().map(|r| r.money_num).collect()),
        }],
        layout: Layout::titled(ChartKind::MoneyPerPerson.label()).axes("Pessoa", "Dinheiro (R$)"),
    }
}

fn weight_vs_age(table: &DashboardTable) -> Figure {
    let rows = table.rows();
    Figure {
        data: vec![Trace::Scatter {
            x: Axis::Numbers(rows.iter().map(|r| r.age as f64).collect()),
            y: Axis::Numbers(rows.iter().map(|r| r.weight).collect()),
            mode: "markers",
        }],
        layout: Layout::titled(ChartKind::WeightVsAge.label()).axes("Idade", "Peso (kg)"),
    }
}

/// "Acima de R$50.000" / "Abaixo de R$50.000" for the given threshold.
pub fn money_category(money: f64, threshold: f64) -> String {
    let limit = format_money(threshold);
    let limit = limit.strip_suffix(",00").unwrap_or(&limit);
    if money >= threshold {
        format!("Acima de {}", limit)
    } else {
        format!("Abaixo de {}", limit)
    }
}

fn money_distribution(table: &DashboardTable) -> Figure {
    // 每個分類一條 trace，圖例顏色才會分開
    let mut traces: Vec<(String, Vec<f64>)> = Vec::new();
    for row in table.rows() {
        let category = money_category(row.money_num, table.threshold());
        match traces.iter_mut().find(|(name, _)| *name == category) {
            Some((_, values)) => values.push(row.money_num),
            None => traces.push((category, vec![row.money_num])),
        }
    }

    Figure {
        data: traces
            .into_iter()
            .map(|(name, values)| Trace::Histogram {
                x: Axis::Labels(vec![name.clone(); values.len()]),
                y: Axis::Numbers(values),
                name,
                histfunc: "sum",
            })
            .collect(),
        layout: Layout::titled(ChartKind::MoneyDistribution.label()).axes("Categoria", "Total (R$)"),
    }
}

fn remaining_pie(table: &DashboardTable) -> Figure {
    let (labels, values) = table
        .below_threshold()
        .map(|row| (row.name.clone(), row.remaining))
        .unzip();

    Figure {
        data: vec![Trace::Pie { labels, values }],
        layout: Layout::centered(),
    }
}

fn sales_trend(table: &DashboardTable) -> Figure {
    let rows = table.rows();
    Figure {
        data: vec![Trace::Scatter {
            x: Axis::Labels(rows.iter().map(|r| r.month.to_string()).collect()),
            y: Axis::Numbers(rows.iter().map(|r| r.sales as f64).collect()),
            mode: "lines",
        }],
        layout: Layout::titled(ChartKind::SalesTrend.label()).axes("Mês", "Vendas (R$)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::table::EnrichOptions;
    use crate::sheet::{MoneyCell, SheetRecord};

    fn table(entries: &[(&str, i64, &str, f64)]) -> DashboardTable {
        let records = entries
            .iter()
            .map(|(name, age, weight, money)| SheetRecord {
                name: name.to_string(),
                age: *age,
                weight: weight.to_string(),
                money: MoneyCell::Number(*money),
                mean_age: None,
                mean_weight: None,
                mean_money: None,
            })
            .collect();
        DashboardTable::build(records, &EnrichOptions::default()).unwrap()
    }

    fn sample() -> DashboardTable {
        table(&[
            ("Ana", 30, "60kg", 50000.0),
            ("Bruno", 41, "85kg", 30000.0),
            ("Carla", 25, "58kg", 49999.5),
            ("Davi", 52, "90kg", 120000.0),
        ])
    }

    #[test]
    fn test_ids_round_trip_and_fallback() {
        for kind in ChartKind::ALL {
            assert_eq!(ChartKind::from_id(kind.id()), kind);
        }
        assert_eq!(ChartKind::from_id(""), ChartKind::MoneyPerPerson);
        assert_eq!(ChartKind::from_id("radar"), ChartKind::MoneyPerPerson);
    }

    #[test]
    fn test_pie_only_has_rows_below_threshold() {
        let figure = ChartKind::RemainingPie.build(&sample());

        match &figure.data[0] {
            Trace::Pie { labels, values } => {
                assert_eq!(labels, &vec!["Bruno".to_string(), "Carla".to_string()]);
                assert_eq!(values, &vec![20000.0, 0.5]);
            }
            other => panic!("expected pie, got {other:?}"),
        }
    }

    #[test]
    fn test_distribution_groups_by_category() {
        let figure = ChartKind::MoneyDistribution.build(&sample());
        assert_eq!(figure.data.len(), 2);

        // 分類依第一次出現的順序，y 由 plotly 以 sum 加總
        let expected = [
            ("Acima de R$50.000", vec![50000.0, 120000.0]),
            ("Abaixo de R$50.000", vec![30000.0, 49999.5]),
        ];
        for (trace, (category, money)) in figure.data.iter().zip(expected) {
            match trace {
                Trace::Histogram { name, x: Axis::Labels(x), y: Axis::Numbers(y), histfunc } => {
                    assert_eq!(name, category);
                    assert!(x.iter().all(|label| label == category));
                    assert_eq!(y, &money);
                    assert_eq!(*histfunc, "sum");
                }
                other => panic!("expected histogram, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_pie_has_no_title_text() {
        let json = serde_json::to_value(ChartKind::RemainingPie.build(&sample())).unwrap();
        assert!(json["layout"]["title"].get("text").is_none());
        assert_eq!(json["layout"]["title"]["x"], 0.5);
    }

    #[test]
    fn test_bar_chart_follows_row_order() {
        let figure = ChartKind::MoneyPerPerson.build(&sample());
        match &figure.data[0] {
            Trace::Bar { x: Axis::Labels(x), y: Axis::Numbers(y) } => {
                assert_eq!(x[0], "Ana");
                assert_eq!(y[3], 120000.0);
            }
            other => panic!("expected bar, got {other:?}"),
        }
        assert_eq!(figure.layout.title.text.as_deref(), Some("Dinheiro por Pessoa"));
        assert_eq!(figure.layout.title.x, 0.5);
    }

    #[test]
    fn test_sales_trend_uses_month_ends() {
        let figure = ChartKind::SalesTrend.build(&sample());
        let json = serde_json::to_value(&figure).unwrap();

        assert_eq!(json["data"][0]["type"], "scatter");
        assert_eq!(json["data"][0]["mode"], "lines");
        assert_eq!(json["data"][0]["x"][0], "2023-01-31");
        assert_eq!(json["layout"]["yaxis"]["title"]["text"], "Vendas (R$)");
    }

    #[test]
    fn test_scatter_plots_weight_against_age() {
        let json = serde_json::to_value(ChartKind::WeightVsAge.build(&sample())).unwrap();
        assert_eq!(json["data"][0]["x"][1], 41.0);
        assert_eq!(json["data"][0]["y"][1], 85.0);
        assert!(json["layout"].get("xaxis").is_some());
    }
}
