use super::charts::ChartKind;
use super::table::{DashboardRow, DashboardTable, TABLE_COLUMNS};
use crate::domain::normalize::display_float;
use std::fmt::Write;

pub const PAGE_TITLE: &str = "Dashboard - Dados Pessoas";
const PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn row_cells(row: &DashboardRow) -> [String; 11] {
    let optional = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        row.name.clone(),
        row.age.to_string(),
        display_float(row.weight),
        row.money.clone(),
        row.mean_age.map(display_float).unwrap_or_default(),
        optional(&row.mean_weight),
        optional(&row.mean_money),
        display_float(row.money_num),
        row.month.to_string(),
        row.sales.to_string(),
        display_float(row.remaining),
    ]
}

fn render_options(selected: ChartKind) -> String {
    let mut html = String::new();
    for kind in ChartKind::ALL {
        let marker = if kind == selected { " selected" } else { "" };
        let _ = write!(
            html,
            r#"<option value="{}"{}>{}</option>"#,
            kind.id(),
            marker,
            escape_html(kind.label())
        );
    }
    html
}

fn render_table(table: &DashboardTable) -> String {
    let mut html = String::from(r#"<table id="tabela-dados"><thead><tr>"#);
    for column in TABLE_COLUMNS {
        let _ = write!(html, "<th>{}</th>", escape_html(column));
    }
    html.push_str("</tr></thead><tbody>");
    for row in table.rows() {
        html.push_str("<tr>");
        for cell in row_cells(row) {
            let _ = write!(html, "<td>{}</td>", escape_html(&cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

/// The whole single-page UI. Chart and table state live in the browser and
/// are sent back on every interaction.
pub fn render(table: &DashboardTable) -> String {
    let initial = ChartKind::default();
    format!(
        r##"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{plotly}"></script>
<style>
  body {{ font-family: sans-serif; margin: 0; }}
  .banner, .tabela {{ padding: 20px; background-color: #f4f4f4; }}
  .banner {{ text-align: center; }}
  .seletor {{ width: 30%; margin: 20px auto; }}
  .seletor select {{ width: 100%; }}
  #botao-tabela {{ padding: 10px 20px; font-size: 16px; cursor: pointer; }}
  #tabela-dados {{ width: 100%; border-collapse: collapse; overflow-x: auto; display: block; }}
  #tabela-dados th {{ background-color: lightgrey; font-weight: bold; }}
  #tabela-dados th, #tabela-dados td {{ text-align: center; padding: 4px 8px; border-bottom: 1px solid #ddd; }}
</style>
</head>
<body>
<div class="banner">
  <h1>Dashboard - Dados de Pessoas</h1>
  <p>Análise interativa dos dados da planilha.</p>
</div>
<div class="seletor">
  <label for="dropdown-grafico">Selecione o gráfico:</label>
  <select id="dropdown-grafico">{options}</select>
</div>
<div style="padding: 20px"><div id="grafico-dinamico"></div></div>
<div class="tabela">
  <button id="botao-tabela">Tabela de Dados</button>
  <div id="container-tabela" style="display: none">
    <h3 style="text-align: center">Tabela de Dados</h3>
    {table}
  </div>
</div>
<script>
  const state = {{ chart: "{initial}", tableClicks: 0 }};

  async function drawChart() {{
    const response = await fetch("/api/figure?chart=" + encodeURIComponent(state.chart));
    const figure = await response.json();
    Plotly.react("grafico-dinamico", figure.data, figure.layout);
  }}

  async function toggleTable() {{
    state.tableClicks += 1;
    const response = await fetch("/api/table-style?n_clicks=" + state.tableClicks);
    const style = await response.json();
    document.getElementById("container-tabela").style.display = style.display;
  }}

  document.getElementById("dropdown-grafico").addEventListener("change", (event) => {{
    state.chart = event.target.value;
    drawChart();
  }});
  document.getElementById("botao-tabela").addEventListener("click", toggleTable);
  drawChart();
</script>
</body>
</html>
"##,
        title = PAGE_TITLE,
        plotly = PLOTLY_SRC,
        options = render_options(initial),
        table = render_table(table),
        initial = initial.id(),
    )
}
