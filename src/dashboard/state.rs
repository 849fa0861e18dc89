use super::charts::ChartKind;
use serde::{Deserialize, Serialize};

/// Presentation state of one page: the selected chart and how many times the
/// table button was clicked. It travels with each request, the server keeps none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    pub chart: ChartKind,
    pub table_clicks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStyle {
    pub display: String,
}

impl UiState {
    pub fn select(self, chart_id: &str) -> Self {
        Self {
            chart: ChartKind::from_id(chart_id),
            ..self
        }
    }

    /// Odd click counts show the table.
    pub fn table_visible(&self) -> bool {
        self.table_clicks % 2 == 1
    }

    pub fn table_style(&self) -> TableStyle {
        let display = if self.table_visible() { "block" } else { "none" };
        TableStyle {
            display: display.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clicked(table_clicks: u64) -> UiState {
        UiState {
            table_clicks,
            ..UiState::default()
        }
    }

    #[test]
    fn test_table_toggle_parity() {
        for clicks in [0, 2, 4] {
            assert!(!clicked(clicks).table_visible());
            assert_eq!(clicked(clicks).table_style().display, "none");
        }
        for clicks in [1, 3, 5] {
            assert!(clicked(clicks).table_visible());
            assert_eq!(clicked(clicks).table_style().display, "block");
        }
    }

    #[test]
    fn test_select_does_not_touch_table_state() {
        let state = clicked(1).select("pizza_restante");
        assert_eq!(state.chart, ChartKind::RemainingPie);
        assert!(state.table_visible());

        let state = state.select("desconhecido");
        assert_eq!(state.chart, ChartKind::MoneyPerPerson);
    }
}
