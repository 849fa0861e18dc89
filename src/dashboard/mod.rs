//! Web dashboard over the extractor's spreadsheet.

pub mod charts;
pub mod page;
pub mod server;
pub mod state;
pub mod table;

pub use charts::{ChartKind, Figure};
pub use state::{TableStyle, UiState};
pub use table::{DashboardRow, DashboardTable, EnrichOptions};
