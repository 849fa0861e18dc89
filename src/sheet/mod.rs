//! Spreadsheet artifact shared by the extractor (writer) and the dashboard (reader).

pub mod layout;
pub mod reader;
pub mod writer;

pub use layout::{layout_sheet, CellValue, SheetLayout, SheetRow};
pub use reader::{read_sheet, MoneyCell, SheetRecord};
pub use writer::workbook_bytes;
