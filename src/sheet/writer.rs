use super::layout::{CellValue, SheetLayout, HIGHLIGHT_SPAN};
use crate::utils::error::Result;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatPattern, Workbook};

pub const HIGHLIGHT_COLOR: u32 = 0xFF0000;

/// Renders the layout into xlsx bytes.
pub fn workbook_bytes(layout: &SheetLayout) -> Result<Vec<u8>> {
    let centered = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let highlighted = centered
        .clone()
        .set_pattern(FormatPattern::Solid)
        .set_background_color(Color::RGB(HIGHLIGHT_COLOR));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&layout.sheet_name)?;

    for (col, title) in layout.header.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, title, &centered)?;
    }

    for (index, row) in layout.rows.iter().enumerate() {
        let row_num = (index + 1) as u32;
        for (col, cell) in row.cells.iter().enumerate() {
            let format = if row.highlighted && col < HIGHLIGHT_SPAN {
                &highlighted
            } else {
                &centered
            };
            let col_num = col as u16;

            match cell {
                CellValue::Text(text) => {
                    worksheet.write_string_with_format(row_num, col_num, text, format)?;
                }
                CellValue::Integer(value) => {
                    worksheet.write_number_with_format(row_num, col_num, *value as f64, format)?;
                }
                CellValue::Number(value) => {
                    worksheet.write_number_with_format(row_num, col_num, *value, format)?;
                }
                CellValue::Blank => {
                    worksheet.write_blank(row_num, col_num, format)?;
                }
            }
        }
    }

    for (col, width) in layout.column_widths().into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width)?;
    }

    tracing::debug!(
        "Rendered sheet '{}' with {} rows ({} highlighted)",
        layout.sheet_name,
        layout.rows.len(),
        layout.highlighted_count()
    );

    Ok(workbook.save_to_buffer()?)
}
