// src/export/xlsx.rs

use crate::errors::AppResult;
use crate::export::excel_date::{DATE_TIME_FORMAT, naive_datetime_to_excel_serial};
use crate::export::model::{COLUMN_WIDTHS, ReportRow, SHEET_NAME, TimeCell, get_headers};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};

/// Build the report workbook in memory.
///
/// One header row (bold, centered, frozen) followed by one line per row.
/// An empty history gives a sheet with the header only.
pub(crate) fn render_xlsx(rows: &[ReportRow]) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    // ---------------------------
    // Header
    // ---------------------------
    let header_format = Format::new().set_bold().set_align(FormatAlign::Center);

    for (col, header) in get_headers().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    worksheet.set_freeze_panes(1, 0)?;

    // ---------------------------
    // Righe
    // ---------------------------
    let date_format = Format::new()
        .set_num_format(DATE_TIME_FORMAT)
        .set_align(FormatAlign::Left);

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet.write_string(r, 0, &row.report_id)?;
        worksheet.write_string(r, 1, &row.kind)?;
        worksheet.write_string(r, 2, &row.location)?;
        write_time_cell(worksheet, r, 3, &row.start, &date_format)?;
        write_time_cell(worksheet, r, 4, &row.end, &date_format)?;
        worksheet.write_string(r, 5, &row.duration)?;
        worksheet.write_string(r, 6, &row.chief)?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_time_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &TimeCell,
    date_format: &Format,
) -> AppResult<()> {
    match cell {
        TimeCell::At(dt) => {
            let serial = naive_datetime_to_excel_serial(dt);
            worksheet.write_number_with_format(row, col, serial, date_format)?;
        }
        TimeCell::Raw(text) => {
            worksheet.write_string(row, col, text)?;
        }
    }
    Ok(())
}
