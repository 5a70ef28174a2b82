//! XLSX rendering
//!
//! One worksheet named `Empleados`, a bold header row of wire field names,
//! then one row per employee. Ids are numbers and `registro` a boolean
//! cell; missing dates are left blank.

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use super::{ExportError, WIRE_COLUMNS};
use crate::http::routes::employees::EmployeeResponse;

const SHEET_NAME: &str = "Empleados";

pub fn write_xlsx(rows: &[EmployeeResponse]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        let bold = Format::new().set_bold();
        for (col, name) in WIRE_COLUMNS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *name, &bold)?;
        }

        for (i, row) in rows.iter().enumerate() {
            let line = u32::try_from(i + 1).unwrap_or(u32::MAX);
            write_row(sheet, line, row)?;
        }

        sheet.set_freeze_panes(1, 0)?;
        sheet.autofit();
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_row(sheet: &mut Worksheet, line: u32, row: &EmployeeResponse) -> Result<(), XlsxError> {
    sheet.write_number(line, 0, f64::from(row.id))?;
    sheet.write_string(line, 1, &row.nombre)?;
    sheet.write_string(line, 2, &row.tipo_documento)?;
    sheet.write_string(line, 3, &row.documento)?;
    sheet.write_string(line, 4, &row.centro_trabajo)?;
    sheet.write_string(line, 5, &row.tipo_empleado)?;
    sheet.write_boolean(line, 6, row.registro)?;
    sheet.write_string(line, 7, &row.estado)?;
    if let Some(date) = &row.fecha_ingreso {
        sheet.write_string(line, 8, date)?;
    }
    if let Some(date) = &row.fecha_retiro {
        sheet.write_string(line, 9, date)?;
    }
    sheet.write_string(line, 10, &row.cargo)?;
    sheet.write_string(line, 11, &row.novedades)?;
    sheet.write_string(line, 12, &row.fecha_creacion)?;
    Ok(())
}
