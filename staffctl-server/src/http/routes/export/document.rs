//! PDF rendering
//!
//! A4 landscape table using the built-in Helvetica faces, so no font files
//! are needed at runtime. Column headings repeat on every page; cell text
//! that does not fit its column is cut with `...`.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use super::ExportError;
use crate::http::routes::employees::EmployeeResponse;

const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 10.0;
const TITLE_SIZE: f32 = 12.0;
const FONT_SIZE: f32 = 7.0;
const LINE_HEIGHT: f32 = 5.0;
/// Helvetica averages roughly half an em per glyph.
const CHAR_WIDTH_MM: f32 = FONT_SIZE * 0.5 * 0.3528;

const TITLE: &str = "Empleados";

/// Heading and width (mm) of each printed column.
const COLUMNS: [(&str, f32); 12] = [
    ("ID", 10.0),
    ("Nombre", 35.0),
    ("Tipo de Identificación", 18.0),
    ("Documento", 24.0),
    ("Centro de Trabajo", 22.0),
    ("Registro", 15.0),
    ("Estado", 16.0),
    ("Fecha de Ingreso", 20.0),
    ("Retiro", 20.0),
    ("Cargo", 20.0),
    ("Novedades", 47.0),
    ("Creación", 30.0),
];

/// First table row baseline, below the title and heading rows.
const FIRST_ROW_Y: f32 = PAGE_HEIGHT - MARGIN - 2.0 * LINE_HEIGHT - 4.0;

/// Table rows that fit on one page.
pub fn rows_per_page() -> usize {
    ((FIRST_ROW_Y - MARGIN) / LINE_HEIGHT) as usize + 1
}

/// Truncate `text` to fit a column `width` mm wide.
pub fn fit(text: &str, width: f32) -> String {
    let max = ((width - 1.0) / CHAR_WIDTH_MM).max(3.0) as usize;
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn cells(row: &EmployeeResponse) -> [String; 12] {
    [
        row.id.to_string(),
        row.nombre.clone(),
        row.tipo_documento.clone(),
        row.documento.clone(),
        row.centro_trabajo.clone(),
        row.registro.to_string(),
        row.estado.clone(),
        row.fecha_ingreso.clone().unwrap_or_default(),
        row.fecha_retiro.clone().unwrap_or_default(),
        row.cargo.clone(),
        row.novedades.clone(),
        row.fecha_creacion.clone(),
    ]
}

fn write_line<S: AsRef<str>>(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    y: f32,
    values: &[S],
) {
    let mut x = MARGIN;
    for ((_, width), value) in COLUMNS.iter().zip(values) {
        layer.use_text(fit(value.as_ref(), *width), FONT_SIZE, Mm(x), Mm(y), font);
        x += width;
    }
}

pub fn write_pdf(rows: &[EmployeeResponse]) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Tabla");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let headings: Vec<&str> = COLUMNS.iter().map(|(name, _)| *name).collect();
    let mut chunks: Vec<&[EmployeeResponse]> = rows.chunks(rows_per_page()).collect();
    if chunks.is_empty() {
        // Headings only
        chunks.push(&[]);
    }

    for (index, chunk) in chunks.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Tabla");
            doc.get_page(page).get_layer(layer)
        };

        let top = PAGE_HEIGHT - MARGIN;
        layer.use_text(TITLE, TITLE_SIZE, Mm(MARGIN), Mm(top), &bold);
        write_line(&layer, &bold, top - LINE_HEIGHT - 4.0, &headings);

        for (offset, row) in chunk.iter().enumerate() {
            let y = FIRST_ROW_Y - offset as f32 * LINE_HEIGHT;
            write_line(&layer, &regular, y, &cells(row));
        }
    }

    doc.save_to_bytes().map_err(|e| ExportError::Pdf(e.to_string()))
}
