//! Employee export
//!
//! `GET /employees/export` takes the same filters as the listing, no
//! pagination, plus `format=csv|xlsx|pdf` (default `csv`). The whole
//! filtered set is rendered in memory and returned as an attachment.

mod delimited;
mod document;
mod spreadsheet;

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::db::repos::EmployeeRepo;
use crate::http::error::ApiError;
use crate::http::routes::employees::EmployeeResponse;
use crate::http::server::AppState;
use crate::models::{parse_variant, EmployeeFilter, ListParams};

pub use delimited::write_csv;
pub use document::write_pdf;
pub use spreadsheet::write_xlsx;

/// Wire field names, in [`EmployeeResponse`] field order.
pub const WIRE_COLUMNS: [&str; 13] = [
    "id",
    "nombre",
    "tipo_documento",
    "documento",
    "centro_trabajo",
    "tipo_empleado",
    "registro",
    "estado",
    "fecha_ingreso",
    "fecha_retiro",
    "cargo",
    "novedades",
    "fecha_creacion",
];

/// Export output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Pdf => "application/pdf",
        }
    }

    pub fn filename(self) -> &'static str {
        match self {
            Self::Csv => "empleados.csv",
            Self::Xlsx => "empleados.xlsx",
            Self::Pdf => "empleados.pdf",
        }
    }

    /// Render rows in this format.
    pub fn render(self, rows: &[EmployeeResponse]) -> Result<Vec<u8>, ExportError> {
        match self {
            Self::Csv => write_csv(rows),
            Self::Xlsx => write_xlsx(rows),
            Self::Pdf => write_pdf(rows),
        }
    }
}

/// Rendering failure
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv export failed: {0}")]
    CsvFlush(String),

    #[error("xlsx export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("pdf export failed: {0}")]
    Pdf(String),
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        Self::Internal {
            message: e.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FormatParam {
    format: Option<String>,
}

/// GET /employees/export - every matching employee as an attachment
async fn export_employees(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
    Query(format): Query<FormatParam>,
) -> Result<impl IntoResponse, ApiError> {
    let format = parse_variant("format", format.format.as_deref(), ExportFormat::from_wire)?
        .unwrap_or_default();
    let filter = EmployeeFilter::from_params(&params)?;

    let rows: Vec<EmployeeResponse> = EmployeeRepo::new(&state.pool)
        .export(&filter)
        .await?
        .into_iter()
        .map(EmployeeResponse::from)
        .collect();

    tracing::info!(rows = rows.len(), ?format, "Exporting employees");
    let body = format.render(&rows)?;

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.filename()),
            ),
        ],
        body,
    ))
}

/// Export routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/employees/export", get(export_employees))
}
