//! Listing filters
//!
//! Query-string names follow the UI: `tipo`, `centroTrabajo`, `registro`,
//! `estado`, `cargo`, `search`. Empty strings mean "not filtered".

use serde::Deserialize;

use super::employee::parse_variant;
use super::{DocumentType, EmployeeStatus, Position, ValidationError, WorkCenter};

/// Registration filter value that selects registered employees.
/// Any other non-empty value selects unregistered ones.
pub const REGISTERED: &str = "registrado";

/// Raw listing query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub tipo: Option<String>,
    #[serde(rename = "centroTrabajo")]
    pub centro_trabajo: Option<String>,
    pub registro: Option<String>,
    pub estado: Option<String>,
    pub cargo: Option<String>,
    pub search: Option<String>,
}

/// Validated filter set for employee listing and export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeFilter {
    /// Case-insensitive substring of name or document number
    pub search: Option<String>,
    pub document_type: Option<DocumentType>,
    pub work_center: Option<WorkCenter>,
    /// `Some(false)` filters unregistered; `None` applies no filter
    pub registered: Option<bool>,
    pub status: Option<EmployeeStatus>,
    pub position: Option<Position>,
}

impl EmployeeFilter {
    /// Build a filter from raw query parameters.
    pub fn from_params(params: &ListParams) -> Result<Self, ValidationError> {
        // Search text is matched as typed; only an empty string disables it.
        let search = params.search.clone().filter(|s| !s.is_empty());

        let registered = params
            .registro
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s == REGISTERED);

        Ok(Self {
            search,
            document_type: parse_variant("tipo", params.tipo.as_deref(), DocumentType::from_wire)?,
            work_center: parse_variant(
                "centroTrabajo",
                params.centro_trabajo.as_deref(),
                WorkCenter::from_wire,
            )?,
            registered,
            status: parse_variant("estado", params.estado.as_deref(), EmployeeStatus::from_wire)?,
            position: parse_variant("cargo", params.cargo.as_deref(), Position::from_wire)?,
        })
    }

    /// Number of filters that will produce a WHERE clause.
    pub fn active_count(&self) -> usize {
        [
            self.search.is_some(),
            self.document_type.is_some(),
            self.work_center.is_some(),
            self.registered.is_some(),
            self.status.is_some(),
            self.position.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}
