//! Employee domain values
//!
//! Enumerated attributes are stored as text; these types pin the wire values
//! the UI sends and reject anything else at the edge.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Employee identifier (server-assigned `SERIAL`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(i32);

impl EmployeeId {
    /// Parse an identifier from a path segment or query value.
    ///
    /// # Example
    /// ```
    /// use staffctl_server::models::EmployeeId;
    ///
    /// assert_eq!(EmployeeId::parse("42").unwrap().get(), 42);
    /// assert!(EmployeeId::parse("abc").is_err());
    /// assert!(EmployeeId::parse("").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: "id" });
        }

        raw.parse::<i32>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "id",
                reason: "must be an integer",
            })
    }

    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity document kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    /// Cédula de Ciudadanía
    NationalId,
    /// Tarjeta de Identidad
    TemporaryId,
    Passport,
}

impl DocumentType {
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "CC" => Some(Self::NationalId),
            "TI" => Some(Self::TemporaryId),
            "Pasaporte" => Some(Self::Passport),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NationalId => "CC",
            Self::TemporaryId => "TI",
            Self::Passport => "Pasaporte",
        }
    }
}

/// Where the employee works
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkCenter {
    Office,
    Factory,
    Remote,
}

impl WorkCenter {
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "Oficina" => Some(Self::Office),
            "Fábrica" => Some(Self::Factory),
            "Remoto" => Some(Self::Remote),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Office => "Oficina",
            Self::Factory => "Fábrica",
            Self::Remote => "Remoto",
        }
    }
}

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "Activo" => Some(Self::Active),
            "Inactivo" => Some(Self::Inactive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Activo",
            Self::Inactive => "Inactivo",
        }
    }

    /// The other state. Status has exactly two states.
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

/// Job position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Manager,
    Operator,
    Assistant,
}

impl Position {
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "Gerente" => Some(Self::Manager),
            "Operario" => Some(Self::Operator),
            "Asistente" => Some(Self::Assistant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "Gerente",
            Self::Operator => "Operario",
            Self::Assistant => "Asistente",
        }
    }
}

/// Parse an optional enumerated value. Absent or blank means `None`.
pub fn parse_variant<T>(
    field: &'static str,
    raw: Option<&str>,
    from_wire: fn(&str) -> Option<T>,
) -> Result<Option<T>, ValidationError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => from_wire(s)
            .map(Some)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field,
                value: s.to_owned(),
            }),
    }
}

/// Parse an optional calendar date. Blank means `None`.
///
/// Accepts `YYYY-MM-DD` and full RFC 3339 timestamps (date part is kept).
pub fn parse_date(field: &'static str, raw: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| Some(dt.date_naive()))
        .map_err(|_| ValidationError::InvalidFormat {
            field,
            reason: "expected a date in YYYY-MM-DD format",
        })
}

/// Complete set of writable employee attributes.
///
/// Used for both insert and full-replace update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeDraft {
    pub name: String,
    pub document_type: Option<DocumentType>,
    pub document_number: String,
    pub work_center: Option<WorkCenter>,
    pub employee_type: String,
    pub registered: bool,
    pub status: Option<EmployeeStatus>,
    pub hire_date: Option<NaiveDate>,
    pub termination_date: Option<NaiveDate>,
    pub position: Option<Position>,
    pub notes: String,
}

impl EmployeeDraft {
    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let (Some(hired), Some(left)) = (self.hire_date, self.termination_date) {
            if left < hired {
                return Err(ValidationError::DateOrder);
            }
        }
        Ok(())
    }

    /// Creation additionally requires a hire date.
    pub fn validate_for_create(&self) -> Result<(), ValidationError> {
        if self.hire_date.is_none() {
            return Err(ValidationError::Empty {
                field: "fecha_ingreso",
            });
        }
        self.validate()
    }
}
