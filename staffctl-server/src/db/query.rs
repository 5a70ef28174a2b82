//! Filtered listing query builder
//!
//! Builds `SELECT ... WHERE TRUE [AND clause]* ORDER BY id [LIMIT $n OFFSET $n+1]`
//! with one positional placeholder per present filter. Values only ever
//! travel as bound arguments; the SQL text contains column names and
//! placeholders only.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};

use crate::models::{EmployeeFilter, Pagination};

/// Columns selected for an employee row, in table order.
pub const EMPLOYEE_COLUMNS: &str = "id, nombre, tipo_documento, documento, centro_trabajo, \
     tipo_empleado, registro, estado, fecha_ingreso, fecha_retiro, cargo, novedades, fecha_creacion";

/// A bound query argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlArg {
    Text(String),
    Bool(bool),
    BigInt(i64),
}

/// Parameterized employee query and its ordered arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeQuery {
    sql: String,
    args: Vec<SqlArg>,
}

impl EmployeeQuery {
    /// Paginated listing: filters, then `ORDER BY id`, `LIMIT`, `OFFSET`.
    ///
    /// Limit and offset are always the final two arguments.
    pub fn list(filter: &EmployeeFilter, page: Pagination) -> Self {
        let mut query = Self::filtered(filter);
        let limit = query.push_arg(SqlArg::BigInt(page.limit()));
        let offset = query.push_arg(SqlArg::BigInt(page.offset()));
        query
            .sql
            .push_str(&format!(" ORDER BY id ASC LIMIT ${} OFFSET ${}", limit, offset));
        query
    }

    /// Unpaginated variant used for export.
    pub fn export(filter: &EmployeeFilter) -> Self {
        let mut query = Self::filtered(filter);
        query.sql.push_str(" ORDER BY id ASC");
        query
    }

    fn filtered(filter: &EmployeeFilter) -> Self {
        let mut query = Self {
            sql: format!("SELECT {} FROM empleados WHERE TRUE", EMPLOYEE_COLUMNS),
            args: Vec::new(),
        };

        // Evaluation order fixes placeholder numbering.
        if let Some(text) = &filter.search {
            query.and_where(
                "(nombre ILIKE $ OR documento ILIKE $)",
                SqlArg::Text(format!("%{}%", text)),
            );
        }
        if let Some(kind) = filter.document_type {
            query.and_where("tipo_documento = $", SqlArg::Text(kind.as_str().to_owned()));
        }
        if let Some(center) = filter.work_center {
            query.and_where("centro_trabajo = $", SqlArg::Text(center.as_str().to_owned()));
        }
        if let Some(registered) = filter.registered {
            query.and_where("registro = $", SqlArg::Bool(registered));
        }
        if let Some(status) = filter.status {
            query.and_where("estado = $", SqlArg::Text(status.as_str().to_owned()));
        }
        if let Some(position) = filter.position {
            query.and_where("cargo = $", SqlArg::Text(position.as_str().to_owned()));
        }

        query
    }

    /// Push an argument and return its 1-based placeholder index.
    fn push_arg(&mut self, arg: SqlArg) -> usize {
        self.args.push(arg);
        self.args.len()
    }

    /// Append `AND <template>`, replacing every `$` in the template with the
    /// placeholder of `arg`.
    fn and_where(&mut self, template: &str, arg: SqlArg) {
        let placeholder = format!("${}", self.push_arg(arg));
        self.sql.push_str(" AND ");
        self.sql.push_str(&template.replace('$', &placeholder));
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[SqlArg] {
        &self.args
    }

    /// Prepare a typed sqlx query with every argument bound in order.
    pub fn query_as<'q, O>(&'q self) -> QueryAs<'q, Postgres, O, PgArguments>
    where
        O: for<'r> FromRow<'r, PgRow>,
    {
        self.args
            .iter()
            .fold(sqlx::query_as::<Postgres, O>(&self.sql), |query, arg| match arg {
                SqlArg::Text(s) => query.bind(s.as_str()),
                SqlArg::Bool(b) => query.bind(*b),
                SqlArg::BigInt(n) => query.bind(*n),
            })
    }
}
