//! Employee repository
//!
//! - list/export: built by [`EmployeeQuery`]
//! - create/update/delete: `RETURNING` the affected row
//! - update/delete/toggle on a missing id: `DbError::NotFound`

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use super::DbError;
use crate::db::query::{EmployeeQuery, EMPLOYEE_COLUMNS};
use crate::models::{EmployeeDraft, EmployeeFilter, EmployeeId, EmployeeStatus, Pagination};

/// Employee record from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Employee {
    pub id: i32,
    #[sqlx(rename = "nombre")]
    pub name: String,
    #[sqlx(rename = "tipo_documento")]
    pub document_type: String,
    #[sqlx(rename = "documento")]
    pub document_number: String,
    #[sqlx(rename = "centro_trabajo")]
    pub work_center: String,
    #[sqlx(rename = "tipo_empleado")]
    pub employee_type: String,
    #[sqlx(rename = "registro")]
    pub registered: bool,
    #[sqlx(rename = "estado")]
    pub status: String,
    #[sqlx(rename = "fecha_ingreso")]
    pub hire_date: Option<NaiveDate>,
    #[sqlx(rename = "fecha_retiro")]
    pub termination_date: Option<NaiveDate>,
    #[sqlx(rename = "cargo")]
    pub position: String,
    #[sqlx(rename = "novedades")]
    pub notes: String,
    #[sqlx(rename = "fecha_creacion")]
    pub created_at: DateTime<Utc>,
}

/// Employee repository
pub struct EmployeeRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> EmployeeRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// One page of employees matching the filter, ordered by id.
    pub async fn list(
        &self,
        filter: &EmployeeFilter,
        page: Pagination,
    ) -> Result<Vec<Employee>, DbError> {
        let query = EmployeeQuery::list(filter, page);
        tracing::debug!(sql = query.sql(), args = query.args().len(), "Listing employees");

        let rows = query.query_as::<Employee>().fetch_all(self.pool).await?;
        Ok(rows)
    }

    /// Every employee matching the filter, ordered by id.
    pub async fn export(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, DbError> {
        let query = EmployeeQuery::export(filter);
        tracing::debug!(sql = query.sql(), "Exporting employees");

        let rows = query.query_as::<Employee>().fetch_all(self.pool).await?;
        Ok(rows)
    }

    /// Get a single employee by id.
    pub async fn get(&self, id: EmployeeId) -> Result<Employee, DbError> {
        let sql = format!("SELECT {} FROM empleados WHERE id = $1", EMPLOYEE_COLUMNS);

        sqlx::query_as::<_, Employee>(&sql)
            .bind(id.get())
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Insert a new employee. Id and creation timestamp are assigned by the database.
    pub async fn create(&self, draft: &EmployeeDraft) -> Result<Employee, DbError> {
        let sql = format!(
            r#"
            INSERT INTO empleados (
                nombre, tipo_documento, documento, centro_trabajo, tipo_empleado,
                registro, estado, fecha_ingreso, fecha_retiro, cargo, novedades
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            EMPLOYEE_COLUMNS
        );

        let employee = bind_draft(sqlx::query_as::<_, Employee>(&sql), draft)
            .fetch_one(self.pool)
            .await?;

        tracing::info!(id = employee.id, "Employee created");
        Ok(employee)
    }

    /// Replace every writable field of an existing employee.
    pub async fn update(&self, id: EmployeeId, draft: &EmployeeDraft) -> Result<Employee, DbError> {
        let sql = format!(
            r#"
            UPDATE empleados
            SET nombre = $1, tipo_documento = $2, documento = $3, centro_trabajo = $4,
                tipo_empleado = $5, registro = $6, estado = $7, fecha_ingreso = $8,
                fecha_retiro = $9, cargo = $10, novedades = $11
            WHERE id = $12
            RETURNING {}
            "#,
            EMPLOYEE_COLUMNS
        );

        let employee = bind_draft(sqlx::query_as::<_, Employee>(&sql), draft)
            .bind(id.get())
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!(id = employee.id, "Employee updated");
        Ok(employee)
    }

    /// Hard-delete an employee, returning the removed row.
    pub async fn delete(&self, id: EmployeeId) -> Result<Employee, DbError> {
        let sql = format!("DELETE FROM empleados WHERE id = $1 RETURNING {}", EMPLOYEE_COLUMNS);

        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(id.get())
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!(id = employee.id, "Employee deleted");
        Ok(employee)
    }

    /// Flip status between active and inactive in one statement.
    ///
    /// Any value other than active (including empty) becomes active.
    pub async fn toggle_status(&self, id: EmployeeId) -> Result<Employee, DbError> {
        let sql = format!(
            r#"
            UPDATE empleados
            SET estado = CASE WHEN estado = $2 THEN $3 ELSE $2 END
            WHERE id = $1
            RETURNING {}
            "#,
            EMPLOYEE_COLUMNS
        );

        let active = EmployeeStatus::Active;
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(id.get())
            .bind(active.as_str())
            .bind(active.toggled().as_str())
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!(id = employee.id, status = %employee.status, "Employee status toggled");
        Ok(employee)
    }
}

type EmployeeQueryAs<'q> =
    sqlx::query::QueryAs<'q, sqlx::Postgres, Employee, sqlx::postgres::PgArguments>;

/// Bind the eleven writable columns in table order.
fn bind_draft<'q>(query: EmployeeQueryAs<'q>, draft: &'q EmployeeDraft) -> EmployeeQueryAs<'q> {
    query
        .bind(draft.name.as_str())
        .bind(draft.document_type.map_or("", |t| t.as_str()))
        .bind(draft.document_number.as_str())
        .bind(draft.work_center.map_or("", |w| w.as_str()))
        .bind(draft.employee_type.as_str())
        .bind(draft.registered)
        .bind(draft.status.map_or("", |s| s.as_str()))
        .bind(draft.hire_date)
        .bind(draft.termination_date)
        .bind(draft.position.map_or("", |p| p.as_str()))
        .bind(draft.notes.as_str())
}

fn not_found(id: EmployeeId) -> DbError {
    DbError::NotFound {
        resource: "employee",
        id: id.to_string(),
    }
}

