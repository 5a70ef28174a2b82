//! Schema bootstrap for the employee table
//!
//! Idempotent; safe to run on every startup.

use sqlx::PgPool;

use super::DbError;

/// Create the `empleados` table and its indexes if missing.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running employee schema migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS empleados (
            id SERIAL PRIMARY KEY,
            nombre TEXT NOT NULL DEFAULT '',
            tipo_documento TEXT NOT NULL DEFAULT '',
            documento TEXT NOT NULL DEFAULT '',
            centro_trabajo TEXT NOT NULL DEFAULT '',
            tipo_empleado TEXT NOT NULL DEFAULT '',
            registro BOOLEAN NOT NULL DEFAULT FALSE,
            estado TEXT NOT NULL DEFAULT '',
            fecha_ingreso DATE,
            fecha_retiro DATE,
            cargo TEXT NOT NULL DEFAULT '',
            novedades TEXT NOT NULL DEFAULT '',
            fecha_creacion TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_empleados_nombre ON empleados(nombre)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_empleados_documento ON empleados(documento)")
        .execute(pool)
        .await?;

    tracing::info!("Employee schema ready");
    Ok(())
}
