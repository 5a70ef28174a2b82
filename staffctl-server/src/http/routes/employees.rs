//! Employee endpoints
//!
//! - `GET    /employees`              filtered, paginated listing
//! - `POST   /employees`              create
//! - `PUT    /employees?id=`          full replace (query id)
//! - `GET    /employees/{id}`         fetch one
//! - `PUT    /employees/{id}`         full replace
//! - `DELETE /employees/{id}`         delete, returns the removed record
//! - `PATCH  /employees/{id}/status`  flip Activo/Inactivo

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Employee, EmployeeRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{PathEmployeeId, QueryEmployeeId, ValidJson};
use crate::http::server::AppState;
use crate::models::{
    parse_date, parse_variant, DocumentType, EmployeeDraft, EmployeeFilter, EmployeeStatus,
    ListParams, Pagination, Position, ValidationError, WorkCenter,
};

/// Create/replace employee request.
///
/// Every field is optional on the wire; text fields default to `""`,
/// `registro` to `false`. Unknown fields (`id`, `fecha_creacion`) are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EmployeeRequest {
    pub nombre: Option<String>,
    pub tipo_documento: Option<String>,
    pub documento: Option<String>,
    pub centro_trabajo: Option<String>,
    pub tipo_empleado: Option<String>,
    pub registro: Option<bool>,
    pub estado: Option<String>,
    pub fecha_ingreso: Option<String>,
    pub fecha_retiro: Option<String>,
    pub cargo: Option<String>,
    pub novedades: Option<String>,
}

impl EmployeeRequest {
    /// Validate wire values into a draft.
    pub fn into_draft(self) -> Result<EmployeeDraft, ValidationError> {
        let draft = EmployeeDraft {
            name: self.nombre.unwrap_or_default(),
            document_type: parse_variant(
                "tipo_documento",
                self.tipo_documento.as_deref(),
                DocumentType::from_wire,
            )?,
            document_number: self.documento.unwrap_or_default(),
            work_center: parse_variant(
                "centro_trabajo",
                self.centro_trabajo.as_deref(),
                WorkCenter::from_wire,
            )?,
            employee_type: self.tipo_empleado.unwrap_or_default(),
            registered: self.registro.unwrap_or(false),
            status: parse_variant("estado", self.estado.as_deref(), EmployeeStatus::from_wire)?,
            hire_date: parse_date("fecha_ingreso", self.fecha_ingreso.as_deref())?,
            termination_date: parse_date("fecha_retiro", self.fecha_retiro.as_deref())?,
            position: parse_variant("cargo", self.cargo.as_deref(), Position::from_wire)?,
            notes: self.novedades.unwrap_or_default(),
        };
        draft.validate()?;
        Ok(draft)
    }
}

/// Employee response, using the UI's field names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: i32,
    pub nombre: String,
    pub tipo_documento: String,
    pub documento: String,
    pub centro_trabajo: String,
    pub tipo_empleado: String,
    pub registro: bool,
    pub estado: String,
    pub fecha_ingreso: Option<String>,
    pub fecha_retiro: Option<String>,
    pub cargo: String,
    pub novedades: String,
    pub fecha_creacion: String,
}

impl From<Employee> for EmployeeResponse {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            nombre: e.name,
            tipo_documento: e.document_type,
            documento: e.document_number,
            centro_trabajo: e.work_center,
            tipo_empleado: e.employee_type,
            registro: e.registered,
            estado: e.status,
            fecha_ingreso: e.hire_date.map(|d| d.format("%Y-%m-%d").to_string()),
            fecha_retiro: e.termination_date.map(|d| d.format("%Y-%m-%d").to_string()),
            cargo: e.position,
            novedades: e.notes,
            fecha_creacion: e.created_at.to_rfc3339(),
        }
    }
}

/// GET /employees - one page of employees matching the filters
async fn list_employees(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<EmployeeResponse>>, ApiError> {
    let page = Pagination::parse(params.page.as_deref(), params.limit.as_deref())?;
    let filter = EmployeeFilter::from_params(&params)?;

    let rows = EmployeeRepo::new(&state.pool).list(&filter, page).await?;
    Ok(Json(rows.into_iter().map(EmployeeResponse::from).collect()))
}

/// POST /employees - create a new employee
async fn create_employee(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<EmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), ApiError> {
    let draft = req.into_draft()?;
    draft.validate_for_create()?;

    let employee = EmployeeRepo::new(&state.pool).create(&draft).await?;
    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(employee))))
}

/// GET /employees/{id} - get a single employee
async fn get_employee(
    State(state): State<Arc<AppState>>,
    PathEmployeeId(id): PathEmployeeId,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let employee = EmployeeRepo::new(&state.pool).get(id).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// PUT /employees/{id} - replace every field of an employee
async fn update_employee(
    State(state): State<Arc<AppState>>,
    PathEmployeeId(id): PathEmployeeId,
    ValidJson(req): ValidJson<EmployeeRequest>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let draft = req.into_draft()?;
    let employee = EmployeeRepo::new(&state.pool).update(id, &draft).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// PUT /employees?id={id} - same as above, id in the query string
async fn update_employee_by_query(
    State(state): State<Arc<AppState>>,
    QueryEmployeeId(id): QueryEmployeeId,
    ValidJson(req): ValidJson<EmployeeRequest>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let draft = req.into_draft()?;
    let employee = EmployeeRepo::new(&state.pool).update(id, &draft).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// DELETE /employees/{id} - hard delete, returns the removed record
async fn delete_employee(
    State(state): State<Arc<AppState>>,
    PathEmployeeId(id): PathEmployeeId,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let employee = EmployeeRepo::new(&state.pool).delete(id).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// PATCH /employees/{id}/status - toggle active/inactive
async fn toggle_status(
    State(state): State<Arc<AppState>>,
    PathEmployeeId(id): PathEmployeeId,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let employee = EmployeeRepo::new(&state.pool).toggle_status(id).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// Employee routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/employees",
            get(list_employees)
                .post(create_employee)
                .put(update_employee_by_query),
        )
        .route(
            "/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route("/employees/{id}/status", patch(toggle_status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use axum::response::Response;
    use tower::ServiceExt;

    use crate::db::{create_lazy_pool, PoolSettings};
    use crate::http::server::{build_router, ServerConfig};

    // The pool never connects: every request below is rejected before
    // reaching the database.
    fn app() -> Router {
        let pool = create_lazy_pool("postgres://localhost/staffctl_test", &PoolSettings::default())
            .expect("lazy pool");
        build_router(AppState { pool }, &ServerConfig::default())
    }

    async fn error_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn send(method: Method, uri: &str, body: Option<&str>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_owned())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        app().oneshot(request).await.unwrap()
    }

    async fn message(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["message"].as_str().unwrap_or_default().to_owned()
    }

    #[test]
    fn request_defaults_to_empty_strings() {
        let req: EmployeeRequest =
            serde_json::from_str(r#"{"fecha_ingreso": "2024-01-10"}"#).unwrap();
        let draft = req.into_draft().unwrap();
        assert_eq!(draft.name, "");
        assert_eq!(draft.document_number, "");
        assert!(!draft.registered);
        assert_eq!(draft.status, None);
        assert!(draft.validate_for_create().is_ok());
    }

    #[test]
    fn request_ignores_server_assigned_fields() {
        let req: EmployeeRequest = serde_json::from_str(
            r#"{"id": 4, "fecha_creacion": "2024-01-01T00:00:00Z", "nombre": "Ana",
                "tipo_documento": "CC", "estado": "Activo", "registro": true,
                "fecha_ingreso": "2024-01-10", "fecha_retiro": null}"#,
        )
        .unwrap();
        let draft = req.into_draft().unwrap();
        assert_eq!(draft.name, "Ana");
        assert_eq!(draft.document_type, Some(DocumentType::NationalId));
        assert_eq!(draft.status, Some(EmployeeStatus::Active));
        assert!(draft.registered);
        assert_eq!(draft.termination_date, None);
    }

    #[test]
    fn response_formats_dates() {
        use chrono::{NaiveDate, TimeZone, Utc};

        let employee = Employee {
            id: 7,
            name: "Ana".into(),
            document_type: "CC".into(),
            document_number: "1020".into(),
            work_center: "Oficina".into(),
            employee_type: "Planta".into(),
            registered: true,
            status: "Activo".into(),
            hire_date: NaiveDate::from_ymd_opt(2023, 2, 1),
            termination_date: None,
            position: "Gerente".into(),
            notes: String::new(),
            created_at: Utc.with_ymd_and_hms(2023, 2, 1, 8, 0, 0).unwrap(),
        };
        let response = EmployeeResponse::from(employee);
        assert_eq!(response.fecha_ingreso.as_deref(), Some("2023-02-01"));
        assert_eq!(response.fecha_retiro, None);
        assert_eq!(response.fecha_creacion, "2023-02-01T08:00:00+00:00");
    }

    #[tokio::test]
    async fn unsupported_method_is_405_with_allow() {
        let response = send(Method::DELETE, "/employees", None).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let allow = response
            .headers()
            .get(header::ALLOW)
            .expect("Allow header")
            .to_str()
            .unwrap()
            .to_owned();
        for method in ["GET", "POST", "PUT"] {
            assert!(allow.contains(method), "Allow: {}", allow);
        }
        assert!(!allow.contains("DELETE"));
    }

    #[tokio::test]
    async fn post_on_item_is_405() {
        let response = send(Method::POST, "/employees/3", Some("{}")).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(response.headers().contains_key(header::ALLOW));
    }

    #[tokio::test]
    async fn non_numeric_path_id_is_400() {
        for (method, uri) in [
            (Method::GET, "/employees/abc"),
            (Method::DELETE, "/employees/abc"),
            (Method::PATCH, "/employees/x1/status"),
        ] {
            let response = send(method, uri, None).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }

    #[tokio::test]
    async fn put_without_query_id_is_400() {
        let response = send(Method::PUT, "/employees", Some("{}")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(message(response).await, "id is required");
    }

    #[tokio::test]
    async fn create_without_hire_date_is_400() {
        let response = send(Method::POST, "/employees", Some(r#"{"nombre": "Ana"}"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(message(response).await, "fecha_ingreso is required");

        let response = send(
            Method::POST,
            "/employees",
            Some(r#"{"nombre": "Ana", "fecha_ingreso": ""}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_rejects_termination_before_hire() {
        let response = send(
            Method::POST,
            "/employees",
            Some(r#"{"fecha_ingreso": "2024-05-01", "fecha_retiro": "2024-01-01"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_rejects_unknown_position() {
        let response = send(
            Method::POST,
            "/employees",
            Some(r#"{"fecha_ingreso": "2024-05-01", "cargo": "Director"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(message(response).await, "invalid cargo value: 'Director'");
    }

    #[tokio::test]
    async fn list_rejects_bad_pagination() {
        let response = send(Method::GET, "/employees?page=abc&limit=10", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(Method::GET, "/employees?page=1&limit=0", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(Method::GET, "/employees?page=1&limit=500", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(message(response).await, "limit must be at most 100");
    }

    #[tokio::test]
    async fn mistyped_body_field_is_400_json() {
        for body in [r#"{"registro": "true"}"#, r#"{"fecha_ingreso": 20240101}"#] {
            for (method, uri) in [
                (Method::POST, "/employees"),
                (Method::PUT, "/employees/1"),
                (Method::PUT, "/employees?id=1"),
            ] {
                let response = send(method, uri, Some(body)).await;
                assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{} {}", uri, body);

                let json = error_body(response).await;
                assert_eq!(json["error"], "validation_error");
                assert_eq!(json["message"], "body: a field has the wrong type");
            }
        }
    }

    #[tokio::test]
    async fn body_without_content_type_is_400_json() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/employees")
            .body(Body::from(r#"{"fecha_ingreso": "2024-01-10"}"#))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = error_body(response).await;
        assert_eq!(json["error"], "validation_error");
        assert_eq!(json["message"], "body: expected Content-Type: application/json");
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let response = send(Method::POST, "/employees", Some("{\"nombre\": ")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(message(response).await, "body: malformed JSON");
    }

    #[tokio::test]
    async fn list_rejects_unknown_filter_value() {
        let response = send(Method::GET, "/employees?estado=Suspendido", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
