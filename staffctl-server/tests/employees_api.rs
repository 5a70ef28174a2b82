//! End-to-end API tests against a real PostgreSQL database.
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p staffctl-server -- --ignored
//!
//! The scenarios share one table and truncate it, so they run sequentially
//! inside a single test.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use staffctl_server::db::{create_pool, migrations};
use staffctl_server::http::{build_router, AppState, ServerConfig};

async fn setup() -> (Router, PgPool) {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool(&url).await.expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");
    sqlx::query("TRUNCATE empleados RESTART IDENTITY")
        .execute(&pool)
        .await
        .expect("truncate failed");

    let app = build_router(AppState { pool: pool.clone() }, &ServerConfig::default());
    (app, pool)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn call_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = call(app, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn row_count(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM empleados")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

fn sample(name: &str, document: &str, registered: bool) -> Value {
    json!({
        "nombre": name,
        "tipo_documento": "CC",
        "documento": document,
        "centro_trabajo": "Oficina",
        "tipo_empleado": "Planta",
        "registro": registered,
        "estado": "Activo",
        "fecha_ingreso": "2024-01-15",
        "fecha_retiro": null,
        "cargo": "Operario",
        "novedades": "sin novedades"
    })
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, created) = call_json(app, Method::POST, "/employees", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    created
}

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .expect("array")
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
#[ignore = "requires database"]
async fn employee_api_scenarios() {
    let (app, pool) = setup().await;

    empty_table_lists_nothing(&app).await;
    create_requires_hire_date(&app, &pool).await;
    create_then_fetch(&app).await;
    update_missing_is_404(&app, &pool).await;
    update_replaces_every_field(&app).await;
    toggle_flips_status(&app).await;
    registration_filter(&app).await;
    search_and_pagination(&app).await;
    export_matches_filter(&app).await;
    delete_removes_row(&app).await;
}

async fn empty_table_lists_nothing(app: &Router) {
    let (status, body) = call_json(app, Method::GET, "/employees?page=1&limit=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

async fn create_requires_hire_date(app: &Router, pool: &PgPool) {
    let mut body = sample("Sin Fecha", "0001", false);
    body["fecha_ingreso"] = Value::Null;

    let (status, _) = call_json(app, Method::POST, "/employees", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(row_count(pool).await, 0);
}

async fn create_then_fetch(app: &Router) {
    let input = sample("Ana Gómez", "1001", true);
    let created = create(app, input.clone()).await;

    let id = created["id"].as_i64().unwrap();
    assert!(id > 0);
    assert!(!created["fecha_creacion"].as_str().unwrap().is_empty());

    let (status, fetched) = call_json(app, Method::GET, &format!("/employees/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    for field in [
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
    ] {
        assert_eq!(fetched[field], input[field], "field {}", field);
    }
}

async fn update_missing_is_404(app: &Router, pool: &PgPool) {
    let before = row_count(pool).await;
    let body = sample("Nadie", "0000", false);

    let (status, _) = call_json(app, Method::PUT, "/employees/999999", Some(body.clone())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call_json(app, Method::PUT, "/employees?id=999999", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(row_count(pool).await, before);
}

async fn update_replaces_every_field(app: &Router) {
    let created = create(app, sample("Luis Pérez", "2002", false)).await;
    let id = created["id"].as_i64().unwrap();

    // Full replace: omitted fields are reset, not merged.
    let replacement = json!({
        "nombre": "Luis A. Pérez",
        "fecha_ingreso": "2024-02-01",
        "fecha_retiro": "2024-12-31",
        "registro": true
    });
    let (status, updated) = call_json(
        app,
        Method::PUT,
        &format!("/employees?id={}", id),
        Some(replacement),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["nombre"], "Luis A. Pérez");
    assert_eq!(updated["documento"], "");
    assert_eq!(updated["cargo"], "");
    assert_eq!(updated["fecha_retiro"], "2024-12-31");
    assert_eq!(updated["registro"], true);
    assert_eq!(updated["fecha_creacion"], created["fecha_creacion"]);
}

async fn toggle_flips_status(app: &Router) {
    let created = create(app, sample("Marta Ruiz", "3003", true)).await;
    let uri = format!("/employees/{}/status", created["id"]);

    let (status, toggled) = call_json(app, Method::PATCH, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["estado"], "Inactivo");

    let (_, toggled) = call_json(app, Method::PATCH, &uri, None).await;
    assert_eq!(toggled["estado"], "Activo");

    let (status, _) = call_json(app, Method::PATCH, "/employees/999999/status", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

async fn registration_filter(app: &Router) {
    create(app, sample("Pedro Sin Registro", "4004", false)).await;

    let (_, all) = call_json(app, Method::GET, "/employees?limit=100", None).await;
    let all = all.as_array().unwrap().clone();
    assert!(all.iter().any(|e| e["registro"] == true));
    assert!(all.iter().any(|e| e["registro"] == false));

    let (_, registered) =
        call_json(app, Method::GET, "/employees?limit=100&registro=registrado", None).await;
    let registered = registered.as_array().unwrap();
    assert!(!registered.is_empty());
    assert!(registered.iter().all(|e| e["registro"] == true));

    let (_, unregistered) =
        call_json(app, Method::GET, "/employees?limit=100&registro=no_registrado", None).await;
    let unregistered = unregistered.as_array().unwrap();
    assert!(!unregistered.is_empty());
    assert!(unregistered.iter().all(|e| e["registro"] == false));

    assert_eq!(registered.len() + unregistered.len(), all.len());

    let (_, unfiltered) = call_json(app, Method::GET, "/employees?limit=100&registro=", None).await;
    assert_eq!(unfiltered.as_array().unwrap().len(), all.len());
}

async fn search_and_pagination(app: &Router) {
    for i in 0..3 {
        create(app, sample(&format!("Zoe Paginada {}", i), &format!("ZP-{}", i), false)).await;
    }

    // Case-insensitive on name
    let (_, found) = call_json(app, Method::GET, "/employees?search=zoe%20PAGINADA&limit=100", None).await;
    assert_eq!(found.as_array().unwrap().len(), 3);

    // Matches document number too
    let (_, found) = call_json(app, Method::GET, "/employees?search=zp-1", None).await;
    assert_eq!(found.as_array().unwrap().len(), 1);

    let (_, page1) = call_json(app, Method::GET, "/employees?search=Paginada&page=1&limit=2", None).await;
    let (_, page2) = call_json(app, Method::GET, "/employees?search=Paginada&page=2&limit=2", None).await;
    let (page1, page2) = (ids(&page1), ids(&page2));
    assert_eq!(page1.len(), 2);
    assert_eq!(page2.len(), 1);
    assert!(page1[0] < page1[1] && page1[1] < page2[0]);
}

async fn export_matches_filter(app: &Router) {
    let (status, bytes) = call(app, Method::GET, "/employees/export?search=Paginada", None).await;
    assert_eq!(status, StatusCode::OK);

    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("id,nombre,"));
    assert_eq!(lines.len(), 4);

    let (status, bytes) = call(app, Method::GET, "/employees/export?search=Paginada&format=xlsx", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&bytes[..2], b"PK");

    let (status, bytes) = call(app, Method::GET, "/employees/export?search=Paginada&format=pdf", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.starts_with(b"%PDF-"));
}

async fn delete_removes_row(app: &Router) {
    let created = create(app, sample("Para Borrar", "9009", false)).await;
    let uri = format!("/employees/{}", created["id"]);

    let (status, deleted) = call_json(app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], created["id"]);

    let (status, _) = call_json(app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call_json(app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
