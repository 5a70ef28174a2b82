//! Custom Axum extractors
//!
//! Every rejection becomes an [`ApiError`], so malformed ids and bodies get
//! the same 400 JSON shape as domain validation failures.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::ApiError;
use crate::models::{EmployeeId, ValidationError};

/// Extract and validate an employee id from the path (`/employees/{id}`)
pub struct PathEmployeeId(pub EmployeeId);

impl<S> FromRequestParts<S> for PathEmployeeId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        Ok(Self(EmployeeId::parse(&id)?))
    }
}

#[derive(Deserialize)]
struct IdQuery {
    id: Option<String>,
}

/// Extract and validate an employee id from the query string (`?id=`)
pub struct QueryEmployeeId(pub EmployeeId);

impl<S> FromRequestParts<S> for QueryEmployeeId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query): Query<IdQuery> = Query::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                ApiError::Validation(ValidationError::InvalidFormat {
                    field: "id",
                    reason: "malformed query string",
                })
            })?;

        let raw = query.id.unwrap_or_default();
        Ok(Self(EmployeeId::parse(&raw)?))
    }
}

/// JSON request body; any rejection is a 400 on field `body`
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(body_rejection)?;
        Ok(Self(value))
    }
}

fn body_rejection(rejection: JsonRejection) -> ApiError {
    tracing::debug!(detail = %rejection.body_text(), "Rejected request body");

    let reason = match rejection {
        JsonRejection::JsonDataError(_) => "a field has the wrong type",
        JsonRejection::JsonSyntaxError(_) => "malformed JSON",
        JsonRejection::MissingJsonContentType(_) => "expected Content-Type: application/json",
        _ => "unreadable request body",
    };
    ApiError::Validation(ValidationError::InvalidFormat {
        field: "body",
        reason,
    })
}
