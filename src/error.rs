use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::store::StoreError;

/// Errors surfaced by the HTTP layer. Each variant maps to one fixed status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    DuplicateRecord(&'static str),
    #[error("ingestion date must be a past date formatted as YYYY-MM-DD")]
    InvalidDate,
    #[error("{0}")]
    NotFound(&'static str),
    #[error("invalid payroll identifier or password")]
    AuthenticationFailed,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::DuplicateRecord(_) | ApiError::InvalidDate => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Only reached when a service has no more specific mapping for the failure.
impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate => ApiError::DuplicateRecord("record already exists"),
            StoreError::MissingEmployee => ApiError::NotFound("employee not found"),
            StoreError::Database(e) => ApiError::Internal(anyhow::Error::new(e)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_are_fixed_per_variant() {
        assert_eq!(
            ApiError::DuplicateRecord("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::InvalidDate.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::AuthenticationFailed.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn internal_details_are_not_leaked() {
        let resp = ApiError::Internal(anyhow::anyhow!("connection refused")).into_response();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "internal server error");
    }

    #[test]
    fn store_errors_convert() {
        assert!(matches!(
            ApiError::from(StoreError::MissingEmployee),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(StoreError::Duplicate),
            ApiError::DuplicateRecord(_)
        ));
    }
}
