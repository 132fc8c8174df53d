use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ProductApiResponse;

/// Error surface shared by every endpoint family.
///
/// `Validation` and `InvalidId` are rejected before any transaction opens;
/// `NotFound` means the identifier resolves to no live row; everything that
/// goes wrong inside the store surfaces as `Storage`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage(e) = &self {
            eprintln!("storage error: {}", e);
        }

        let body = Json(ProductApiResponse::<()>::failure(self.to_string()));
        (self.status_code(), body).into_response()
    }
}

/// Same taxonomy, `/api/inventory` wire shape: the failure body is
/// `{success, error}` with no `data` key.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct InventoryError(#[from] pub ApiError);

impl InventoryError {
    fn body(&self) -> serde_json::Value {
        serde_json::json!({
            "success": false,
            "error": self.0.to_string(),
        })
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        if let ApiError::Storage(e) = &self.0 {
            eprintln!("storage error: {}", e);
        }

        (self.0.status_code(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_are_distinct_per_variant() {
        assert_eq!(
            ApiError::Validation("name missing".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidId("xyz".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound("product").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Storage(sqlx::Error::PoolClosed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_names_the_entity() {
        assert_eq!(ApiError::NotFound("product").to_string(), "product not found");
    }

    #[test]
    fn inventory_failure_body_has_no_data_key() {
        let err = InventoryError(ApiError::NotFound("medicine"));
        assert_eq!(
            err.body(),
            serde_json::json!({"success": false, "error": "medicine not found"})
        );

        // The products family keeps the explicit null.
        let products = serde_json::to_value(ProductApiResponse::<()>::failure(
            "medicine not found".into(),
        ))
        .unwrap();
        assert_eq!(
            products,
            serde_json::json!({"success": false, "data": null, "error": "medicine not found"})
        );
    }
}
