use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::cart_item::errors::CartItemError;
use business::domain::errors::RepositoryError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for CartItemError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            CartItemError::Invalid(e) => {
                (StatusCode::BAD_REQUEST, "ValidationError", e.to_string())
            }
            CartItemError::NotFound | CartItemError::Repository(RepositoryError::NotFound) => (
                StatusCode::NOT_FOUND,
                "NotFound",
                "cart_item.not_found".to_string(),
            ),
            CartItemError::Repository(e) => {
                tracing::error!("Cart item repository failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError",
                    e.to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                name: name.to_string(),
                message,
            }),
        )
    }
}
