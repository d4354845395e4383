use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::order::errors::OrderError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for OrderError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = match &self {
            OrderError::QuantityNotPositive | OrderError::NegativeTotal => {
                (StatusCode::BAD_REQUEST, "ValidationError")
            }
            OrderError::Repository(e) => {
                tracing::error!("Order repository failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalError")
            }
        };

        (
            status,
            Json(ErrorResponse {
                name: name.to_string(),
                message: self.to_string(),
            }),
        )
    }
}
