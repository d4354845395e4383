use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use business::domain::errors::GatewayError;
use business::domain::shared::value_objects::AccountId;

use crate::credentials::Credentials;

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Shared storefront API HTTP client configuration.
#[derive(Clone)]
pub struct ApiClient {
    pub client: Client,
    pub base_url: String,
    pub credentials: Credentials,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds the authorization header value for the signed-in account.
    pub fn auth_header(&self, account_id: &AccountId) -> Result<String, GatewayError> {
        let token = self.credentials.token_for(account_id)?;
        Ok(format!("Bearer {}", token))
    }

    /// Sends the request; non-2xx statuses become gateway errors.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, GatewayError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("Storefront API unreachable: {}", e);
            GatewayError::Unavailable
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!("Storefront API answered {}: {}", status, body);
        Err(error_for_status(status, &body))
    }

    /// Reads a JSON body; anything that does not match `T` is a malformed row.
    pub async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, GatewayError> {
        let body = response.text().await.map_err(|e| {
            tracing::warn!("Storefront API body unreadable: {}", e);
            GatewayError::Unavailable
        })?;
        serde_json::from_str(&body).map_err(|e| GatewayError::MalformedRow(e.to_string()))
    }
}

/// Base URL of the Supabase REST (PostgREST) interface of a project.
pub fn postgrest_url(supabase_url: &str) -> String {
    format!("{}/rest/v1", supabase_url.trim_end_matches('/'))
}

pub fn error_for_status(status: StatusCode, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|error| error.message)
        .unwrap_or_else(|_| status.to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Unauthorized,
        StatusCode::NOT_FOUND => GatewayError::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            GatewayError::Rejected(message)
        }
        _ => GatewayError::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_auth_statuses_to_unauthorized() {
        assert_eq!(
            error_for_status(StatusCode::UNAUTHORIZED, ""),
            GatewayError::Unauthorized
        );
        assert_eq!(
            error_for_status(StatusCode::FORBIDDEN, ""),
            GatewayError::Unauthorized
        );
    }

    #[test]
    fn should_keep_server_message_on_rejection() {
        let body = r#"{"name":"ValidationError","message":"cart_item.quantity_not_positive"}"#;

        assert_eq!(
            error_for_status(StatusCode::BAD_REQUEST, body),
            GatewayError::Rejected("cart_item.quantity_not_positive".to_string())
        );
    }

    #[test]
    fn should_treat_server_errors_as_unavailable() {
        assert_eq!(
            error_for_status(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            GatewayError::Unavailable
        );
        assert_eq!(
            error_for_status(StatusCode::NOT_FOUND, ""),
            GatewayError::NotFound
        );
    }

    #[test]
    fn should_point_postgrest_url_at_rest_root() {
        assert_eq!(
            postgrest_url("https://project.supabase.co/"),
            "https://project.supabase.co/rest/v1"
        );
    }

    #[test]
    fn should_strip_trailing_slash_from_base_url() {
        let client = ApiClient::new("http://localhost:8080/", Credentials::new());

        assert_eq!(client.url("/cart-items"), "http://localhost:8080/cart-items");
    }
}
