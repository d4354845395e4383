use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use once_cell::sync::OnceCell;
use poem::Request;
use poem_openapi::SecurityScheme;
use serde::Deserialize;

use business::domain::shared::value_objects::AccountId;

use crate::config::auth_config::AuthConfig;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct SupabaseClaims {
    sub: String,
    aud: String,
    exp: u64,
    email: Option<String>,
    role: Option<String>,
}

static AUTH_CONFIG: OnceCell<AuthConfig> = OnceCell::new();

/// Makes the token settings available to the bearer checker. Only the first
/// call has an effect.
pub fn install(config: AuthConfig) {
    if AUTH_CONFIG.set(config).is_err() {
        tracing::warn!("Auth configuration already installed, keeping the first one");
    }
}

/// Validates signature, audience and expiry, and returns the account (`sub`).
pub fn verify_token(token: &str, config: &AuthConfig) -> Result<AccountId, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[&config.audience]);
    validation.validate_exp = true;

    let token_data = decode::<SupabaseClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| format!("auth.token_validation_failed: {e}"))?;

    if token_data.claims.sub.trim().is_empty() {
        return Err("auth.missing_subject".to_string());
    }

    Ok(AccountId::new(token_data.claims.sub))
}

/// Identity-provider access token; resolves to the caller's account.
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    bearer_format = "JWT",
    checker = "supabase_bearer_checker"
)]
pub struct SupabaseBearer(pub AccountId);

async fn supabase_bearer_checker(
    _req: &Request,
    bearer: poem_openapi::auth::Bearer,
) -> Option<AccountId> {
    let Some(config) = AUTH_CONFIG.get() else {
        tracing::error!("Auth configuration missing, rejecting request");
        return None;
    };

    match verify_token(&bearer.token, config) {
        Ok(account_id) => Some(account_id),
        Err(e) => {
            tracing::warn!("Supabase auth failed: {e}");
            None
        }
    }
}
