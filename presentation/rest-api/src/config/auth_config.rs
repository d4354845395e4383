use anyhow::Context;
use std::env;

pub const DEFAULT_AUDIENCE: &str = "authenticated";

/// Verification settings for identity-provider access tokens.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub audience: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"***")
            .field("audience", &self.audience)
            .finish()
    }
}

impl AuthConfig {
    /// Environment variables:
    /// - SUPABASE_JWT_SECRET: HS256 signing secret of the project (required)
    /// - SUPABASE_JWT_AUDIENCE: expected `aud` claim (default: "authenticated")
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret =
            env::var("SUPABASE_JWT_SECRET").context("SUPABASE_JWT_SECRET must be set")?;
        let audience =
            env::var("SUPABASE_JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.to_string());

        Ok(Self {
            jwt_secret,
            audience,
        })
    }
}
