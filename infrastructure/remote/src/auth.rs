use chrono::{Duration, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use business::domain::cart::auth::AuthProvider;
use business::domain::cart::session::AuthEvent;
use business::domain::shared::value_objects::AccountId;

use crate::credentials::{AuthSession, Credentials};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AuthError {
    #[error("auth.invalid_credentials")]
    InvalidCredentials,
    #[error("auth.rejected: {0}")]
    Rejected(String),
    #[error("auth.unavailable")]
    Unavailable,
    #[error("auth.malformed_response")]
    MalformedResponse,
}

pub struct SignUpParams {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    data: ProfileMetadata<'a>,
}

#[derive(Serialize)]
struct ProfileMetadata<'a> {
    first_name: &'a str,
    last_name: &'a str,
    phone: Option<&'a str>,
    role: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    user: TokenUser,
}

#[derive(Deserialize)]
struct TokenUser {
    id: String,
    email: Option<String>,
}

#[derive(Deserialize)]
struct GoTrueError {
    #[serde(alias = "error_description", alias = "message")]
    msg: Option<String>,
}

/// Password sign-in against a Supabase GoTrue endpoint.
///
/// The session lives in the shared `Credentials`, so the gateways pick up the
/// new access token as soon as a sign-in completes.
pub struct SupabaseAuthProvider {
    client: Client,
    auth_url: String,
    anon_key: String,
    credentials: Credentials,
    events: broadcast::Sender<AuthEvent>,
}

impl SupabaseAuthProvider {
    pub fn new(supabase_url: &str, anon_key: impl Into<String>, credentials: Credentials) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        let (events, _) = broadcast::channel(16);

        Self {
            client,
            auth_url: format!("{}/auth/v1", supabase_url.trim_end_matches('/')),
            anon_key: anon_key.into(),
            credentials,
            events,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let response = self
            .client
            .post(format!("{}/token?grant_type=password", self.auth_url))
            .header("apikey", &self.anon_key)
            .json(&PasswordGrant { email, password })
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Identity provider unreachable: {}", e);
                AuthError::Unavailable
            })?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(Self::rejection(status, response).await);
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|_| AuthError::MalformedResponse)?;
        let session = AuthSession {
            account_id: AccountId::new(token.user.id),
            email: token.user.email,
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: token
                .expires_in
                .map(|seconds| Utc::now() + Duration::seconds(seconds)),
        };

        self.credentials.set(Some(session.clone()));
        tracing::info!("Signed in as {}", session.account_id);
        self.publish(AuthEvent::SignedIn(session.account_id.clone()));
        Ok(session)
    }

    /// Registers the account with its profile metadata, then signs in.
    pub async fn sign_up(&self, params: SignUpParams) -> Result<AuthSession, AuthError> {
        let body = SignUpBody {
            email: &params.email,
            password: &params.password,
            data: ProfileMetadata {
                first_name: &params.first_name,
                last_name: &params.last_name,
                phone: params.phone.as_deref(),
                role: "user",
            },
        };

        let response = self
            .client
            .post(format!("{}/signup", self.auth_url))
            .header("apikey", &self.anon_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Identity provider unreachable: {}", e);
                AuthError::Unavailable
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::rejection(status, response).await);
        }

        self.sign_in_with_password(&params.email, &params.password)
            .await
    }

    /// Always ends the local session; the remote logout is best effort.
    pub async fn sign_out(&self) {
        if let Some(session) = self.credentials.get() {
            let result = self
                .client
                .post(format!("{}/logout", self.auth_url))
                .header("apikey", &self.anon_key)
                .bearer_auth(&session.access_token)
                .send()
                .await;
            if let Err(e) = result {
                tracing::warn!("Remote logout failed: {}", e);
            }
        }

        self.credentials.set(None);
        tracing::info!("Signed out");
        self.publish(AuthEvent::SignedOut);
    }

    /// Reinstates a persisted session without announcing a transition.
    pub fn restore(&self, session: AuthSession) {
        self.credentials.set(Some(session));
    }

    fn publish(&self, event: AuthEvent) {
        // No subscriber yet is fine
        let _ = self.events.send(event);
    }

    async fn rejection(status: StatusCode, response: reqwest::Response) -> AuthError {
        if status.is_server_error() {
            return AuthError::Unavailable;
        }
        let message = response
            .json::<GoTrueError>()
            .await
            .ok()
            .and_then(|error| error.msg)
            .unwrap_or_else(|| status.to_string());
        AuthError::Rejected(message)
    }
}

impl AuthProvider for SupabaseAuthProvider {
    fn current_account(&self) -> Option<AccountId> {
        self.credentials.account_id()
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}
