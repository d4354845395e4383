use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use business::domain::errors::GatewayError;
use business::domain::shared::value_objects::AccountId;

/// An authenticated identity-provider session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub account_id: AccountId,
    pub email: Option<String>,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

/// Session shared between the auth provider and the gateways.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    inner: Arc<RwLock<Option<AuthSession>>>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<AuthSession> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set(&self, session: Option<AuthSession>) {
        match self.inner.write() {
            Ok(mut guard) => *guard = session,
            Err(poisoned) => *poisoned.into_inner() = session,
        }
    }

    pub fn account_id(&self) -> Option<AccountId> {
        self.get().map(|session| session.account_id)
    }

    /// Access token of `account_id`; a missing or foreign session is unauthorized.
    pub fn token_for(&self, account_id: &AccountId) -> Result<String, GatewayError> {
        match self.get() {
            Some(session) if &session.account_id == account_id => Ok(session.access_token),
            _ => Err(GatewayError::Unauthorized),
        }
    }
}
