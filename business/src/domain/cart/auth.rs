use tokio::sync::broadcast;

use super::session::AuthEvent;
use crate::domain::shared::value_objects::AccountId;

/// Port onto the external identity provider.
pub trait AuthProvider: Send + Sync {
    /// Account of the active session, if any.
    fn current_account(&self) -> Option<AccountId>;

    /// Stream of sign-in/sign-out transitions.
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}
