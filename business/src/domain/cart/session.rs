use crate::domain::shared::value_objects::AccountId;

/// Who currently owns the cart. Exactly one is active at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    /// The cart lives only in local storage.
    #[default]
    Anonymous,
    /// The cart lives in the remote table; local storage is not used.
    Authenticated(AccountId),
}

impl Session {
    pub fn account(&self) -> Option<&AccountId> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(account_id) => Some(account_id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }
}

/// Transitions published by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(AccountId),
    SignedOut,
}

/// What happens to the anonymous cart when a visitor signs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignInPolicy {
    /// The remote cart wins and the local lines are dropped.
    #[default]
    DiscardLocal,
    /// Local lines are added to the remote cart (merging equal configurations)
    /// before it is loaded.
    MergeLocal,
}
