/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.not_found")]
    NotFound,
    #[error("repository.persistence")]
    Persistence,
    #[error("repository.malformed_row")]
    MalformedRow,
    #[error("repository.database_error")]
    DatabaseError,
}

impl RepositoryError {
    pub fn not_found() -> Self {
        RepositoryError::NotFound
    }
    pub fn persistence() -> Self {
        RepositoryError::Persistence
    }
    pub fn malformed_row() -> Self {
        RepositoryError::MalformedRow
    }
    pub fn database_error() -> Self {
        RepositoryError::DatabaseError
    }
}

/// Errors raised by the remote table gateway as seen from the client.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway.unavailable")]
    Unavailable,
    #[error("gateway.unauthorized")]
    Unauthorized,
    #[error("gateway.not_found")]
    NotFound,
    #[error("gateway.malformed_row: {0}")]
    MalformedRow(String),
    #[error("gateway.rejected: {0}")]
    Rejected(String),
}

/// Errors raised by the local session store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage.unavailable")]
    Unavailable,
    #[error("storage.io: {0}")]
    Io(String),
}
