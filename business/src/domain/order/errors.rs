#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("order.quantity_not_positive")]
    QuantityNotPositive,
    #[error("order.negative_total")]
    NegativeTotal,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
