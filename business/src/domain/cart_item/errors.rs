use crate::domain::cart::errors::CartLineError;

#[derive(Debug, thiserror::Error)]
pub enum CartItemError {
    #[error("cart_item.invalid")]
    Invalid(#[from] CartLineError),
    #[error("cart_item.not_found")]
    NotFound,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
