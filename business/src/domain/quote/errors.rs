use crate::domain::catalog::errors::CatalogError;
use crate::domain::errors::GatewayError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuoteError {
    #[error("quote.catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("quote.gateway")]
    Gateway(#[from] GatewayError),
}
