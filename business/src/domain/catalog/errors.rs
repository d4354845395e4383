use uuid::Uuid;

use crate::domain::errors::GatewayError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog.house_not_found: {0}")]
    HouseNotFound(Uuid),
    #[error("catalog.color_not_found: {0}")]
    ColorNotFound(Uuid),
    #[error("catalog.size_not_found: {0}")]
    SizeNotFound(Uuid),
    #[error("catalog.gateway")]
    Gateway(#[from] GatewayError),
}
