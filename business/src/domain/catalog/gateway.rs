use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::GatewayError;

use super::model::{House, HouseColor, HouseSize};

/// Read-only view of the product catalog.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Newest first.
    async fn houses(&self) -> Result<Vec<House>, GatewayError>;

    async fn house(&self, id: Uuid) -> Result<Option<House>, GatewayError>;

    /// Oldest first; the first one is the default pick.
    async fn colors(&self) -> Result<Vec<HouseColor>, GatewayError>;

    /// Oldest first; the first one is the default pick.
    async fn sizes(&self) -> Result<Vec<HouseSize>, GatewayError>;
}
