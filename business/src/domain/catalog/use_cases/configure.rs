use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::catalog::errors::CatalogError;
use crate::domain::catalog::model::Configuration;

/// Color and size are optional; leaving one out picks the catalog default.
pub struct ConfigureHouseParams {
    pub house_id: Uuid,
    pub color_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
}

#[async_trait]
pub trait ConfigureHouseUseCase: Send + Sync {
    async fn execute(&self, params: ConfigureHouseParams) -> Result<Configuration, CatalogError>;
}
