use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::catalog::errors::CatalogError;
use crate::domain::catalog::gateway::CatalogGateway;
use crate::domain::catalog::model::Configuration;
use crate::domain::catalog::use_cases::configure::{ConfigureHouseParams, ConfigureHouseUseCase};
use crate::domain::logger::Logger;

pub struct ConfigureHouseUseCaseImpl {
    pub catalog: Arc<dyn CatalogGateway>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ConfigureHouseUseCase for ConfigureHouseUseCaseImpl {
    async fn execute(&self, params: ConfigureHouseParams) -> Result<Configuration, CatalogError> {
        let house = self
            .catalog
            .house(params.house_id)
            .await?
            .ok_or(CatalogError::HouseNotFound(params.house_id))?;

        let colors = self.catalog.colors().await?;
        let color = match params.color_id {
            Some(id) => Some(
                colors
                    .into_iter()
                    .find(|color| color.id == id)
                    .ok_or(CatalogError::ColorNotFound(id))?,
            ),
            None => colors.into_iter().next(),
        };

        let sizes = self.catalog.sizes().await?;
        let size = match params.size_id {
            Some(id) => Some(
                sizes
                    .into_iter()
                    .find(|size| size.id == id)
                    .ok_or(CatalogError::SizeNotFound(id))?,
            ),
            None => sizes.into_iter().next(),
        };

        let configuration = Configuration { house, color, size };
        self.logger.debug(&format!(
            "Configured {} at {}",
            configuration.house.name,
            configuration.unit_price()
        ));
        Ok(configuration)
    }
}
