use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::catalog::errors::CatalogError;
use crate::domain::catalog::gateway::CatalogGateway;
use crate::domain::catalog::model::Catalog;
use crate::domain::catalog::use_cases::get::GetCatalogUseCase;
use crate::domain::logger::Logger;

pub struct GetCatalogUseCaseImpl {
    pub catalog: Arc<dyn CatalogGateway>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetCatalogUseCase for GetCatalogUseCaseImpl {
    async fn execute(&self) -> Result<Catalog, CatalogError> {
        let catalog = Catalog {
            houses: self.catalog.houses().await?,
            colors: self.catalog.colors().await?,
            sizes: self.catalog.sizes().await?,
        };
        self.logger.info(&format!(
            "Catalog holds {} houses, {} colors, {} sizes",
            catalog.houses.len(),
            catalog.colors.len(),
            catalog.sizes.len()
        ));
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::model::{House, HouseColor, HouseSize};
    use crate::domain::errors::GatewayError;
    use mockall::mock;
    use uuid::Uuid;

    mock! {
        pub CatalogGw {}

        #[async_trait]
        impl CatalogGateway for CatalogGw {
            async fn houses(&self) -> Result<Vec<House>, GatewayError>;
            async fn house(&self, id: Uuid) -> Result<Option<House>, GatewayError>;
            async fn colors(&self) -> Result<Vec<HouseColor>, GatewayError>;
            async fn sizes(&self) -> Result<Vec<HouseSize>, GatewayError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    #[tokio::test]
    async fn should_gather_houses_colors_and_sizes() {
        let house = House {
            id: Uuid::new_v4(),
            name: "Studio 20".to_string(),
            short_description: String::new(),
            base_price: 4_500_000,
            images: vec![],
            category: "vacation".to_string(),
        };
        let mut catalog = MockCatalogGw::new();
        let listed = house.clone();
        catalog
            .expect_houses()
            .returning(move || Ok(vec![listed.clone()]));
        catalog.expect_colors().returning(|| Ok(vec![]));
        catalog.expect_sizes().returning(|| Ok(vec![]));
        let use_case = GetCatalogUseCaseImpl {
            catalog: Arc::new(catalog),
            logger: mock_logger(),
        };

        let result = use_case.execute().await.unwrap();

        assert_eq!(result.houses, vec![house]);
        assert!(result.colors.is_empty());
    }

    #[tokio::test]
    async fn should_fail_when_any_table_is_unreachable() {
        let mut catalog = MockCatalogGw::new();
        catalog.expect_houses().returning(|| Ok(vec![]));
        catalog
            .expect_colors()
            .returning(|| Err(GatewayError::Unavailable));
        catalog.expect_sizes().never();
        let use_case = GetCatalogUseCaseImpl {
            catalog: Arc::new(catalog),
            logger: mock_logger(),
        };

        let result = use_case.execute().await;

        assert_eq!(result, Err(CatalogError::Gateway(GatewayError::Unavailable)));
    }
}
