use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::cart_item::repository::CartItemRepository;
use crate::domain::cart_item::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use crate::domain::logger::Logger;

pub struct ClearCartUseCaseImpl {
    pub repository: Arc<dyn CartItemRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ClearCartUseCase for ClearCartUseCaseImpl {
    async fn execute(&self, params: ClearCartParams) -> Result<u64, CartItemError> {
        self.logger
            .info(&format!("Clearing cart of {}", params.account_id));

        let count = self.repository.delete_all(&params.account_id).await?;

        self.logger
            .info(&format!("Cleared {} cart items", count));
        Ok(count)
    }
}
