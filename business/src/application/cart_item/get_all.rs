use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::cart_item::model::CartItem;
use crate::domain::cart_item::repository::CartItemRepository;
use crate::domain::cart_item::use_cases::get_all::{GetCartItemsParams, GetCartItemsUseCase};
use crate::domain::logger::Logger;

pub struct GetCartItemsUseCaseImpl {
    pub repository: Arc<dyn CartItemRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetCartItemsUseCase for GetCartItemsUseCaseImpl {
    async fn execute(&self, params: GetCartItemsParams) -> Result<Vec<CartItem>, CartItemError> {
        self.logger
            .info(&format!("Loading cart of {}", params.account_id));

        let items = self.repository.get_all(&params.account_id).await?;

        self.logger
            .debug(&format!("Loaded {} cart items", items.len()));
        Ok(items)
    }
}
