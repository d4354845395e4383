use async_trait::async_trait;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::cart_item::model::CartItem;
use crate::domain::shared::value_objects::AccountId;

pub struct GetCartItemsParams {
    pub account_id: AccountId,
}

#[async_trait]
pub trait GetCartItemsUseCase: Send + Sync {
    async fn execute(&self, params: GetCartItemsParams) -> Result<Vec<CartItem>, CartItemError>;
}
