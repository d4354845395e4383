use async_trait::async_trait;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::shared::value_objects::AccountId;

pub struct ClearCartParams {
    pub account_id: AccountId,
}

#[async_trait]
pub trait ClearCartUseCase: Send + Sync {
    async fn execute(&self, params: ClearCartParams) -> Result<u64, CartItemError>;
}
