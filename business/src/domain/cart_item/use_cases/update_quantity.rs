use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::cart_item::model::CartItem;
use crate::domain::shared::value_objects::AccountId;

pub struct UpdateCartItemQuantityParams {
    pub id: Uuid,
    pub account_id: AccountId,
    pub quantity: i32,
}

#[async_trait]
pub trait UpdateCartItemQuantityUseCase: Send + Sync {
    /// Returns `None` when a non-positive quantity removed the item.
    async fn execute(
        &self,
        params: UpdateCartItemQuantityParams,
    ) -> Result<Option<CartItem>, CartItemError>;
}
