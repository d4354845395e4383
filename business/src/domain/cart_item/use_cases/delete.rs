use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::shared::value_objects::AccountId;

pub struct DeleteCartItemParams {
    pub id: Uuid,
    pub account_id: AccountId,
}

#[async_trait]
pub trait DeleteCartItemUseCase: Send + Sync {
    async fn execute(&self, params: DeleteCartItemParams) -> Result<(), CartItemError>;
}
