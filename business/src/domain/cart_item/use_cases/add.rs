use async_trait::async_trait;

use crate::domain::cart::model::CartLineProps;
use crate::domain::cart_item::errors::CartItemError;
use crate::domain::cart_item::model::CartItem;
use crate::domain::shared::value_objects::AccountId;

pub struct AddCartItemParams {
    pub account_id: AccountId,
    pub props: CartLineProps,
}

#[async_trait]
pub trait AddCartItemUseCase: Send + Sync {
    async fn execute(&self, params: AddCartItemParams) -> Result<CartItem, CartItemError>;
}
