use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::cart_item::model::CartItem;
use crate::domain::cart_item::repository::CartItemRepository;
use crate::domain::cart_item::use_cases::add::{AddCartItemParams, AddCartItemUseCase};
use crate::domain::logger::Logger;

pub struct AddCartItemUseCaseImpl {
    pub repository: Arc<dyn CartItemRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl AddCartItemUseCase for AddCartItemUseCaseImpl {
    async fn execute(&self, params: AddCartItemParams) -> Result<CartItem, CartItemError> {
        self.logger.info(&format!(
            "Adding {} x {} to cart of {}",
            params.props.quantity, params.props.house_name, params.account_id
        ));

        let item = CartItem::new(params.account_id, params.props)?;

        // Same house, color and size already in the cart: grow that row instead
        let existing = self
            .repository
            .find_by_configuration(&item.account_id, &item.configuration())
            .await?;

        let saved = match existing {
            Some(existing) => {
                let existing_id = existing.id;
                let merged = existing.add_quantity(item.quantity)?;
                self.logger.info(&format!(
                    "Cart item {} merged, quantity now {}",
                    existing_id, merged.quantity
                ));
                merged
            }
            None => item,
        };

        self.repository.save(&saved).await?;

        self.logger.info(&format!("Cart item saved: {}", saved.id));
        Ok(saved)
    }
}
