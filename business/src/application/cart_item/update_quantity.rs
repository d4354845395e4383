use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart_item::errors::CartItemError;
use crate::domain::cart_item::model::CartItem;
use crate::domain::cart_item::repository::CartItemRepository;
use crate::domain::cart_item::use_cases::update_quantity::{
    UpdateCartItemQuantityParams, UpdateCartItemQuantityUseCase,
};
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;

pub struct UpdateCartItemQuantityUseCaseImpl {
    pub repository: Arc<dyn CartItemRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateCartItemQuantityUseCase for UpdateCartItemQuantityUseCaseImpl {
    async fn execute(
        &self,
        params: UpdateCartItemQuantityParams,
    ) -> Result<Option<CartItem>, CartItemError> {
        self.logger.info(&format!(
            "Setting quantity of cart item {} to {}",
            params.id, params.quantity
        ));

        let existing = self
            .repository
            .get_by_id(params.id, &params.account_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CartItemError::NotFound,
                other => CartItemError::Repository(other),
            })?;

        if params.quantity <= 0 {
            self.repository
                .delete(existing.id, &params.account_id)
                .await?;
            self.logger
                .info(&format!("Cart item removed: {}", existing.id));
            return Ok(None);
        }

        let updated = existing.with_quantity(params.quantity)?;
        self.repository.save(&updated).await?;

        self.logger
            .info(&format!("Cart item updated: {}", updated.id));
        Ok(Some(updated))
    }
}
