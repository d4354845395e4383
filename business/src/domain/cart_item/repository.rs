use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::model::ConfigurationKey;
use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::AccountId;

use super::model::CartItem;

#[async_trait]
pub trait CartItemRepository: Send + Sync {
    async fn get_all(&self, account_id: &AccountId) -> Result<Vec<CartItem>, RepositoryError>;
    async fn get_by_id(&self, id: Uuid, account_id: &AccountId)
    -> Result<CartItem, RepositoryError>;
    async fn find_by_configuration(
        &self,
        account_id: &AccountId,
        configuration: &ConfigurationKey,
    ) -> Result<Option<CartItem>, RepositoryError>;
    async fn save(&self, item: &CartItem) -> Result<(), RepositoryError>;
    async fn delete(&self, id: Uuid, account_id: &AccountId) -> Result<(), RepositoryError>;
    async fn delete_all(&self, account_id: &AccountId) -> Result<u64, RepositoryError>;
}
