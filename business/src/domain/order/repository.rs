use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::AccountId;

use super::model::Order;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn get_all(&self, account_id: &AccountId) -> Result<Vec<Order>, RepositoryError>;
    async fn save(&self, order: &Order) -> Result<(), RepositoryError>;
}
