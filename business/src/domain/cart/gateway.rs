use async_trait::async_trait;

use crate::domain::errors::GatewayError;
use crate::domain::order::model::Order;
use crate::domain::shared::value_objects::AccountId;

use super::model::{CartLine, CartLineId};

/// Remote cart-line table, as seen by the client.
///
/// Every call is one request/response; nothing is transactional across lines.
#[async_trait]
pub trait CartGateway: Send + Sync {
    /// Lines of the account, oldest first.
    async fn get_by_account(&self, account_id: &AccountId) -> Result<Vec<CartLine>, GatewayError>;

    /// Adds a line. When the account already holds a line with the same
    /// configuration its quantity is incremented instead of inserting a
    /// duplicate. Returns the resulting remote line.
    async fn add(&self, account_id: &AccountId, line: &CartLine)
    -> Result<CartLine, GatewayError>;

    /// A quantity of zero or less deletes the line and yields `None`.
    async fn update_quantity(
        &self,
        account_id: &AccountId,
        id: &CartLineId,
        quantity: i32,
    ) -> Result<Option<CartLine>, GatewayError>;

    async fn delete(&self, account_id: &AccountId, id: &CartLineId) -> Result<(), GatewayError>;

    async fn delete_all_for_account(&self, account_id: &AccountId) -> Result<(), GatewayError>;
}

/// Remote order table, as seen by the client.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Creates one pending order for the line.
    async fn create_order(
        &self,
        account_id: &AccountId,
        line: &CartLine,
    ) -> Result<Order, GatewayError>;

    async fn get_by_account(&self, account_id: &AccountId) -> Result<Vec<Order>, GatewayError>;
}
