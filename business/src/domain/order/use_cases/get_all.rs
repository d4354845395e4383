use async_trait::async_trait;

use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;
use crate::domain::shared::value_objects::AccountId;

pub struct GetOrdersParams {
    pub account_id: AccountId,
}

#[async_trait]
pub trait GetOrdersUseCase: Send + Sync {
    async fn execute(&self, params: GetOrdersParams) -> Result<Vec<Order>, OrderError>;
}
