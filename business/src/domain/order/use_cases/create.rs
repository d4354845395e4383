use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;
use crate::domain::shared::value_objects::AccountId;

pub struct CreateOrderParams {
    pub account_id: AccountId,
    pub house_id: Uuid,
    pub color_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub quantity: i32,
    pub total_price: i64,
}

#[async_trait]
pub trait CreateOrderUseCase: Send + Sync {
    async fn execute(&self, params: CreateOrderParams) -> Result<Order, OrderError>;
}
