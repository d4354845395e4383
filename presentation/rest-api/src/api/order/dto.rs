use chrono::{DateTime, Utc};
use poem_openapi::Object;
use uuid::Uuid;

use business::domain::order::model::Order;

#[derive(Debug, Clone, Object)]
pub struct CreateOrderRequest {
    pub house_id: Uuid,
    #[oai(skip_serializing_if_is_none)]
    pub color_id: Option<Uuid>,
    #[oai(skip_serializing_if_is_none)]
    pub size_id: Option<Uuid>,
    /// Units ordered (at least 1)
    pub quantity: i32,
    /// Total in cents, copied from the cart line
    pub total_price: i64,
}

#[derive(Debug, Clone, Object)]
pub struct OrderResponse {
    pub id: Uuid,
    pub account_id: String,
    pub house_id: Uuid,
    #[oai(skip_serializing_if_is_none)]
    pub color_id: Option<Uuid>,
    #[oai(skip_serializing_if_is_none)]
    pub size_id: Option<Uuid>,
    pub quantity: i32,
    pub total_price: i64,
    /// One of pending, confirmed, in_production, delivered, cancelled
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            account_id: order.account_id.to_string(),
            house_id: order.house_id,
            color_id: order.color_id,
            size_id: order.size_id,
            quantity: order.quantity,
            total_price: order.total_price,
            status: order.status.to_string(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}
