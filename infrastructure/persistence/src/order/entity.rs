use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::order::model::Order;
use business::domain::order::value_objects::OrderStatus;
use business::domain::shared::value_objects::AccountId;

#[derive(Debug, Clone, FromRow)]
pub struct OrderEntity {
    pub id: Uuid,
    pub account_id: String,
    pub house_id: Uuid,
    pub color_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub quantity: i32,
    pub total_price: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderEntity {
    pub fn try_into_domain(self) -> Result<Order, RepositoryError> {
        let status = self.status.parse::<OrderStatus>().map_err(|e| {
            tracing::warn!("Malformed orders row {}: {}", self.id, e);
            RepositoryError::MalformedRow
        })?;

        if self.quantity < 1 || self.total_price < 0 {
            tracing::warn!(
                "Malformed orders row {}: quantity {}, total {}",
                self.id,
                self.quantity,
                self.total_price
            );
            return Err(RepositoryError::MalformedRow);
        }

        Ok(Order::from_repository(
            self.id,
            AccountId::new(self.account_id),
            self.house_id,
            self.color_id,
            self.size_id,
            self.quantity,
            self.total_price,
            status,
            self.created_at,
            self.updated_at,
        ))
    }
}
