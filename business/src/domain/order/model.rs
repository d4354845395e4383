use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::OrderError;
use super::value_objects::OrderStatus;
use crate::domain::shared::value_objects::AccountId;

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub account_id: AccountId,
    pub house_id: Uuid,
    pub color_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub quantity: i32,
    pub total_price: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewOrderProps {
    pub account_id: AccountId,
    pub house_id: Uuid,
    pub color_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub quantity: i32,
    pub total_price: i64,
}

impl Order {
    /// Creates a pending order.
    pub fn new(props: NewOrderProps) -> Result<Self, OrderError> {
        if props.quantity < 1 {
            return Err(OrderError::QuantityNotPositive);
        }
        if props.total_price < 0 {
            return Err(OrderError::NegativeTotal);
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            account_id: props.account_id,
            house_id: props.house_id,
            color_id: props.color_id,
            size_id: props.size_id,
            quantity: props.quantity,
            total_price: props.total_price,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn from_repository(
        id: Uuid,
        account_id: AccountId,
        house_id: Uuid,
        color_id: Option<Uuid>,
        size_id: Option<Uuid>,
        quantity: i32,
        total_price: i64,
        status: OrderStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            account_id,
            house_id,
            color_id,
            size_id,
            quantity,
            total_price,
            status,
            created_at,
            updated_at,
        }
    }
}
