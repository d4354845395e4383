use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::cart::model::CartLineProps;
use business::domain::cart_item::model::CartItem;
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::AccountId;

#[derive(Debug, Clone, FromRow)]
pub struct CartItemEntity {
    pub id: Uuid,
    pub account_id: String,
    pub house_id: Uuid,
    pub house_name: String,
    pub color_id: Option<Uuid>,
    pub color_name: String,
    pub size_id: Option<Uuid>,
    pub size_name: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub total_price: i64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartItemEntity {
    /// Rows that break a cart-line invariant are rejected, never patched.
    pub fn try_into_domain(self) -> Result<CartItem, RepositoryError> {
        let id = self.id;
        let item = CartItem::from_repository(
            self.id,
            AccountId::new(self.account_id),
            CartLineProps {
                house_id: self.house_id,
                house_name: self.house_name,
                color_id: self.color_id,
                color_name: self.color_name,
                size_id: self.size_id,
                size_name: self.size_name,
                quantity: self.quantity,
                unit_price: self.unit_price,
                image_url: self.image_url,
            },
            self.total_price,
            self.created_at,
            self.updated_at,
        );

        item.validate().map_err(|e| {
            tracing::warn!("Malformed cart_items row {}: {}", id, e);
            RepositoryError::MalformedRow
        })?;

        Ok(item)
    }
}
