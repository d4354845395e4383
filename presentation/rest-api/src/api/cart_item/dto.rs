use chrono::{DateTime, Utc};
use poem_openapi::Object;
use uuid::Uuid;

use business::domain::cart::model::CartLineProps;
use business::domain::cart_item::model::CartItem;

#[derive(Debug, Clone, Object)]
pub struct AddCartItemRequest {
    /// Container house identifier
    pub house_id: Uuid,
    /// House display name (cannot be empty)
    pub house_name: String,
    /// Chosen color; absent for the default color
    #[oai(skip_serializing_if_is_none)]
    pub color_id: Option<Uuid>,
    pub color_name: String,
    /// Chosen size; absent for the default size
    #[oai(skip_serializing_if_is_none)]
    pub size_id: Option<Uuid>,
    pub size_name: String,
    /// Units to add (at least 1); merged into an existing line of the same configuration
    pub quantity: i32,
    /// Unit price in cents
    pub unit_price: i64,
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
}

impl AddCartItemRequest {
    pub fn into_props(self) -> CartLineProps {
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
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct UpdateCartItemQuantityRequest {
    /// New quantity; zero or less removes the line
    pub quantity: i32,
}

#[derive(Debug, Clone, Object)]
pub struct CartItemResponse {
    pub id: Uuid,
    pub account_id: String,
    pub house_id: Uuid,
    pub house_name: String,
    #[oai(skip_serializing_if_is_none)]
    pub color_id: Option<Uuid>,
    pub color_name: String,
    #[oai(skip_serializing_if_is_none)]
    pub size_id: Option<Uuid>,
    pub size_name: String,
    pub quantity: i32,
    /// Unit price in cents
    pub unit_price: i64,
    /// `unit_price * quantity`, in cents
    pub total_price: i64,
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id,
            account_id: item.account_id.to_string(),
            house_id: item.house_id,
            house_name: item.house_name,
            color_id: item.color_id,
            color_name: item.color_name,
            size_id: item.size_id,
            size_name: item.size_name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.total_price,
            image_url: item.image_url,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ClearCartResponse {
    /// Number of lines removed
    pub count: u64,
}
