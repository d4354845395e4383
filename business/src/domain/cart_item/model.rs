use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::CartItemError;
use crate::domain::cart::errors::CartLineError;
use crate::domain::cart::model::{
    CartLine, CartLineId, CartLineProps, ConfigurationKey, line_total,
};
use crate::domain::shared::value_objects::AccountId;

/// A persisted cart row, owned by one account.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: Uuid,
    pub account_id: AccountId,
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

impl CartItem {
    pub fn new(account_id: AccountId, props: CartLineProps) -> Result<Self, CartItemError> {
        props.validate()?;
        let now = Utc::now();
        let total_price = line_total(props.unit_price, props.quantity);
        Ok(Self::from_repository(
            Uuid::new_v4(),
            account_id,
            props,
            total_price,
            now,
            now,
        ))
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: Uuid,
        account_id: AccountId,
        props: CartLineProps,
        total_price: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            account_id,
            house_id: props.house_id,
            house_name: props.house_name,
            color_id: props.color_id,
            color_name: props.color_name,
            size_id: props.size_id,
            size_name: props.size_name,
            quantity: props.quantity,
            unit_price: props.unit_price,
            total_price,
            image_url: props.image_url,
            created_at,
            updated_at,
        }
    }

    /// Checks the invariants of a row read back from storage.
    pub fn validate(&self) -> Result<(), CartLineError> {
        self.to_line().validate()
    }

    /// Adds `quantity` units, keeping the stored unit price.
    pub fn add_quantity(self, quantity: i32) -> Result<Self, CartItemError> {
        if quantity < 1 {
            return Err(CartLineError::QuantityNotPositive.into());
        }
        let new_quantity = self.quantity.saturating_add(quantity);
        self.with_quantity(new_quantity)
    }

    pub fn with_quantity(self, quantity: i32) -> Result<Self, CartItemError> {
        if quantity < 1 {
            return Err(CartLineError::QuantityNotPositive.into());
        }
        Ok(Self {
            quantity,
            total_price: line_total(self.unit_price, quantity),
            updated_at: Utc::now(),
            ..self
        })
    }

    pub fn configuration(&self) -> ConfigurationKey {
        ConfigurationKey {
            house_id: self.house_id,
            color_id: self.color_id,
            size_id: self.size_id,
        }
    }

    /// Client-side view of the row; the row id becomes the line id.
    pub fn to_line(&self) -> CartLine {
        CartLine {
            id: CartLineId::new(self.id),
            house_id: self.house_id,
            house_name: self.house_name.clone(),
            color_id: self.color_id,
            color_name: self.color_name.clone(),
            size_id: self.size_id,
            size_name: self.size_name.clone(),
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_price: self.total_price,
            image_url: self.image_url.clone(),
        }
    }
}
