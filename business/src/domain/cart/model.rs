use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::CartLineError;

/// Identity of a cart line.
///
/// Lines created in an anonymous session get a time-ordered id generated
/// locally; lines loaded from the remote table keep the id the server assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartLineId(Uuid);

impl CartLineId {
    /// Fresh timestamp-based identifier for a locally created line.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for CartLineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CartLineId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| format!("Invalid cart line id: {}", s))
    }
}

impl From<Uuid> for CartLineId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// The tuple that makes two lines "the same product".
/// `None` stands for the house's default color or size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigurationKey {
    pub house_id: Uuid,
    pub color_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
}

/// Everything needed to put a configured house in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineProps {
    pub house_id: Uuid,
    pub house_name: String,
    pub color_id: Option<Uuid>,
    pub color_name: String,
    pub size_id: Option<Uuid>,
    pub size_name: String,
    pub quantity: i32,
    /// Minor currency units.
    pub unit_price: i64,
    pub image_url: Option<String>,
}

impl CartLineProps {
    pub fn validate(&self) -> Result<(), CartLineError> {
        if self.house_name.trim().is_empty() {
            return Err(CartLineError::HouseNameEmpty);
        }
        if self.quantity < 1 {
            return Err(CartLineError::QuantityNotPositive);
        }
        if self.unit_price < 0 {
            return Err(CartLineError::NegativeUnitPrice);
        }
        Ok(())
    }
}

/// One configured product in the active cart.
///
/// Serialized in camelCase: this is also the layout of the anonymous cart blob
/// kept in local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: CartLineId,
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
}

/// `unit_price * quantity`, saturating instead of overflowing.
pub fn line_total(unit_price: i64, quantity: i32) -> i64 {
    unit_price.saturating_mul(i64::from(quantity))
}

impl CartLine {
    /// Builds a new line with a freshly generated identifier.
    pub fn new(props: CartLineProps) -> Result<Self, CartLineError> {
        props.validate()?;
        Ok(Self::from_props(CartLineId::generate(), props))
    }

    /// Rebuilds a line read from storage or from the wire, re-checking every
    /// invariant including the stored total.
    pub fn restore(
        id: CartLineId,
        props: CartLineProps,
        total_price: i64,
    ) -> Result<Self, CartLineError> {
        props.validate()?;
        let line = Self::from_props(id, props);
        if line.total_price != total_price {
            return Err(CartLineError::TotalMismatch);
        }
        Ok(line)
    }

    fn from_props(id: CartLineId, props: CartLineProps) -> Self {
        Self {
            id,
            total_price: line_total(props.unit_price, props.quantity),
            house_id: props.house_id,
            house_name: props.house_name,
            color_id: props.color_id,
            color_name: props.color_name,
            size_id: props.size_id,
            size_name: props.size_name,
            quantity: props.quantity,
            unit_price: props.unit_price,
            image_url: props.image_url,
        }
    }

    /// Checks a line that did not go through a constructor (e.g. deserialized).
    pub fn validate(&self) -> Result<(), CartLineError> {
        self.props().validate()?;
        if self.total_price != line_total(self.unit_price, self.quantity) {
            return Err(CartLineError::TotalMismatch);
        }
        Ok(())
    }

    /// Same line with another quantity and its total recomputed.
    pub fn with_quantity(&self, quantity: i32) -> Self {
        Self {
            quantity,
            total_price: line_total(self.unit_price, quantity),
            ..self.clone()
        }
    }

    pub fn configuration(&self) -> ConfigurationKey {
        ConfigurationKey {
            house_id: self.house_id,
            color_id: self.color_id,
            size_id: self.size_id,
        }
    }

    pub fn props(&self) -> CartLineProps {
        CartLineProps {
            house_id: self.house_id,
            house_name: self.house_name.clone(),
            color_id: self.color_id,
            color_name: self.color_name.clone(),
            size_id: self.size_id,
            size_name: self.size_name.clone(),
            quantity: self.quantity,
            unit_price: self.unit_price,
            image_url: self.image_url.clone(),
        }
    }
}
