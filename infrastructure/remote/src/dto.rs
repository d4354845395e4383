//! Wire rows of the storefront API.
//!
//! Rows are strict: every required column must be present, and a row is only
//! accepted once it satisfies the domain invariants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use business::domain::cart::model::{CartLine, CartLineId, CartLineProps};
use business::domain::catalog::model::{House, HouseColor, HouseSize};
use business::domain::errors::GatewayError;
use business::domain::order::model::Order;
use business::domain::order::value_objects::OrderStatus;
use business::domain::quote::model::{Customization, NewQuote, Quote, QuoteStatus};
use business::domain::shared::value_objects::AccountId;

#[derive(Debug, Clone, Deserialize)]
pub struct CartItemRow {
    pub id: Uuid,
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

impl TryFrom<CartItemRow> for CartLine {
    type Error = GatewayError;

    fn try_from(row: CartItemRow) -> Result<Self, Self::Error> {
        let id = row.id;
        CartLine::restore(
            CartLineId::new(row.id),
            CartLineProps {
                house_id: row.house_id,
                house_name: row.house_name,
                color_id: row.color_id,
                color_name: row.color_name,
                size_id: row.size_id,
                size_name: row.size_name,
                quantity: row.quantity,
                unit_price: row.unit_price,
                image_url: row.image_url,
            },
            row.total_price,
        )
        .map_err(|e| GatewayError::MalformedRow(format!("cart item {}: {}", id, e)))
    }
}

/// One malformed row fails the whole batch.
pub fn into_lines(rows: Vec<CartItemRow>) -> Result<Vec<CartLine>, GatewayError> {
    rows.into_iter().map(CartLine::try_from).collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderRow {
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

impl TryFrom<OrderRow> for Order {
    type Error = GatewayError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<OrderStatus>()
            .map_err(|e| GatewayError::MalformedRow(format!("order {}: {}", row.id, e)))?;
        if row.quantity < 1 || row.total_price < 0 {
            return Err(GatewayError::MalformedRow(format!(
                "order {}: quantity {}, total {}",
                row.id, row.quantity, row.total_price
            )));
        }

        Ok(Order::from_repository(
            row.id,
            AccountId::new(row.account_id),
            row.house_id,
            row.color_id,
            row.size_id,
            row.quantity,
            row.total_price,
            status,
            row.created_at,
            row.updated_at,
        ))
    }
}

pub fn into_orders(rows: Vec<OrderRow>) -> Result<Vec<Order>, GatewayError> {
    rows.into_iter().map(Order::try_from).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddCartItemBody {
    pub house_id: Uuid,
    pub house_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_id: Option<Uuid>,
    pub color_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_id: Option<Uuid>,
    pub size_name: String,
    pub quantity: i32,
    pub unit_price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<&CartLine> for AddCartItemBody {
    fn from(line: &CartLine) -> Self {
        Self {
            house_id: line.house_id,
            house_name: line.house_name.clone(),
            color_id: line.color_id,
            color_name: line.color_name.clone(),
            size_id: line.size_id,
            size_name: line.size_name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            image_url: line.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateQuantityBody {
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateOrderBody {
    pub house_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_id: Option<Uuid>,
    pub quantity: i32,
    pub total_price: i64,
}

impl From<&CartLine> for CreateOrderBody {
    fn from(line: &CartLine) -> Self {
        Self {
            house_id: line.house_id,
            color_id: line.color_id,
            size_id: line.size_id,
            quantity: line.quantity,
            total_price: line.total_price,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HouseRow {
    pub id: Uuid,
    pub name: String,
    pub short_description: Option<String>,
    pub base_price: i64,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    pub category: Option<String>,
}

impl TryFrom<HouseRow> for House {
    type Error = GatewayError;

    fn try_from(row: HouseRow) -> Result<Self, Self::Error> {
        if row.base_price < 0 {
            return Err(GatewayError::MalformedRow(format!(
                "house {}: base price {}",
                row.id, row.base_price
            )));
        }
        Ok(House {
            id: row.id,
            name: row.name,
            short_description: row.short_description.unwrap_or_default(),
            base_price: row.base_price,
            images: row.images.unwrap_or_default(),
            category: row.category.unwrap_or_default(),
        })
    }
}

pub fn into_houses(rows: Vec<HouseRow>) -> Result<Vec<House>, GatewayError> {
    rows.into_iter().map(House::try_from).collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColorRow {
    pub id: Uuid,
    pub name: String,
    pub hex: Option<String>,
    pub price_modifier: i64,
}

impl From<ColorRow> for HouseColor {
    fn from(row: ColorRow) -> Self {
        HouseColor {
            id: row.id,
            name: row.name,
            hex: row.hex.unwrap_or_default(),
            price_modifier: row.price_modifier,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SizeRow {
    pub id: Uuid,
    pub name: String,
    pub dimensions: Option<String>,
    pub price_modifier: i64,
}

impl From<SizeRow> for HouseSize {
    fn from(row: SizeRow) -> Self {
        HouseSize {
            id: row.id,
            name: row.name,
            dimensions: row.dimensions.unwrap_or_default(),
            price_modifier: row.price_modifier,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRow {
    pub id: Uuid,
    pub user_id: String,
    pub house_id: Uuid,
    pub color_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    #[serde(default)]
    pub customizations: Option<Vec<String>>,
    pub total_price: i64,
    pub status: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<QuoteRow> for Quote {
    type Error = GatewayError;

    fn try_from(row: QuoteRow) -> Result<Self, Self::Error> {
        let malformed = |e: String| GatewayError::MalformedRow(format!("quote {}: {}", row.id, e));
        let status = row.status.parse::<QuoteStatus>().map_err(malformed)?;
        let customizations = row
            .customizations
            .unwrap_or_default()
            .iter()
            .map(|raw| raw.parse::<Customization>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(malformed)?;

        Ok(Quote {
            id: row.id,
            account_id: AccountId::new(row.user_id),
            house_id: row.house_id,
            color_id: row.color_id,
            size_id: row.size_id,
            customizations,
            total_price: row.total_price,
            status,
            message: row.message,
            created_at: row.created_at,
        })
    }
}

pub fn into_quotes(rows: Vec<QuoteRow>) -> Result<Vec<Quote>, GatewayError> {
    rows.into_iter().map(Quote::try_from).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewQuoteBody {
    pub user_id: String,
    pub house_id: Uuid,
    pub color_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub customizations: Vec<Customization>,
    pub total_price: i64,
    pub message: Option<String>,
    pub status: QuoteStatus,
}

impl From<&NewQuote> for NewQuoteBody {
    fn from(quote: &NewQuote) -> Self {
        Self {
            user_id: quote.account_id.as_str().to_string(),
            house_id: quote.house_id,
            color_id: quote.color_id,
            size_id: quote.size_id,
            customizations: quote.customizations.clone(),
            total_price: quote.total_price,
            message: quote.message.clone(),
            status: QuoteStatus::Pending,
        }
    }
}
