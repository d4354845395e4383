use uuid::Uuid;

use crate::domain::cart::model::{CartLineProps, line_total};

/// Color name shown when a house is configured without a color.
pub const DEFAULT_COLOR_NAME: &str = "Default";
/// Size name shown when a house is configured without a size.
pub const DEFAULT_SIZE_NAME: &str = "Standard";

/// A container house model from the catalog. Prices are in minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct House {
    pub id: Uuid,
    pub name: String,
    pub short_description: String,
    pub base_price: i64,
    pub images: Vec<String>,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseColor {
    pub id: Uuid,
    pub name: String,
    pub hex: String,
    pub price_modifier: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseSize {
    pub id: Uuid,
    pub name: String,
    pub dimensions: String,
    pub price_modifier: i64,
}

/// Everything a buyer can pick from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub houses: Vec<House>,
    pub colors: Vec<HouseColor>,
    pub sizes: Vec<HouseSize>,
}

/// A house with the color and size the buyer picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub house: House,
    pub color: Option<HouseColor>,
    pub size: Option<HouseSize>,
}

impl Configuration {
    /// Base price plus both modifiers, saturating instead of overflowing.
    pub fn unit_price(&self) -> i64 {
        let color = self.color.as_ref().map_or(0, |color| color.price_modifier);
        let size = self.size.as_ref().map_or(0, |size| size.price_modifier);
        self.house.base_price.saturating_add(color).saturating_add(size)
    }

    pub fn total_price(&self, quantity: i32) -> i64 {
        line_total(self.unit_price(), quantity)
    }

    pub fn line_props(&self, quantity: i32) -> CartLineProps {
        CartLineProps {
            house_id: self.house.id,
            house_name: self.house.name.clone(),
            color_id: self.color.as_ref().map(|color| color.id),
            color_name: self
                .color
                .as_ref()
                .map_or(DEFAULT_COLOR_NAME.to_string(), |color| color.name.clone()),
            size_id: self.size.as_ref().map(|size| size.id),
            size_name: self
                .size
                .as_ref()
                .map_or(DEFAULT_SIZE_NAME.to_string(), |size| size.name.clone()),
            quantity,
            unit_price: self.unit_price(),
            image_url: self.house.images.first().cloned(),
        }
    }
}
