use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::catalog::model::Configuration;
use crate::domain::shared::value_objects::AccountId;

/// Extras a buyer can ask to have quoted on top of a configured house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Customization {
    Solar,
    Pool,
    Garage,
    Terrace,
    Smart,
    Garden,
}

impl Customization {
    pub const ALL: [Customization; 6] = [
        Customization::Solar,
        Customization::Pool,
        Customization::Garage,
        Customization::Terrace,
        Customization::Smart,
        Customization::Garden,
    ];

    /// Flat price in minor units.
    pub fn price(&self) -> i64 {
        match self {
            Customization::Solar => 800_000,
            Customization::Pool => 2_500_000,
            Customization::Garage => 1_200_000,
            Customization::Terrace => 500_000,
            Customization::Smart => 300_000,
            Customization::Garden => 400_000,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Customization::Solar => "Solar panels",
            Customization::Pool => "Built-in pool",
            Customization::Garage => "Attached garage",
            Customization::Terrace => "Extended terrace",
            Customization::Smart => "Home automation",
            Customization::Garden => "Landscaped garden",
        }
    }
}

impl std::fmt::Display for Customization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Customization::Solar => write!(f, "solar"),
            Customization::Pool => write!(f, "pool"),
            Customization::Garage => write!(f, "garage"),
            Customization::Terrace => write!(f, "terrace"),
            Customization::Smart => write!(f, "smart"),
            Customization::Garden => write!(f, "garden"),
        }
    }
}

impl std::str::FromStr for Customization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Customization::ALL
            .into_iter()
            .find(|customization| customization.to_string() == s)
            .ok_or_else(|| format!("Invalid customization: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteStatus::Pending => write!(f, "pending"),
            QuoteStatus::Approved => write!(f, "approved"),
            QuoteStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for QuoteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(QuoteStatus::Pending),
            "approved" => Ok(QuoteStatus::Approved),
            "rejected" => Ok(QuoteStatus::Rejected),
            _ => Err(format!("Invalid quote status: {}", s)),
        }
    }
}

/// A quote request about to be submitted. New requests are always pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuote {
    pub account_id: AccountId,
    pub house_id: Uuid,
    pub color_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub customizations: Vec<Customization>,
    pub total_price: i64,
    pub message: Option<String>,
}

impl NewQuote {
    /// Prices one unit of the configuration plus every extra, each extra
    /// counted once.
    pub fn new(
        account_id: AccountId,
        configuration: &Configuration,
        customizations: Vec<Customization>,
        message: Option<String>,
    ) -> Self {
        let mut picked: Vec<Customization> = Vec::with_capacity(customizations.len());
        for customization in customizations {
            if !picked.contains(&customization) {
                picked.push(customization);
            }
        }
        let extras = picked
            .iter()
            .fold(0i64, |sum, customization| sum.saturating_add(customization.price()));

        Self {
            account_id,
            house_id: configuration.house.id,
            color_id: configuration.color.as_ref().map(|color| color.id),
            size_id: configuration.size.as_ref().map(|size| size.id),
            customizations: picked,
            total_price: configuration.unit_price().saturating_add(extras),
            message: message
                .map(|message| message.trim().to_string())
                .filter(|message| !message.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub id: Uuid,
    pub account_id: AccountId,
    pub house_id: Uuid,
    pub color_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub customizations: Vec<Customization>,
    pub total_price: i64,
    pub status: QuoteStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}
