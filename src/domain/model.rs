use crate::utils::slug::slugify;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Billing recurrence period, as the billing provider spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanInterval {
    Day,
    Week,
    Month,
    Year,
}

impl PlanInterval {
    pub const ALL: [PlanInterval; 4] = [
        PlanInterval::Day,
        PlanInterval::Week,
        PlanInterval::Month,
        PlanInterval::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanInterval::Day => "day",
            PlanInterval::Week => "week",
            PlanInterval::Month => "month",
            PlanInterval::Year => "year",
        }
    }
}

impl fmt::Display for PlanInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        PlanInterval::ALL
            .into_iter()
            .find(|interval| interval.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown plan interval '{}', expected one of: day, week, month, year",
                    s
                )
            })
    }
}

/// Application-side description of a subscription tier.
///
/// An empty `product_id` means the tier has not been linked to a billing
/// product yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierDefinition {
    #[serde(default)]
    pub product_id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub price_displays: BTreeMap<PlanInterval, String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_default: bool,
}

impl TierDefinition {
    /// Metadata for a product that has no configured tier.
    pub fn from_synced_product(product: &SyncedProduct) -> Self {
        Self {
            product_id: product.id.clone(),
            slug: slugify(&product.name),
            name: product.name.clone(),
            features: Vec::new(),
            price_displays: BTreeMap::new(),
            description: String::new(),
            is_default: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurring {
    pub interval: PlanInterval,
    #[serde(default = "default_interval_count")]
    pub interval_count: u32,
}

fn default_interval_count() -> u32 {
    1
}

/// A price record mirrored from the billing provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncedPrice {
    pub id: String,
    #[serde(default)]
    pub nickname: Option<String>,
    /// Amount in the currency's minor unit.
    #[serde(default)]
    pub unit_amount: Option<i64>,
    pub currency: String,
    /// `None` for one-time prices.
    #[serde(default)]
    pub recurring: Option<Recurring>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl SyncedPrice {
    pub fn interval(&self) -> Option<PlanInterval> {
        self.recurring.as_ref().map(|r| r.interval)
    }

    /// Active, recurring every single `interval`.
    pub fn bills_every(&self, interval: PlanInterval) -> bool {
        self.active
            && self
                .recurring
                .as_ref()
                .is_some_and(|r| r.interval == interval && r.interval_count == 1)
    }
}

/// A product record mirrored from the billing provider, with its prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncedProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub prices: Vec<SyncedPrice>,
}

impl fmt::Display for SyncedProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntervalDescriptor {
    pub interval: PlanInterval,
    pub name: String,
    pub help_text: String,
}
