//! JSON views of tiers for the API layer.
//!
//! Key order is stable: struct fields serialize in declaration order and
//! `active_prices` follows the configured interval order.

use crate::core::view::TierView;
use crate::domain::model::{PlanInterval, SyncedPrice, SyncedProduct, TierDefinition};
use crate::utils::currency::human_readable_price;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

#[derive(Debug, Clone, serde::Serialize)]
pub struct ProductView<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub metadata: BTreeMap<&'a str, &'a str>,
    pub created: Option<DateTime<Utc>>,
}

impl<'a> From<&'a SyncedProduct> for ProductView<'a> {
    fn from(product: &'a SyncedProduct) -> Self {
        Self {
            id: &product.id,
            name: &product.name,
            description: product.description.as_deref(),
            metadata: product
                .metadata
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect(),
            created: product.created,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PriceView<'a> {
    pub id: &'a str,
    pub product: &'a str,
    pub nickname: Option<&'a str>,
    pub unit_amount: Option<i64>,
    pub currency: &'a str,
    pub interval: Option<PlanInterval>,
    pub human_readable_price: String,
    /// What the tier shows as the price.
    pub payment_amount: String,
}

/// Interval code to price, `null` where no unique price exists.
#[derive(Debug, Clone)]
pub struct ActivePrices<'a>(pub Vec<(PlanInterval, Option<PriceView<'a>>)>);

impl<'a> ActivePrices<'a> {
    pub fn get(&self, interval: PlanInterval) -> Option<&PriceView<'a>> {
        self.0
            .iter()
            .find(|(candidate, _)| *candidate == interval)
            .and_then(|(_, price)| price.as_ref())
    }
}

impl Serialize for ActivePrices<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (interval, price) in &self.0 {
            map.serialize_entry(interval.as_str(), price)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct RenderedTier<'a> {
    pub product: ProductView<'a>,
    pub metadata: &'a TierDefinition,
    pub active_prices: ActivePrices<'a>,
}

impl<'a> TierView<'a> {
    pub fn price_view<'v>(&'v self, price: &'v SyncedPrice) -> PriceView<'v> {
        let recurrence = price
            .recurring
            .as_ref()
            .map(|r| (r.interval.as_str(), r.interval_count));

        PriceView {
            id: &price.id,
            product: &self.product.id,
            nickname: price.nickname.as_deref(),
            unit_amount: price.unit_amount,
            currency: &price.currency,
            interval: price.interval(),
            human_readable_price: human_readable_price(
                price.unit_amount,
                &price.currency,
                recurrence,
            ),
            payment_amount: self.price_display(price),
        }
    }

    /// One `active_prices` entry per interval, looked up leniently.
    pub fn render<'v>(&'v self, intervals: &[PlanInterval]) -> RenderedTier<'v> {
        let active_prices = intervals
            .iter()
            .map(|&interval| {
                let price = self
                    .price_or_none(interval)
                    .map(|price| self.price_view(price));
                (interval, price)
            })
            .collect();

        RenderedTier {
            product: ProductView::from(self.product),
            metadata: &*self.tier,
            active_prices: ActivePrices(active_prices),
        }
    }

    pub fn to_value(&self, intervals: &[PlanInterval]) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.render(intervals))?)
    }

    pub fn to_json(&self, intervals: &[PlanInterval]) -> Result<String> {
        Ok(serde_json::to_string(&self.render(intervals))?)
    }
}
