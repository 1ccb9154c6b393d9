use crate::core::prices::{require_price, select_price, PriceLookup};
use crate::domain::model::{PlanInterval, SyncedPrice, SyncedProduct, TierDefinition};
use crate::utils::currency::friendly_currency_amount;
use crate::utils::error::Result;
use std::borrow::Cow;

/// A synced product joined with the tier it is shown as.
#[derive(Debug, Clone)]
pub struct TierView<'a> {
    pub product: &'a SyncedProduct,
    pub tier: Cow<'a, TierDefinition>,
}

impl<'a> TierView<'a> {
    pub fn new(product: &'a SyncedProduct, tier: Cow<'a, TierDefinition>) -> Self {
        Self { product, tier }
    }

    /// The configured product id, or the synced product's own id for unlinked tiers.
    pub fn product_id(&self) -> &str {
        if self.tier.product_id.is_empty() {
            &self.product.id
        } else {
            &self.tier.product_id
        }
    }

    pub fn select_price(
        &self,
        interval: PlanInterval,
        lookup: PriceLookup,
    ) -> Result<Option<&'a SyncedPrice>> {
        select_price(self.product, interval, lookup)
    }

    /// Strict lookup: exactly one active price must bill every `interval`.
    pub fn price(&self, interval: PlanInterval) -> Result<&'a SyncedPrice> {
        require_price(self.product, interval)
    }

    pub fn price_or_none(&self, interval: PlanInterval) -> Option<&'a SyncedPrice> {
        self.select_price(interval, PriceLookup::Lenient)
            .ok()
            .flatten()
    }

    /// Display text for `price`: the tier's override for its interval, else the amount.
    pub fn price_display(&self, price: &SyncedPrice) -> String {
        price
            .interval()
            .and_then(|interval| self.tier.price_displays.get(&interval))
            .cloned()
            .unwrap_or_else(|| friendly_currency_amount(price.unit_amount, &price.currency))
    }
}
