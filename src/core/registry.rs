use crate::core::intervals::active_plan_interval_metadata;
use crate::domain::model::{IntervalDescriptor, PlanInterval, SyncedProduct, TierDefinition};
use crate::domain::ports::TierConfigProvider;
use std::borrow::Cow;
use std::collections::HashMap;

/// The configured tiers, indexed by billing product id.
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct TierRegistry {
    tiers: Vec<TierDefinition>,
    by_product_id: HashMap<String, usize>,
    active_intervals: Vec<PlanInterval>,
}

impl TierRegistry {
    pub fn new(tiers: Vec<TierDefinition>, active_intervals: Vec<PlanInterval>) -> Self {
        // Unlinked tiers (empty id) are not addressable by product.
        let by_product_id = tiers
            .iter()
            .enumerate()
            .filter(|(_, tier)| !tier.product_id.is_empty())
            .map(|(position, tier)| (tier.product_id.clone(), position))
            .collect();

        Self {
            tiers,
            by_product_id,
            active_intervals,
        }
    }

    pub fn from_config<C: TierConfigProvider>(config: &C) -> Self {
        Self::new(config.tiers().to_vec(), config.active_intervals().to_vec())
    }

    pub fn tiers(&self) -> &[TierDefinition] {
        &self.tiers
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn get(&self, product_id: &str) -> Option<&TierDefinition> {
        self.by_product_id
            .get(product_id)
            .and_then(|&position| self.tiers.get(position))
    }

    pub fn get_by_slug(&self, slug: &str) -> Option<&TierDefinition> {
        self.tiers.iter().find(|tier| tier.slug == slug)
    }

    /// Configured tier for `product`, or one derived from the product itself.
    pub fn tier_for_product(&self, product: &SyncedProduct) -> Cow<'_, TierDefinition> {
        match self.get(&product.id) {
            Some(tier) => Cow::Borrowed(tier),
            None => Cow::Owned(TierDefinition::from_synced_product(product)),
        }
    }

    pub fn default_tier(&self) -> Option<&TierDefinition> {
        self.tiers
            .iter()
            .find(|tier| tier.is_default)
            .or_else(|| self.tiers.first())
    }

    pub fn active_intervals(&self) -> &[PlanInterval] {
        &self.active_intervals
    }

    pub fn default_interval(&self) -> Option<PlanInterval> {
        self.active_intervals.first().copied()
    }

    pub fn interval_descriptors(&self) -> Vec<IntervalDescriptor> {
        active_plan_interval_metadata(&self.active_intervals)
    }
}
