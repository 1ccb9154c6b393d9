use crate::domain::model::{PlanInterval, SyncedProduct, TierDefinition};

/// Read access to products mirrored from the billing provider.
pub trait ProductStore {
    fn get_product(&self, id: &str) -> Option<&SyncedProduct>;
    fn active_products(&self) -> Vec<&SyncedProduct>;
}

/// Source of the tier table and the intervals offered to customers.
pub trait TierConfigProvider {
    fn tiers(&self) -> &[TierDefinition];
    fn active_intervals(&self) -> &[PlanInterval];
}
