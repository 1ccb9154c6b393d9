use crate::domain::model::{PlanInterval, SyncedPrice, SyncedProduct};
use crate::utils::error::{Result, TierError};

/// How to treat a product that does not have exactly one price for an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceLookup {
    /// Zero or several matches are a configuration error.
    Strict,
    /// Zero or several matches yield `None`.
    Lenient,
}

/// The active price billed every one `interval`, or the number of candidates
/// when there is not exactly one.
fn unique_price(
    product: &SyncedProduct,
    interval: PlanInterval,
) -> std::result::Result<&SyncedPrice, usize> {
    let mut matches = product.prices.iter().filter(|p| p.bills_every(interval));

    match (matches.next(), matches.next()) {
        (Some(price), None) => Ok(price),
        (None, _) => Err(0),
        (Some(_), Some(_)) => Err(2 + matches.count()),
    }
}

pub fn require_price(product: &SyncedProduct, interval: PlanInterval) -> Result<&SyncedPrice> {
    unique_price(product, interval).map_err(|found| unselectable_price(product, interval, found))
}

pub fn select_price(
    product: &SyncedProduct,
    interval: PlanInterval,
    lookup: PriceLookup,
) -> Result<Option<&SyncedPrice>> {
    match (unique_price(product, interval), lookup) {
        (Ok(price), _) => Ok(Some(price)),
        (Err(found), PriceLookup::Strict) => Err(unselectable_price(product, interval, found)),
        (Err(found), PriceLookup::Lenient) => {
            tracing::debug!(
                "No unique '{}' price for {} ({} candidates)",
                interval,
                product,
                found
            );
            Ok(None)
        }
    }
}

fn unselectable_price(product: &SyncedProduct, interval: PlanInterval, found: usize) -> TierError {
    TierError::configuration(format!(
        "Unable to select a \"{interval}\" plan for {product}: found {found} active prices billed \
         every {interval}, expected exactly one. Have you set up your products and prices with the \
         billing provider and synced them locally? You can also hide this plan interval by removing \
         it from billing.active_intervals in the tier configuration."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Recurring;
    use std::collections::HashMap;

    fn price(id: &str, interval: PlanInterval, active: bool) -> SyncedPrice {
        SyncedPrice {
            id: id.to_string(),
            nickname: None,
            unit_amount: Some(1000),
            currency: "usd".to_string(),
            recurring: Some(Recurring {
                interval,
                interval_count: 1,
            }),
            active,
        }
    }

    fn product(prices: Vec<SyncedPrice>) -> SyncedProduct {
        SyncedProduct {
            id: "prod_123".to_string(),
            name: "Standard".to_string(),
            description: None,
            active: true,
            metadata: HashMap::new(),
            created: None,
            prices,
        }
    }

    #[test]
    fn test_strict_single_match() {
        let product = product(vec![
            price("price_month", PlanInterval::Month, true),
            price("price_year", PlanInterval::Year, true),
            price("price_year_old", PlanInterval::Year, false),
        ]);

        let selected = select_price(&product, PlanInterval::Year, PriceLookup::Strict).unwrap();
        assert_eq!(selected.unwrap().id, "price_year");
    }

    #[test]
    fn test_strict_no_match_is_error() {
        let product = product(vec![price("price_month", PlanInterval::Month, true)]);

        let err = select_price(&product, PlanInterval::Year, PriceLookup::Strict).unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, TierError::ConfigurationError { .. }));
        assert!(message.contains("Unable to select a \"year\" plan"));
        assert!(message.contains("found 0"));
        assert!(message.contains("billing.active_intervals"));
    }

    #[test]
    fn test_strict_multiple_matches_is_error() {
        let product = product(vec![
            price("price_a", PlanInterval::Month, true),
            price("price_b", PlanInterval::Month, true),
            price("price_c", PlanInterval::Month, true),
        ]);

        let err = select_price(&product, PlanInterval::Month, PriceLookup::Strict).unwrap_err();
        assert!(err.to_string().contains("found 3"));
    }

    #[test]
    fn test_lenient_returns_none() {
        let empty = product(vec![]);
        assert!(select_price(&empty, PlanInterval::Month, PriceLookup::Lenient)
            .unwrap()
            .is_none());

        let ambiguous = product(vec![
            price("price_a", PlanInterval::Month, true),
            price("price_b", PlanInterval::Month, true),
        ]);
        assert!(select_price(&ambiguous, PlanInterval::Month, PriceLookup::Lenient)
            .unwrap()
            .is_none());
    }
}
