use crate::core::registry::TierRegistry;
use crate::core::view::TierView;
use crate::domain::model::SyncedProduct;
use crate::domain::ports::ProductStore;
use crate::utils::error::{Result, TierError};
use std::borrow::Cow;

/// Pairs every configured tier with its synced product.
///
/// Without configured tiers, every active synced product is shown with
/// derived metadata instead.
pub fn join_active_tiers<'a, S: ProductStore>(
    registry: &'a TierRegistry,
    store: &'a S,
) -> Result<Vec<TierView<'a>>> {
    if !registry.is_empty() {
        return registry
            .tiers()
            .iter()
            .map(|tier| {
                let product = store.get_product(&tier.product_id).ok_or_else(|| {
                    TierError::configuration(format!(
                        "No product with ID \"{}\" found! This is coming from the \"{}\" tier in the \
                         tier configuration. Please make sure that every tier has a valid product_id \
                         and that you have synced your products with the billing provider.",
                        tier.product_id, tier.name
                    ))
                })?;
                Ok(TierView::new(product, Cow::Borrowed(tier)))
            })
            .collect();
    }

    let active_products = store.active_products();
    if active_products.is_empty() {
        return Err(TierError::configuration(
            "It looks like you do not have any products in your billing catalog. In order to use \
             subscriptions you first have to set up billing with your provider and sync it with \
             your local data.",
        ));
    }

    tracing::debug!(
        "No tiers configured, using {} active synced products",
        active_products.len()
    );

    Ok(active_products
        .into_iter()
        .map(|product| view_for_product(registry, product))
        .collect())
}

pub fn view_for_product<'a>(registry: &'a TierRegistry, product: &'a SyncedProduct) -> TierView<'a> {
    TierView::new(product, registry.tier_for_product(product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::JsonCatalog;
    use crate::domain::model::{PlanInterval, TierDefinition};
    use std::collections::{BTreeMap, HashMap};

    fn product(id: &str, name: &str, active: bool) -> SyncedProduct {
        SyncedProduct {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            active,
            metadata: HashMap::new(),
            created: None,
            prices: vec![],
        }
    }

    fn tier(product_id: &str, slug: &str) -> TierDefinition {
        TierDefinition {
            product_id: product_id.to_string(),
            slug: slug.to_string(),
            name: slug.to_string(),
            features: vec![],
            price_displays: BTreeMap::new(),
            description: String::new(),
            is_default: false,
        }
    }

    fn registry(tiers: Vec<TierDefinition>) -> TierRegistry {
        TierRegistry::new(tiers, vec![PlanInterval::Year, PlanInterval::Month])
    }

    #[test]
    fn test_configured_tiers_keep_order_and_ids() {
        let store = JsonCatalog::from(vec![
            product("prod_premium", "Premium", true),
            product("prod_starter", "Starter", true),
        ]);
        let registry = registry(vec![
            tier("prod_starter", "starter"),
            tier("prod_premium", "premium"),
        ]);

        let views = join_active_tiers(&registry, &store).unwrap();

        let ids: Vec<&str> = views.iter().map(|v| v.product_id()).collect();
        assert_eq!(ids, vec!["prod_starter", "prod_premium"]);
        assert_eq!(views[0].tier.slug, "starter");
    }

    #[test]
    fn test_configured_tier_may_point_at_inactive_product() {
        let store = JsonCatalog::from(vec![product("prod_legacy", "Legacy", false)]);
        let registry = registry(vec![tier("prod_legacy", "legacy")]);

        assert_eq!(join_active_tiers(&registry, &store).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_product_names_id_and_tier() {
        let store = JsonCatalog::from(vec![product("prod_starter", "Starter", true)]);
        let registry = registry(vec![
            tier("prod_starter", "starter"),
            tier("prod_gone", "premium"),
        ]);

        let err = join_active_tiers(&registry, &store).unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, TierError::ConfigurationError { .. }));
        assert!(message.contains("\"prod_gone\""));
        assert!(message.contains("\"premium\" tier"));
    }

    #[test]
    fn test_empty_registry_falls_back_to_active_products() {
        let store = JsonCatalog::from(vec![
            product("prod_a", "Alpha Plan", true),
            product("prod_b", "Beta", false),
        ]);
        let registry = registry(vec![]);

        let views = join_active_tiers(&registry, &store).unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].product_id(), "prod_a");
        assert_eq!(views[0].tier.slug, "alpha-plan");
    }

    #[test]
    fn test_empty_registry_without_active_products_is_error() {
        let store = JsonCatalog::from(vec![product("prod_b", "Beta", false)]);
        let registry = registry(vec![]);

        let err = join_active_tiers(&registry, &store).unwrap_err();
        assert!(err.to_string().contains("do not have any products"));
    }

    #[test]
    fn test_view_for_product_uses_registry_when_listed() {
        let listed = product("prod_starter", "Starter (legacy name)", true);
        let unlisted = product("prod_other", "Other", true);
        let registry = registry(vec![tier("prod_starter", "starter")]);

        assert_eq!(view_for_product(&registry, &listed).tier.slug, "starter");
        assert_eq!(view_for_product(&registry, &unlisted).tier.slug, "other");
    }
}
