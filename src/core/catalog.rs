use crate::core::joiner::{join_active_tiers, view_for_product};
use crate::core::registry::TierRegistry;
use crate::core::view::TierView;
use crate::domain::model::{IntervalDescriptor, PlanInterval};
use crate::domain::ports::ProductStore;
use crate::utils::error::{Result, TierError};
use serde::Serialize;

/// Everything `check` found wrong with the configured tiers.
#[derive(Debug, Default, Serialize)]
pub struct CheckReport {
    pub tiers_checked: usize,
    pub problems: Vec<String>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

pub struct TierCatalog<'a, S: ProductStore> {
    registry: &'a TierRegistry,
    store: &'a S,
}

impl<'a, S: ProductStore> TierCatalog<'a, S> {
    pub fn new(registry: &'a TierRegistry, store: &'a S) -> Self {
        Self { registry, store }
    }

    pub fn active_intervals(&self) -> &'a [PlanInterval] {
        self.registry.active_intervals()
    }

    pub fn interval_descriptors(&self) -> Vec<IntervalDescriptor> {
        self.registry.interval_descriptors()
    }

    pub fn views(&self) -> Result<Vec<TierView<'a>>> {
        join_active_tiers(self.registry, self.store)
    }

    pub fn render_all(&self) -> Result<Vec<serde_json::Value>> {
        let views = self.views()?;
        tracing::info!("Rendering {} tiers", views.len());

        views
            .iter()
            .map(|view| view.to_value(self.active_intervals()))
            .collect()
    }

    /// Renders the synced product `product_id`, configured or not.
    pub fn render_product(&self, product_id: &str) -> Result<serde_json::Value> {
        let product = self.store.get_product(product_id).ok_or_else(|| {
            TierError::configuration(format!(
                "No product with ID \"{}\" found in the synced billing catalog.",
                product_id
            ))
        })?;

        view_for_product(self.registry, product).to_value(self.active_intervals())
    }

    /// Strict price selection for every tier and active interval.
    ///
    /// A join failure aborts the check; price problems are collected.
    pub fn check(&self) -> Result<CheckReport> {
        let views = self.views()?;
        let mut report = CheckReport {
            tiers_checked: views.len(),
            problems: Vec::new(),
        };

        for view in &views {
            for &interval in self.active_intervals() {
                match view.price(interval) {
                    Ok(price) => tracing::debug!(
                        "Tier '{}' bills every {} with {}",
                        view.tier.slug,
                        interval,
                        price.id
                    ),
                    Err(e) => {
                        tracing::warn!("Tier '{}': {}", view.tier.slug, e);
                        report.problems.push(e.user_friendly_message());
                    }
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::JsonCatalog;

    const CATALOG: &str = r#"
{
  "products": [
    {
      "id": "prod_starter",
      "name": "Starter",
      "prices": [
        {"id": "price_s_y", "unit_amount": 5000, "currency": "usd", "recurring": {"interval": "year"}},
        {"id": "price_s_m", "unit_amount": 500, "currency": "usd", "recurring": {"interval": "month"}}
      ]
    },
    {
      "id": "prod_standard",
      "name": "Standard",
      "prices": [
        {"id": "price_st_y", "unit_amount": 10000, "currency": "usd", "recurring": {"interval": "year"}}
      ]
    },
    {"id": "prod_unlisted", "name": "Unlisted", "prices": []}
  ]
}
"#;

    fn registry() -> TierRegistry {
        let config = crate::config::toml_config::TierConfig::from_toml_str(
            r#"
[billing]
active_intervals = ["year", "month"]

[[tiers]]
product_id = "prod_starter"
slug = "starter"
name = "Starter"

[[tiers]]
product_id = "prod_standard"
slug = "standard"
name = "Standard"
is_default = true
"#,
        )
        .unwrap();
        TierRegistry::from_config(&config)
    }

    #[test]
    fn test_render_all() {
        let registry = registry();
        let store = JsonCatalog::from_json_str(CATALOG).unwrap();
        let catalog = TierCatalog::new(&registry, &store);

        let rendered = catalog.render_all().unwrap();

        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[1]["metadata"]["slug"], "standard");
        assert_eq!(rendered[1]["active_prices"]["year"]["id"], "price_st_y");
        assert!(rendered[1]["active_prices"]["month"].is_null());
    }

    #[test]
    fn test_check_collects_missing_prices() {
        let registry = registry();
        let store = JsonCatalog::from_json_str(CATALOG).unwrap();
        let catalog = TierCatalog::new(&registry, &store);

        let report = catalog.check().unwrap();

        assert_eq!(report.tiers_checked, 2);
        assert!(!report.is_ok());
        assert_eq!(report.problems.len(), 1);
        assert!(report.problems[0].contains("\"month\" plan for Standard"));
    }

    #[test]
    fn test_render_unlisted_product() {
        let registry = registry();
        let store = JsonCatalog::from_json_str(CATALOG).unwrap();
        let catalog = TierCatalog::new(&registry, &store);

        let rendered = catalog.render_product("prod_unlisted").unwrap();
        assert_eq!(rendered["metadata"]["slug"], "unlisted");

        assert!(catalog.render_product("prod_nope").is_err());
    }
}
