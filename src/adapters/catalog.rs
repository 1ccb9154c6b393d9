use crate::domain::model::SyncedProduct;
use crate::domain::ports::ProductStore;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Products and prices as last written by the billing sync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub synced_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub products: Vec<SyncedProduct>,
}

/// In-memory [`ProductStore`] over a catalog snapshot.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    snapshot: CatalogSnapshot,
    index: HashMap<String, usize>,
}

impl JsonCatalog {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        let mut index = HashMap::with_capacity(snapshot.products.len());
        for (position, product) in snapshot.products.iter().enumerate() {
            if index.insert(product.id.clone(), position).is_some() {
                tracing::warn!("Duplicate product '{}' in catalog, keeping the last one", product.id);
            }
        }

        Self { snapshot, index }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let catalog = Self::from_json_str(&content)?;
        tracing::debug!(
            "Loaded {} products from {}",
            catalog.snapshot.products.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let snapshot: CatalogSnapshot = serde_json::from_str(content)?;
        Ok(Self::new(snapshot))
    }

    pub fn synced_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot.synced_at
    }

    pub fn products(&self) -> &[SyncedProduct] {
        &self.snapshot.products
    }
}

impl From<Vec<SyncedProduct>> for JsonCatalog {
    fn from(products: Vec<SyncedProduct>) -> Self {
        Self::new(CatalogSnapshot {
            synced_at: None,
            products,
        })
    }
}

impl ProductStore for JsonCatalog {
    fn get_product(&self, id: &str) -> Option<&SyncedProduct> {
        self.index
            .get(id)
            .and_then(|&position| self.snapshot.products.get(position))
    }

    /// Active products in snapshot order; a duplicated id yields only its last record.
    fn active_products(&self) -> Vec<&SyncedProduct> {
        self.snapshot
            .products
            .iter()
            .enumerate()
            .filter(|(position, product)| {
                product.active && self.index.get(&product.id) == Some(position)
            })
            .map(|(_, product)| product)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::TierError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATALOG: &str = r#"
{
  "synced_at": "2026-10-01T12:00:00Z",
  "products": [
    {"id": "prod_a", "name": "Alpha", "prices": []},
    {"id": "prod_b", "name": "Beta", "active": false}
  ]
}
"#;

    #[test]
    fn test_lookup_and_active_filter() {
        let catalog = JsonCatalog::from_json_str(CATALOG).unwrap();

        assert_eq!(catalog.get_product("prod_b").unwrap().name, "Beta");
        assert!(catalog.get_product("prod_missing").is_none());

        let active: Vec<&str> = catalog
            .active_products()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(active, vec!["prod_a"]);
        assert!(catalog.synced_at().is_some());
    }

    #[test]
    fn test_duplicate_product_id_is_listed_once() {
        let catalog = JsonCatalog::from_json_str(
            r#"{"products": [
                {"id": "p", "name": "Old Name"},
                {"id": "q", "name": "Other"},
                {"id": "p", "name": "New Name"}
            ]}"#,
        )
        .unwrap();

        let active: Vec<&str> = catalog
            .active_products()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(active, vec!["Other", "New Name"]);
        assert_eq!(catalog.get_product("p").unwrap().name, "New Name");
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let err = JsonCatalog::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, TierError::SerializationError(_)));
    }

    #[test]
    fn test_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(CATALOG.as_bytes()).unwrap();

        let catalog = JsonCatalog::from_file(temp_file.path()).unwrap();
        assert_eq!(catalog.products().len(), 2);
    }
}
