pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::catalog::{CatalogSnapshot, JsonCatalog};
pub use config::toml_config::TierConfig;
pub use core::{
    catalog::{CheckReport, TierCatalog},
    prices::PriceLookup,
    registry::TierRegistry,
    view::TierView,
};
pub use utils::error::{Result, TierError};
