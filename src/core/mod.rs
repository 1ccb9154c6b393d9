pub mod catalog;
pub mod intervals;
pub mod joiner;
pub mod prices;
pub mod registry;
pub mod render;
pub mod view;

pub use crate::domain::model::{PlanInterval, SyncedPrice, SyncedProduct, TierDefinition};
pub use crate::domain::ports::{ProductStore, TierConfigProvider};
pub use crate::utils::error::Result;
