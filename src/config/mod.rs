pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "plan-tiers")]
#[command(about = "Render subscription tiers from synced billing products and prices")]
pub struct CliConfig {
    /// Catalog snapshot written by the billing sync (JSON)
    #[arg(long, default_value = "./billing-catalog.json")]
    pub catalog: String,

    /// Tier configuration (TOML); the built-in tiers are used when omitted
    #[arg(long)]
    pub tiers: Option<String>,

    /// Render only the tier for this billing product id
    #[arg(long, conflicts_with_all = ["check", "intervals"])]
    pub product: Option<String>,

    /// Strictly check that every tier has exactly one price per active interval
    #[arg(long, conflicts_with = "intervals")]
    pub check: bool,

    /// Print the active interval descriptors instead of tiers
    #[arg(long)]
    pub intervals: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("catalog", &self.catalog)?;
        if let Some(tiers) = &self.tiers {
            validate_path("tiers", tiers)?;
        }
        Ok(())
    }
}
