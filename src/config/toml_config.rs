use crate::domain::model::{PlanInterval, TierDefinition};
use crate::domain::ports::TierConfigProvider;
use crate::utils::error::{Result, TierError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TIERS_TOML: &str = include_str!("default_tiers.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierConfig {
    #[serde(default)]
    pub billing: BillingConfig,
    #[serde(default)]
    pub tiers: Vec<TierDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    /// Intervals offered to customers. The first one is the default.
    #[serde(default = "default_active_intervals")]
    pub active_intervals: Vec<PlanInterval>,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            active_intervals: default_active_intervals(),
        }
    }
}

fn default_active_intervals() -> Vec<PlanInterval> {
    vec![PlanInterval::Year, PlanInterval::Month]
}

impl TierConfig {
    /// Loads the tier table from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TierError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| TierError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// The Starter / Standard / Premium table shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(DEFAULT_TIERS_TOML)
    }

    /// Replaces `${VAR}` placeholders (e.g. `${STANDARD_PRODUCT_ID}`) with environment values.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        result.to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.billing.active_intervals.is_empty() {
            return Err(TierError::InvalidConfigValueError {
                field: "billing.active_intervals".to_string(),
                value: "[]".to_string(),
                reason: "At least one interval must be active".to_string(),
            });
        }

        validation::validate_unique(
            "billing.active_intervals",
            self.billing.active_intervals.iter().map(PlanInterval::as_str),
        )?;

        for tier in &self.tiers {
            validation::validate_non_empty_string("tiers.slug", &tier.slug)?;
            validation::validate_non_empty_string("tiers.name", &tier.name)?;
        }

        validation::validate_unique("tiers.slug", self.tiers.iter().map(|t| t.slug.as_str()))?;
        validation::validate_unique(
            "tiers.product_id",
            self.tiers
                .iter()
                .map(|t| t.product_id.as_str())
                .filter(|id| !id.is_empty()),
        )?;

        let defaults: Vec<&str> = self
            .tiers
            .iter()
            .filter(|t| t.is_default)
            .map(|t| t.slug.as_str())
            .collect();
        if defaults.len() > 1 {
            return Err(TierError::InvalidConfigValueError {
                field: "tiers.is_default".to_string(),
                value: defaults.join(", "),
                reason: "Only one tier can be the default".to_string(),
            });
        }

        Ok(())
    }
}

impl TierConfigProvider for TierConfig {
    fn tiers(&self) -> &[TierDefinition] {
        &self.tiers
    }

    fn active_intervals(&self) -> &[PlanInterval] {
        &self.billing.active_intervals
    }
}

impl Validate for TierConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
