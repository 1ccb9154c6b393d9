use anyhow::Context;
use clap::Parser;
use plan_tiers::utils::error::ErrorSeverity;
use plan_tiers::utils::{logger, validation::Validate};
use plan_tiers::{CliConfig, JsonCatalog, TierCatalog, TierConfig, TierError, TierRegistry};
use serde::Serialize;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let tier_config = match load_tier_config(&config) {
        Ok(tier_config) => tier_config,
        Err(e) => exit_with(&e),
    };
    let registry = TierRegistry::from_config(&tier_config);
    tracing::info!(
        "Loaded {} tiers, active intervals: {:?}",
        registry.tiers().len(),
        registry.active_intervals()
    );

    if config.intervals {
        return print_json(&registry.interval_descriptors(), config.pretty);
    }

    let store = match JsonCatalog::from_file(&config.catalog) {
        Ok(store) => store,
        Err(e) => exit_with(&e),
    };
    match store.synced_at() {
        Some(synced_at) => tracing::info!("Catalog last synced at {}", synced_at),
        None => tracing::warn!("Catalog snapshot has no synced_at timestamp"),
    }

    let catalog = TierCatalog::new(&registry, &store);

    if config.check {
        let report = match catalog.check() {
            Ok(report) => report,
            Err(e) => exit_with(&e),
        };
        print_json(&report, config.pretty)?;

        if !report.is_ok() {
            tracing::error!(
                "❌ {} pricing problems across {} tiers",
                report.problems.len(),
                report.tiers_checked
            );
            std::process::exit(1);
        }
        tracing::info!("✅ All {} tiers have a price for every active interval", report.tiers_checked);
        return Ok(());
    }

    let rendered = match &config.product {
        Some(product_id) => catalog.render_product(product_id).map(|v| vec![v]),
        None => catalog.render_all(),
    };

    match rendered {
        Ok(rendered) => print_json(&rendered, config.pretty),
        Err(e) => exit_with(&e),
    }
}

fn load_tier_config(config: &CliConfig) -> plan_tiers::Result<TierConfig> {
    let tier_config = match &config.tiers {
        Some(path) => {
            tracing::info!("📁 Loading tiers from: {}", path);
            TierConfig::from_file(path)?
        }
        None => {
            tracing::info!("Using built-in tiers");
            TierConfig::builtin()?
        }
    };

    tier_config.validate()?;
    Ok(tier_config)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("failed to encode output")?;

    println!("{}", encoded);
    Ok(())
}

fn exit_with(e: &TierError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
