//! Car rental application library
//!
//! Hosts the application modules and the bootstrap sequence shared by the
//! `rental-app` binary and the CLI.

pub mod modules;
pub mod utils;

use anyhow::Context;
use rental_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Build a registry with every application module registered
pub fn build_registry(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings).context("failed to register modules")?;
    Ok(registry)
}

/// Run the application until a shutdown signal arrives.
///
/// Modules are initialized and started before the server binds and stopped
/// after it drains.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry(&settings)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;
    tracing::info!(modules = registry.module_count(), "rental-app bootstrap complete");

    let served = rental_http::start_server(&registry, &settings).await;

    registry.stop_modules().await?;
    served
}
