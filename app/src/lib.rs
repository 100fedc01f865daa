//! Farmland application library

use std::path::PathBuf;

use anyhow::Context;
use farmland_api::AppState;
use farmland_core::AppConfig;

/// Build the filter used when `RUST_LOG` does not override it
fn env_filter() -> anyhow::Result<tracing_subscriber::EnvFilter> {
    Ok(tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("farmland=debug".parse()?)
        .add_directive("liquidity_pool=debug".parse()?)
        .add_directive("info".parse()?))
}

/// Run the ledger node.
///
/// The only argument is an optional path to a JSON config file; without it
/// `$FARMLAND_CONFIG` is consulted, then built-in defaults.
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(env_filter()?).init();

    tracing::info!("Starting Farmland ledger");

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load(path.as_deref()).context("Failed to load configuration")?;

    tracing::info!(
        deployer = %config.genesis.deployer,
        rate = %config.genesis.pool.initial_rate,
        rate_scale = %config.genesis.pool.rate_scale,
        "Configuration loaded"
    );

    let state = AppState::new(config).context("Failed to build genesis state")?;
    {
        let chain = state.chain().await;
        if !chain.pool_is_authorized() {
            tracing::warn!(pool = %chain.pool().address(), "Pool cannot mint FLS");
        }
    }

    farmland_api::start_server(state)
        .await
        .context("API server failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        assert!(env_filter().is_ok());
    }
}
