//! Application state shared across API handlers

use std::sync::Arc;

use farmland_core::{Address, AppConfig, LedgerError};
use farmland_runtime::{Call, Chain, Receipt};
use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard};

/// Errors that can occur while building the API state
#[derive(Debug, Error)]
pub enum StateError {
    /// Genesis could not be built from the configuration
    #[error("Genesis failed: {0}")]
    Genesis(#[from] farmland_core::Error),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    chain: RwLock<Chain>,
}

impl AppState {
    /// Run genesis from `config` and wrap the resulting chain
    pub fn new(config: AppConfig) -> Result<Self, StateError> {
        let chain = Chain::genesis(&config.genesis)?;
        Ok(Self::with_chain(config, chain))
    }

    /// Wrap an existing chain
    pub fn with_chain(config: AppConfig, chain: Chain) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                chain: RwLock::new(chain),
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Read access to the chain. Held guards block submissions.
    pub async fn chain(&self) -> RwLockReadGuard<'_, Chain> {
        self.inner.chain.read().await
    }

    /// Submit a transaction under the write lock
    pub async fn submit(&self, caller: Address, call: Call) -> Result<Receipt, LedgerError> {
        let mut chain = self.inner.chain.write().await;
        chain.submit(caller, call)
    }
}
