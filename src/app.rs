//! Per-invocation application context.

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::output::Projector;
use crate::storage::{Store, StoreOptions};

/// Everything a command needs: resolved config and how to reach the store.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub store_options: StoreOptions,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        Ok(Self::new(config))
    }

    #[must_use]
    pub fn new(config: Config) -> Self {
        let store_options = StoreOptions::from_config(&config.store);
        Self {
            config,
            store_options,
        }
    }

    /// Open the store for a query; fails if `build` has not run.
    pub fn open_store(&self) -> Result<Store> {
        Store::open(&self.store_options)
    }

    /// Destroy and recreate the store.
    pub fn reset_store(&self) -> Result<Store> {
        Store::reset(&self.store_options)
    }

    #[must_use]
    pub fn projector(&self) -> Projector {
        Projector::new(&self.config.output)
    }
}
