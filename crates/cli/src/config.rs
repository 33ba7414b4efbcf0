use anyhow::Result;
use clap::Args;
use confique::{Config, Layer};
use serde::Serialize;
use std::path::Path;

/// Harness configuration, layered as: command line, then `SEATLEDGER_*`
/// environment variables, then the TOML config file, then defaults.
#[derive(Config, Clone, Debug, Serialize)]
pub struct LedgerConfig {
    /// Identity that owns the ledger and may submit results
    #[config(env = "SEATLEDGER_AUTHORITY", default = "authority")]
    pub authority: String,

    /// Finalize the election after the last result is submitted
    #[config(env = "SEATLEDGER_FINALIZE", default = false)]
    pub finalize: bool,

    /// Log filter directive (e.g. "info" or "seatledger_core=debug")
    #[config(env = "SEATLEDGER_LOG", default = "info")]
    pub log_filter: String,
}

/// Configuration given on the command line. Unset values fall through to the
/// lower layers.
#[derive(Args, Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Identity that owns the ledger and may submit results
    #[arg(long)]
    pub authority: Option<String>,

    /// Log filter directive
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl ConfigOverrides {
    fn into_partial(self) -> <LedgerConfig as Config>::Layer {
        let mut partial = <LedgerConfig as Config>::Layer::empty();
        partial.authority = self.authority;
        partial.log_filter = self.log_filter;
        partial
    }
}

impl LedgerConfig {
    /// Resolve the configuration from every layer. A missing config file is
    /// not an error.
    pub fn resolve(overrides: ConfigOverrides, path: impl AsRef<Path>) -> Result<Self> {
        Self::load_layers(overrides, path.as_ref(), true)
    }

    /// Like [`LedgerConfig::resolve`], but ignores the environment.
    pub fn resolve_without_env(overrides: ConfigOverrides, path: impl AsRef<Path>) -> Result<Self> {
        Self::load_layers(overrides, path.as_ref(), false)
    }

    fn load_layers(overrides: ConfigOverrides, path: &Path, with_env: bool) -> Result<Self> {
        let mut builder = Self::builder().preloaded(overrides.into_partial());
        if with_env {
            builder = builder.env();
        }
        let config = builder.file(path).load()?;
        Ok(config)
    }
}
