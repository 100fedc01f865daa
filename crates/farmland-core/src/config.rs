//! Configuration types for the Farmland ledger

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Address, Error, Rate, Result};

/// Environment variable consulted by [`AppConfig::load`] when no path is given
pub const CONFIG_ENV_VAR: &str = "FARMLAND_CONFIG";

/// HTTP API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_host")]
    pub host: String,

    #[serde(default = "default_api_port")]
    pub port: u16,
}

fn default_api_host() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    19080
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            port: default_api_port(),
        }
    }
}

/// Immutable token metadata set at deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadataConfig {
    pub name: String,
    pub symbol: String,
}

fn default_fls_metadata() -> TokenMetadataConfig {
    TokenMetadataConfig {
        name: "FarmlandStocks".to_string(),
        symbol: "FLS".to_string(),
    }
}

fn default_reserve_metadata() -> TokenMetadataConfig {
    TokenMetadataConfig {
        name: "USD Coin".to_string(),
        symbol: "USDC".to_string(),
    }
}

/// Liquidity pool parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Reserve units per FLS unit, multiplied by `rate_scale`
    #[serde(default = "default_initial_rate")]
    pub initial_rate: Rate,

    /// Fixed-point scale of the rate; `1` means an unscaled integer rate
    #[serde(default = "default_rate_scale")]
    pub rate_scale: Rate,
}

fn default_initial_rate() -> Rate {
    1
}

fn default_rate_scale() -> Rate {
    1
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_rate: default_initial_rate(),
            rate_scale: default_rate_scale(),
        }
    }
}

/// Contracts deployed when the chain starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// Deploys every contract; becomes token admin, reserve issuer and pool owner
    #[serde(default = "default_deployer")]
    pub deployer: Address,

    #[serde(default = "default_fls_metadata")]
    pub token: TokenMetadataConfig,

    #[serde(default = "default_reserve_metadata")]
    pub reserve: TokenMetadataConfig,

    #[serde(default)]
    pub pool: PoolConfig,

    /// Grant the pool `MINTER` on FLS as part of genesis
    #[serde(default = "default_authorize_pool")]
    pub authorize_pool: bool,
}

fn default_deployer() -> Address {
    Address::from_low_u64(1)
}

fn default_authorize_pool() -> bool {
    true
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            deployer: default_deployer(),
            token: default_fls_metadata(),
            reserve: default_reserve_metadata(),
            pool: PoolConfig::default(),
            authorize_pool: default_authorize_pool(),
        }
    }
}

impl GenesisConfig {
    /// Reject parameters no deployment could start from
    pub fn validate(&self) -> Result<()> {
        if self.deployer.is_zero() {
            return Err(Error::Config("deployer must not be the zero address".into()));
        }
        if self.pool.initial_rate == 0 {
            return Err(Error::Config("pool.initial_rate must be non-zero".into()));
        }
        if self.pool.rate_scale == 0 {
            return Err(Error::Config("pool.rate_scale must be non-zero".into()));
        }
        Ok(())
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub genesis: GenesisConfig,
}

impl AppConfig {
    /// Parse and validate a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: AppConfig =
            serde_json::from_str(&raw).map_err(|e| Error::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, else from `$FARMLAND_CONFIG`, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path: Option<PathBuf> = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.genesis.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.host, "127.0.0.1");
        assert_eq!(config.api.port, 19080);
        assert_eq!(config.genesis.token.symbol, "FLS");
        assert_eq!(config.genesis.reserve.symbol, "USDC");
        assert_eq!(config.genesis.pool.initial_rate, 1);
        assert_eq!(config.genesis.pool.rate_scale, 1);
        assert!(config.genesis.authorize_pool);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "genesis": { "pool": { "initial_rate": 1000000, "rate_scale": 1000000 } } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api.port, 19080);
        assert_eq!(config.genesis.pool.initial_rate, 1_000_000);
        assert_eq!(config.genesis.token.name, "FarmlandStocks");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.genesis.deployer, config.genesis.deployer);
    }

    #[test]
    fn test_validate_rejects_zero_rate_and_scale() {
        let mut config = AppConfig::default();
        config.genesis.pool.initial_rate = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = AppConfig::default();
        config.genesis.pool.rate_scale = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = AppConfig::default();
        config.genesis.deployer = Address::ZERO;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_from_file_reports_bad_json() {
        let path = std::env::temp_dir().join("farmland-config-bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let result = AppConfig::from_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}
