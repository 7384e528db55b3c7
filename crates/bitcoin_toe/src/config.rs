//! Application configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable overriding [`ChainConfig::account`].
pub const ACCOUNT_ENV: &str = "BITCOIN_TOE_ACCOUNT";

/// Environment variable overriding [`ChainConfig::wallet_url`].
pub const WALLET_URL_ENV: &str = "BITCOIN_TOE_WALLET_URL";

/// Top-level configuration, loaded from TOML.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Id counter start. The first game gets this value plus one.
    #[serde(default = "default_initial_game_id")]
    initial_game_id: u64,

    /// Contract and wallet settings.
    #[serde(default)]
    chain: ChainConfig,

    /// Game delays.
    #[serde(default)]
    timing: TimingConfig,
}

/// Where transactions go and who signs them.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Network name, informational.
    #[serde(default = "default_network")]
    network: String,

    /// Address the game module is published under.
    #[serde(default = "default_module_address")]
    module_address: String,

    /// Name of the game module.
    #[serde(default = "default_module_name")]
    module_name: String,

    /// Base URL of the wallet signing bridge.
    #[serde(default = "default_wallet_url")]
    wallet_url: String,

    /// Connected wallet account. Without one no transaction is sent.
    #[serde(default)]
    account: Option<String>,

    /// Per-request timeout.
    #[serde(default = "default_request_timeout_ms")]
    request_timeout_ms: u64,
}

/// Delays before the computer replies and before a finished game moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Delay before the opponent's move.
    #[serde(default = "default_opponent_delay_ms")]
    opponent_delay_ms: u64,

    /// Delay before a won game reloads or a drawn board resets.
    #[serde(default = "default_end_of_game_delay_ms")]
    end_of_game_delay_ms: u64,
}

fn default_initial_game_id() -> u64 {
    1005
}

fn default_network() -> String {
    "testnet".to_string()
}

fn default_module_address() -> String {
    "0x34377ce2dff9245600c983f9675f4f86a86fc574405c862c4fb33bc3374da117".to_string()
}

fn default_module_name() -> String {
    "BitcoinToe5".to_string()
}

fn default_wallet_url() -> String {
    "http://127.0.0.1:8790".to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_opponent_delay_ms() -> u64 {
    500
}

fn default_end_of_game_delay_ms() -> u64 {
    2000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            initial_game_id: default_initial_game_id(),
            chain: ChainConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            module_address: default_module_address(),
            module_name: default_module_name(),
            wallet_url: default_wallet_url(),
            account: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            opponent_delay_ms: default_opponent_delay_ms(),
            end_of_game_delay_ms: default_end_of_game_delay_ms(),
        }
    }
}

impl TimingConfig {
    /// Creates timing settings.
    pub fn new(opponent_delay_ms: u64, end_of_game_delay_ms: u64) -> Self {
        Self {
            opponent_delay_ms,
            end_of_game_delay_ms,
        }
    }

    /// Opponent delay as a [`Duration`].
    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }

    /// End-of-game delay as a [`Duration`].
    pub fn end_of_game_delay(&self) -> Duration {
        Duration::from_millis(self.end_of_game_delay_ms)
    }
}

impl ChainConfig {
    /// Fully qualified entry function name, `<address>::<module>::<function>`.
    pub fn entry_function(&self, function: &str) -> String {
        format!("{}::{}::{}", self.module_address, self.module_name, function)
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            network = %config.chain.network,
            has_account = config.chain.account.is_some(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads the file if it exists, otherwise defaults, then applies
    /// environment overrides.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applies `BITCOIN_TOE_*` overrides from `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(account) = lookup(ACCOUNT_ENV).filter(|a| !a.trim().is_empty()) {
            debug!("Account overridden from environment");
            self.chain.account = Some(account);
        }
        if let Some(url) = lookup(WALLET_URL_ENV).filter(|u| !u.trim().is_empty()) {
            debug!(wallet_url = %url, "Wallet URL overridden from environment");
            self.chain.wallet_url = url;
        }
    }

    /// Serializes to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Replaces the timing section.
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
