//! API configuration

use core_kernel::{CoreError, Currency};
use domain_expense::{SplitPolicy, UnknownMemberPolicy, DEFAULT_TOLERANCE};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Currency every group is kept in
    pub currency: Currency,
    /// What to do with expenses naming members outside the roster
    pub unknown_member_policy: UnknownMemberPolicy,
    /// How expense amounts are divided
    pub split_policy: SplitPolicy,
    /// Largest residual accepted when planning settlements
    pub settlement_tolerance: Decimal,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            currency: Currency::default(),
            unknown_member_policy: UnknownMemberPolicy::default(),
            split_policy: SplitPolicy::default(),
            settlement_tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    ///
    /// Every field can be set with an `API_` prefixed variable, e.g.
    /// `API_PORT=9000` or `API_SPLIT_POLICY=minor_units`. Unset fields keep
    /// their defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Rejects settings the server cannot run with
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.settlement_tolerance.is_sign_negative() {
            return Err(CoreError::configuration(format!(
                "settlement_tolerance must not be negative, got {}",
                self.settlement_tolerance
            )));
        }
        if self.host.trim().is_empty() {
            return Err(CoreError::configuration("host must not be empty"));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
