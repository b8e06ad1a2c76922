use std::path::PathBuf;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;
use thiserror::Error;

use rbt_cloud::{CloudConfig, CloudError};
use rbt_core::RetryPolicy;
use rbt_observe::LoggerConfig;
use rbt_report::NotifyConfig;

const DEFAULT_CONFIG: &str = include_str!("default.toml");

/// Optional override file, looked up in the working directory.
pub const CONFIG_FILE: &str = "rbt.toml";

/// Bare variable names understood for compatibility with older `.env` setups.
const LEGACY_ENV: [&str; 4] = [
    "API_KEY",
    "TWILIO_ACCOUNT_SID",
    "TWILIO_AUTH_TOKEN",
    "TWILIO_WHATSAPP_NUMBER",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
    #[error("invalid cloud settings: {0}")]
    Cloud(#[from] CloudError),
    #[error("invalid policy: {0}")]
    Policy(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Batch names, processed in this order.
    pub batches: Vec<String>,
    pub batch_dir: PathBuf,
    pub log_dir: PathBuf,
    pub logger: LoggerConfig,
    pub cloud: CloudConfig,
    pub policy: PolicyConfig,
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    pub first_check_delay_secs: u64,
    pub second_check_delay_secs: u64,
    pub recheck_statuses: Vec<String>,
    pub recheck_on_query_failure: bool,
}

impl PolicyConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            Duration::from_secs(self.first_check_delay_secs),
            Duration::from_secs(self.second_check_delay_secs),
        )
        .with_recheck_statuses(self.recheck_statuses.iter().cloned())
        .with_recheck_on_query_failure(self.recheck_on_query_failure)
    }
}

impl AppConfig {
    /// Defaults, then `rbt.toml`, then the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let figment = Figment::from(Toml::string(DEFAULT_CONFIG))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::raw().only(&LEGACY_ENV).map(|k| legacy_key(k.as_str()).into()))
            .merge(Env::prefixed("RBT__").map(|p| p.as_str().replace("__", ".").into()));
        Self::from_figment(figment)
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let cfg: AppConfig = figment.extract().map_err(Box::new)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cloud.validate()?;
        if self.policy.second_check_delay_secs < self.policy.first_check_delay_secs {
            return Err(ConfigError::Policy(
                "second check delay must not be shorter than the first".into(),
            ));
        }
        Ok(())
    }
}

fn legacy_key(var: &str) -> &'static str {
    match var.to_ascii_uppercase().as_str() {
        "API_KEY" => "cloud.api_key",
        "TWILIO_ACCOUNT_SID" => "notify.account_sid",
        "TWILIO_AUTH_TOKEN" => "notify.auth_token",
        "TWILIO_WHATSAPP_NUMBER" => "notify.from",
        _ => "unused",
    }
}
