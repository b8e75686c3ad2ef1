//! # Configuration
//!
//! Runtime settings for the ledger service. Values are resolved in three
//! layers: built-in defaults, an optional YAML file named by
//! `FAMILY_LEDGER_CONFIG`, then individual `FAMILY_LEDGER_*` environment
//! variables.

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use tracing::warn;

use crate::domain::auth::MAX_TOKEN_TTL_HOURS;

const CONFIG_FILE_ENV: &str = "FAMILY_LEDGER_CONFIG";
const ENV_PREFIX: &str = "FAMILY_LEDGER_";
const DEV_TOKEN_SECRET: &str = "dev_secret_change_me";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub token_secret: String,
    /// Token lifetime, between 1 hour and one year
    pub token_ttl_hours: i64,
    /// bcrypt work factor, 4 to 31
    pub password_hash_cost: u32,
    /// Allowed browser origin; any origin when unset
    pub cors_origin: Option<String>,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 4000)),
            database_url: "sqlite:family_ledger.db".to_string(),
            token_secret: String::new(),
            token_ttl_hours: 24 * 7,
            password_hash_cost: 10,
            cors_origin: None,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_sources(&vars)
    }

    /// Resolve configuration from an explicit variable map
    pub fn from_sources(vars: &HashMap<String, String>) -> Result<Self> {
        let mut config = match vars.get(CONFIG_FILE_ENV) {
            Some(path) => Self::from_yaml_file(Path::new(path))?,
            None => Self::default(),
        };
        config.apply_env(vars)?;
        config.validate()?;

        if config.token_secret.trim().is_empty() {
            warn!("No token secret configured, falling back to the development secret");
            config.token_secret = DEV_TOKEN_SECRET.to_string();
        }

        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    fn apply_env(&mut self, vars: &HashMap<String, String>) -> Result<()> {
        let get = |name: &str| vars.get(&format!("{}{}", ENV_PREFIX, name));

        if let Some(addr) = get("BIND_ADDR") {
            self.bind_addr = addr
                .parse()
                .with_context(|| format!("invalid {}BIND_ADDR: {}", ENV_PREFIX, addr))?;
        }
        if let Some(url) = get("DATABASE_URL") {
            self.database_url = url.clone();
        }
        if let Some(secret) = get("TOKEN_SECRET") {
            self.token_secret = secret.clone();
        }
        if let Some(hours) = get("TOKEN_TTL_HOURS") {
            self.token_ttl_hours = hours
                .parse()
                .with_context(|| format!("invalid {}TOKEN_TTL_HOURS: {}", ENV_PREFIX, hours))?;
        }
        if let Some(cost) = get("PASSWORD_HASH_COST") {
            self.password_hash_cost = cost
                .parse()
                .with_context(|| format!("invalid {}PASSWORD_HASH_COST: {}", ENV_PREFIX, cost))?;
        }
        if let Some(origin) = get("CORS_ORIGIN") {
            self.cors_origin = Some(origin.clone());
        }
        if let Some(filter) = get("LOG_FILTER") {
            self.log_filter = filter.clone();
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_TOKEN_TTL_HOURS).contains(&self.token_ttl_hours),
            "token_ttl_hours must be between 1 and {}, got {}",
            MAX_TOKEN_TTL_HOURS,
            self.token_ttl_hours
        );
        ensure!(
            (4..=31).contains(&self.password_hash_cost),
            "password_hash_cost must be between 4 and 31, got {}",
            self.password_hash_cost
        );
        Ok(())
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.token_secret == DEV_TOKEN_SECRET
    }

    /// Settings for in-process tests: cheap hashing and a fixed secret
    pub fn for_test() -> Self {
        Self {
            token_secret: "test-secret".to_string(),
            password_hash_cost: 4,
            ..Self::default()
        }
    }
}
