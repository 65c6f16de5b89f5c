//! Configuration management for breedctl.
//!
//! Configuration is layered, later sources overriding earlier ones:
//!
//! 1. Defaults from the `Default` implementations below
//! 2. The YAML file named by `-f/--config` (or `BREEDCTL_CONFIG`, default `config.yaml`)
//! 3. `BREEDCTL_`-prefixed environment variables, with `__` separating nested keys
//!    (e.g. `BREEDCTL_DATABASE__POOL__MAX_CONNECTIONS=20`)
//! 4. `DATABASE_URL`, which replaces `database.url`
//!
//! ```yaml
//! host: 0.0.0.0
//! port: 5000
//! database:
//!   backend: postgres
//!   url: postgres://localhost/breedctl
//! import:
//!   csv_path: ./breeds.csv
//! ```

use anyhow::{anyhow, bail};
use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "BREEDCTL_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Set from the raw `DATABASE_URL` environment variable and folded into `database.url`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    /// Storage backend settings
    pub database: DatabaseConfig,
    /// Bulk import settings
    pub import: ImportConfig,
}

/// Which store backs the catalogue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process-local storage, lost on restart
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    /// Connection string, required for the postgres backend
    pub url: Option<String>,
    pub pool: PoolSettings,
}

/// Database connection pool configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolSettings {
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of idle connections to maintain
    pub min_connections: u32,
    /// Maximum time to wait for a connection (seconds)
    pub acquire_timeout_secs: u64,
    /// Time before idle connections are closed (seconds, 0 = never)
    pub idle_timeout_secs: u64,
    /// Maximum lifetime of a connection (seconds, 0 = never)
    pub max_lifetime_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 0,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        }
    }
}

impl PoolSettings {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_secs > 0).then(|| Duration::from_secs(self.idle_timeout_secs))
    }

    pub fn max_lifetime(&self) -> Option<Duration> {
        (self.max_lifetime_secs > 0).then(|| Duration::from_secs(self.max_lifetime_secs))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    /// CSV file imported when `POST /import-breeds` has an empty body
    pub csv_path: PathBuf,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("./breeds.csv"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            database_url: None,
            database: DatabaseConfig::default(),
            import: ImportConfig::default(),
        }
    }
}

impl Config {
    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("BREEDCTL_").ignore(&["CONFIG"]).split("__"))
            .merge(Env::raw().only(&["DATABASE_URL"]))
    }

    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let mut config: Self = Self::figment(args).extract()?;

        if let Some(url) = config.database_url.take() {
            config.database.url = Some(url);
        }

        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.database.backend == StorageBackend::Postgres
            && self.database.url.as_deref().is_none_or(|url| url.trim().is_empty())
        {
            bail!("database.url (or DATABASE_URL) is required when database.backend is postgres");
        }

        let pool = &self.database.pool;
        if pool.max_connections == 0 {
            bail!("database.pool.max_connections must be greater than 0");
        }
        if pool.min_connections > pool.max_connections {
            return Err(anyhow!(
                "database.pool.min_connections ({}) cannot exceed max_connections ({})",
                pool.min_connections,
                pool.max_connections
            ));
        }

        if self.import.csv_path.as_os_str().is_empty() {
            bail!("import.csv_path must not be empty");
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
