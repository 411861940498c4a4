//! Configuration loading for the pulldown explorer.
//! Reads pulldown.toml from the current directory or the path in PULLDOWN_CONFIG.
//! Every field has a default, so a missing file or section is not an error.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use pulldown_string::{StringDbSettings, STRING_API_URL};

pub const CONFIG_ENV: &str = "PULLDOWN_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "pulldown.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub string_db: StringDbConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// File the config was read from; `None` when running on defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host()       -> String { "127.0.0.1".to_string() }
fn default_port()       -> u16    { 8050 }
fn default_static_dir() -> String { concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), static_dir: default_static_dir() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: String,
}

fn default_data_path() -> String { "data/proteomics_lfc.csv.gz".to_string() }

impl Default for DataConfig {
    fn default() -> Self {
        Self { path: default_data_path() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StringDbConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_species")]
    pub species: u32,
    #[serde(default = "default_network_flavor")]
    pub network_flavor: String,
    #[serde(default = "default_caller_identity")]
    pub caller_identity: String,
    #[serde(default = "default_gene_limit")]
    pub gene_limit: usize,
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url()         -> String { STRING_API_URL.to_string() }
fn default_species()         -> u32    { 7227 }
fn default_network_flavor()  -> String { "confidence".to_string() }
fn default_caller_identity() -> String { "explodata".to_string() }
fn default_gene_limit()      -> usize  { pulldown_string::GENE_LIMIT }
fn default_pause_ms()        -> u64    { 500 }
fn default_timeout_secs()    -> u64    { 30 }

impl Default for StringDbConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            species: default_species(),
            network_flavor: default_network_flavor(),
            caller_identity: default_caller_identity(),
            gene_limit: default_gene_limit(),
            pause_ms: default_pause_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StringDbConfig {
    pub fn settings(&self) -> StringDbSettings {
        StringDbSettings {
            api_url: self.api_url.clone(),
            species: self.species,
            network_flavor: self.network_flavor.clone(),
            caller_identity: self.caller_identity.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize { 10 }

impl Default for TableConfig {
    fn default() -> Self {
        Self { page_size: default_page_size() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String { "info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

mod tests;

impl Config {
    /// Load configuration from pulldown.toml.
    /// Checks PULLDOWN_CONFIG env var first, then the current directory.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(path)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let mut config = Self::from_toml(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.table.page_size == 0 {
            anyhow::bail!("table.page_size must be at least 1");
        }
        if self.string_db.gene_limit == 0 {
            anyhow::bail!("string_db.gene_limit must be at least 1");
        }
        Ok(())
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
