use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub server: Option<ServerSection>,
    #[serde(default)]
    pub logging: Option<LoggingSection>,
    #[serde(default)]
    pub database: Option<DatabaseSection>,
    #[serde(default)]
    pub cache: Option<CacheSection>,
    #[serde(default)]
    pub jobs: Option<JobsSection>,
}

#[derive(Debug, Deserialize)]
pub struct ServerSection {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub json: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSection {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub max_connections: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CacheSection {
    #[serde(default)]
    pub redis_url: Option<String>,
    #[serde(default)]
    pub list_ttl_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct JobsSection {
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default)]
    pub task_delay_secs: Option<u64>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Load a RawConfigFile from a path. The format is inferred from the extension: .toml, .yaml/.yml, .json
pub fn load_raw_from_file<P: AsRef<Path>>(path: P) -> Result<RawConfigFile, ConfigError> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());
    parse_config_str(&s, ext.as_deref())
}

fn parse_config_str(s: &str, ext: Option<&str>) -> Result<RawConfigFile, ConfigError> {
    match ext {
        #[cfg(feature = "toml")]
        Some("toml") => toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string())),
        #[cfg(feature = "yaml")]
        Some("yaml" | "yml") => {
            serde_yaml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
        }
        #[cfg(feature = "json")]
        Some("json") => serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string())),
        _ => parse_config_auto(s),
    }
}

/// Try each enabled format in turn when the extension gives no hint.
fn parse_config_auto(s: &str) -> Result<RawConfigFile, ConfigError> {
    #[cfg(feature = "yaml")]
    if let Ok(cfg) = serde_yaml::from_str(s) {
        return Ok(cfg);
    }

    #[cfg(feature = "toml")]
    if let Ok(cfg) = toml::from_str(s) {
        return Ok(cfg);
    }

    #[cfg(feature = "json")]
    if let Ok(cfg) = serde_json::from_str(s) {
        return Ok(cfg);
    }

    #[cfg(any(feature = "yaml", feature = "toml", feature = "json"))]
    {
        Err(ConfigError::Parse(
            "failed to parse config as any supported format".into(),
        ))
    }

    #[cfg(not(any(feature = "yaml", feature = "toml", feature = "json")))]
    {
        let _ = s;
        Err(ConfigError::Parse("no config format enabled".into()))
    }
}

/// Concrete application configuration with defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub jobs: JobsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheConfig {
    pub redis_url: Option<String>,
    pub list_ttl_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobsConfig {
    pub workers: usize,
    pub task_delay_secs: u64,
}

impl CacheConfig {
    #[inline]
    pub const fn list_ttl(&self) -> Duration {
        Duration::from_secs(self.list_ttl_secs)
    }
}

impl JobsConfig {
    #[inline]
    pub const fn task_delay(&self) -> Duration {
        Duration::from_secs(self.task_delay_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                json: false,
            },
            database: DatabaseConfig {
                url: "sqlite://bookshelf.sqlite".to_string(),
                max_connections: 10,
            },
            cache: CacheConfig {
                redis_url: None,
                list_ttl_secs: 60,
            },
            jobs: JobsConfig {
                workers: 4,
                task_delay_secs: 3,
            },
        }
    }
}

/// Helper macro to apply optional value if present
macro_rules! apply_opt {
    ($target:expr, $source:expr) => {
        if let Some(v) = $source {
            $target = v;
        }
    };
    ($target:expr, $source:expr, wrap) => {
        if let Some(v) = $source {
            $target = Some(v);
        }
    };
}

/// Load concrete `Config` from optional file and environment variables.
/// Environment variables take precedence over file values and defaults.
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<Config, ConfigError> {
    let mut cfg = Config::default();

    if let Some(p) = path {
        let raw = load_raw_from_file(p)?;
        if let Some(server) = raw.server {
            apply_opt!(cfg.server.host, server.host);
            apply_opt!(cfg.server.port, server.port);
        }
        if let Some(logging) = raw.logging {
            apply_opt!(cfg.logging.level, logging.level);
            apply_opt!(cfg.logging.json, logging.json);
        }
        if let Some(db) = raw.database {
            apply_opt!(cfg.database.url, db.url);
            apply_opt!(cfg.database.max_connections, db.max_connections);
        }
        if let Some(cache) = raw.cache {
            apply_opt!(cfg.cache.redis_url, cache.redis_url, wrap);
            apply_opt!(cfg.cache.list_ttl_secs, cache.list_ttl_secs);
        }
        if let Some(jobs) = raw.jobs {
            apply_opt!(cfg.jobs.workers, jobs.workers);
            apply_opt!(cfg.jobs.task_delay_secs, jobs.task_delay_secs);
        }
    }

    apply_env(&mut cfg)?;
    validate(&cfg)?;
    Ok(cfg)
}

fn apply_env(cfg: &mut Config) -> Result<(), ConfigError> {
    if let Some(host) = read_env("BOOKSHELF_HOST") {
        cfg.server.host = host;
    }
    if let Some(port) = read_env("BOOKSHELF_PORT") {
        cfg.server.port = parse_env("BOOKSHELF_PORT", &port)?;
    }
    if let Some(level) = read_env("BOOKSHELF_LOG_LEVEL") {
        cfg.logging.level = level;
    }
    if let Some(json) = read_env("BOOKSHELF_LOG_JSON") {
        cfg.logging.json = parse_bool("BOOKSHELF_LOG_JSON", &json)?;
    }
    if let Some(url) = read_env("BOOKSHELF_DATABASE_URL") {
        cfg.database.url = url;
    }
    if let Some(max) = read_env("BOOKSHELF_DB_MAX_CONNECTIONS") {
        cfg.database.max_connections = parse_env("BOOKSHELF_DB_MAX_CONNECTIONS", &max)?;
    }
    if let Some(url) = read_env("BOOKSHELF_REDIS_URL") {
        cfg.cache.redis_url = Some(url);
    }
    if let Some(ttl) = read_env("BOOKSHELF_CACHE_TTL_SECS") {
        cfg.cache.list_ttl_secs = parse_env("BOOKSHELF_CACHE_TTL_SECS", &ttl)?;
    }
    if let Some(workers) = read_env("BOOKSHELF_JOB_WORKERS") {
        cfg.jobs.workers = parse_env("BOOKSHELF_JOB_WORKERS", &workers)?;
    }
    if let Some(delay) = read_env("BOOKSHELF_JOB_DELAY_SECS") {
        cfg.jobs.task_delay_secs = parse_env("BOOKSHELF_JOB_DELAY_SECS", &delay)?;
    }
    Ok(())
}

fn read_env(var: &str) -> Option<String> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

fn parse_env<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Validation(format!("invalid value '{value}' for {var}")))
}

fn parse_bool(var: &str, s: &str) -> Result<bool, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Ok(true),
        "0" | "false" | "no" | "n" => Ok(false),
        _ => Err(ConfigError::Validation(format!(
            "invalid boolean value '{s}' for {var}"
        ))),
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.database.url.trim().is_empty() {
        return Err(ConfigError::Validation(
            "database url cannot be empty".into(),
        ));
    }
    if cfg.database.max_connections == 0 {
        return Err(ConfigError::Validation(
            "database max_connections must be greater than 0".into(),
        ));
    }
    if cfg.jobs.workers == 0 {
        return Err(ConfigError::Validation(
            "jobs workers must be greater than 0".into(),
        ));
    }
    Ok(())
}
