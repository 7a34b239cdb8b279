//! Application settings loaded from `config.toml` and the environment.
//!
//! Resolution order, later sources winning:
//! 1. built-in defaults
//! 2. the TOML file named by `PIZZERIA_CONFIG` (default `config.toml`), if it exists
//! 3. `DATABASE_URL` and `LISTEN_ADDR` environment variables
//!
//! `.env` files are loaded by `main` via `dotenvy` before this runs.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{fs, io::ErrorKind, net::SocketAddr, path::Path};
use tracing::{debug, info};

/// Default `SQLite` database, created on first run.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/pizzeria.sqlite?mode=rwc";
/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";

/// Fully resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `SeaORM` connection string
    pub database_url: String,
    /// Address the HTTP server binds to
    pub listen_addr: SocketAddr,
}

/// Shape of `config.toml`; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Overrides the default database URL
    pub database_url: Option<String>,
    /// Overrides the default listen address
    pub listen_addr: Option<String>,
}

/// Parses the contents of a config file.
pub fn parse_file_config(contents: &str) -> Result<FileConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse TOML config: {e}"),
    })
}

/// Reads a config file, treating a missing file as an empty config.
pub fn read_file_config<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(contents) => {
            debug!("Loaded configuration file {:?}", path);
            parse_file_config(&contents)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No configuration file at {:?}, using defaults", path);
            Ok(FileConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Merges file values and environment overrides over the defaults.
pub fn resolve(
    file: FileConfig,
    env_database_url: Option<String>,
    env_listen_addr: Option<String>,
) -> Result<AppConfig> {
    let database_url = env_database_url
        .or(file.database_url)
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

    let listen_addr = env_listen_addr
        .or(file.listen_addr)
        .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
    let listen_addr = listen_addr.parse().map_err(|e| Error::Config {
        message: format!("Invalid listen address '{listen_addr}': {e}"),
    })?;

    Ok(AppConfig {
        database_url,
        listen_addr,
    })
}

/// Directory a file-backed `SQLite` URL lives in, so it can be created before connecting.
///
/// Returns `None` for in-memory databases, other backends, and bare file names.
#[must_use]
pub fn sqlite_parent_dir(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let file = rest.split('?').next().unwrap_or(rest);
    if file.is_empty() || file.starts_with(':') {
        return None;
    }
    Path::new(file)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}

/// Loads the application configuration from file and environment.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("PIZZERIA_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let file = read_file_config(&path)?;
    let config = resolve(
        file,
        std::env::var("DATABASE_URL").ok(),
        std::env::var("LISTEN_ADDR").ok(),
    )?;
    info!(listen = %config.listen_addr, "Configuration loaded");
    Ok(config)
}
