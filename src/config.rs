use std::env;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/myNodeProject";
pub const DEFAULT_DATABASE: &str = "myNodeProject";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a valid port number, got \"{value}\"")]
    InvalidPort { name: &'static str, value: String },
    #[error("{name} must be true or false, got \"{value}\"")]
    InvalidFlag { name: &'static str, value: String },
}

/// Configuração do processo, lida do ambiente (`.env` via dotenv)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database: String,
    /// Aborta a inicialização se o MongoDB não responder ao ping
    pub require_database: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let mongodb_uri = lookup("MONGODB_URI").unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string());
        let database = lookup("MONGODB_DATABASE")
            .unwrap_or_else(|| database_from_uri(&mongodb_uri).unwrap_or(DEFAULT_DATABASE).to_string());

        let require_database = match lookup("REQUIRE_DATABASE") {
            Some(value) => parse_flag(&value)
                .ok_or(ConfigError::InvalidFlag { name: "REQUIRE_DATABASE", value })?,
            None => false,
        };

        Ok(Self { host, port, mongodb_uri, database, require_database })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

/// Nome do banco no path do URI (`mongodb://host:port/<db>?opts`)
fn database_from_uri(uri: &str) -> Option<&str> {
    let (_, rest) = uri.split_once("://")?;
    let (_, path) = rest.split_once('/')?;
    let name = path.split('?').next()?;
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
