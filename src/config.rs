use std::net::SocketAddr;

/// Settings read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection URL. Required.
    pub database_url: String,

    /// Address the HTTP server listens on.
    /// Default: 0.0.0.0:3000
    pub bind_addr: SocketAddr,

    /// Size of the database connection pool.
    /// Default: 5
    pub max_connections: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

const DATABASE_URL: &str = "DATABASE_URL";
const BIND_ADDR: &str = "ROSTER_BIND_ADDR";
const MAX_CONNECTIONS: &str = "ROSTER_MAX_CONNECTIONS";

impl Config {
    /// Build config from a `.env` file (if present) and the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup(DATABASE_URL).ok_or(ConfigError::Missing(DATABASE_URL))?;
        let bind_addr = parse_or(&lookup, BIND_ADDR, SocketAddr::from(([0, 0, 0, 0], 3000)))?;
        let max_connections = parse_or(&lookup, MAX_CONNECTIONS, 5)?;

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
