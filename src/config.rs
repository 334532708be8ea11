//! Process settings from environment variables (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use crate::store::DEFAULT_POSTS_TABLE;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Unset means the in-memory store.
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub max_connections: u32,
    pub api_prefix: String,
    pub body_limit_bytes: usize,
    pub posts_table: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let posts_table = get("POSTS_TABLE").unwrap_or_else(|| DEFAULT_POSTS_TABLE.into());
        if !is_plain_identifier(&posts_table) {
            return Err(ConfigError::Invalid {
                key: "POSTS_TABLE",
                value: posts_table,
            });
        }

        let api_prefix = get("API_PREFIX").unwrap_or_else(|| DEFAULT_API_PREFIX.into());
        if !is_route_prefix(&api_prefix) {
            return Err(ConfigError::Invalid {
                key: "API_PREFIX",
                value: api_prefix,
            });
        }

        Ok(Settings {
            database_url: get("DATABASE_URL"),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), DEFAULT_MAX_CONNECTIONS)?,
            api_prefix,
            body_limit_bytes: parse_or("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"), DEFAULT_BODY_LIMIT_BYTES)?,
            posts_table,
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}

/// Absolute path usable as a nest point: leading `/`, no whitespace, no `:`/`*` captures.
fn is_route_prefix(s: &str) -> bool {
    s.starts_with('/') && !s.chars().any(|c| c.is_whitespace() || c == ':' || c == '*')
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
