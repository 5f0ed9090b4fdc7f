//! Route table and guard configuration parsed from environment variables.
//!
//! The reserved paths must match the host application's route table exactly,
//! so hosts that mount the server pages elsewhere override them here.

pub const DEFAULT_ADD_PATH: &str = "/server/add";
pub const DEFAULT_SELECT_PATH: &str = "/server/select";
pub const DEFAULT_LOGIN_PATH: &str = "/server/login";
pub const DEFAULT_HOME_PATH: &str = "/";

/// Errors produced while loading [`GuardConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A route override is not an absolute path.
    #[error("invalid route path in {var}: '{value}' (must start with '/')")]
    InvalidPath { var: &'static str, value: String },
}

/// The reserved routes the guard redirects to.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RouteTable {
    /// Server registration page (`ADD`).
    pub add: String,
    /// Server selection page (`SELECT`).
    pub select: String,
    /// Login page for the current server (`LOGIN`).
    pub login: String,
    /// Application home.
    pub home: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            add: DEFAULT_ADD_PATH.to_owned(),
            select: DEFAULT_SELECT_PATH.to_owned(),
            login: DEFAULT_LOGIN_PATH.to_owned(),
            home: DEFAULT_HOME_PATH.to_owned(),
        }
    }
}

impl RouteTable {
    /// Whether `path` is one of the pre-authentication routes (add, select, login).
    #[must_use]
    pub fn is_pre_auth(&self, path: &str) -> bool {
        path == self.add || path == self.select || path == self.login
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardConfig {
    pub routes: RouteTable,
}

impl GuardConfig {
    /// Build guard config from environment variables.
    ///
    /// Optional:
    /// - `SESSION_GUARD_ADD_PATH`: default `/server/add`
    /// - `SESSION_GUARD_SELECT_PATH`: default `/server/select`
    /// - `SESSION_GUARD_LOGIN_PATH`: default `/server/login`
    /// - `SESSION_GUARD_HOME_PATH`: default `/`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] for an override not starting with `/`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let routes = RouteTable {
            add: env_path("SESSION_GUARD_ADD_PATH", DEFAULT_ADD_PATH)?,
            select: env_path("SESSION_GUARD_SELECT_PATH", DEFAULT_SELECT_PATH)?,
            login: env_path("SESSION_GUARD_LOGIN_PATH", DEFAULT_LOGIN_PATH)?,
            home: env_path("SESSION_GUARD_HOME_PATH", DEFAULT_HOME_PATH)?,
        };
        Ok(Self { routes })
    }
}

fn env_path(var: &'static str, default: &str) -> Result<String, ConfigError> {
    let raw = std::env::var(var).unwrap_or_default();
    parse_path(var, &raw, default)
}

fn parse_path(var: &'static str, raw: &str, default: &str) -> Result<String, ConfigError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(default.to_owned());
    }
    if !value.starts_with('/') {
        return Err(ConfigError::InvalidPath { var, value: value.to_owned() });
    }
    Ok(value.to_owned())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
