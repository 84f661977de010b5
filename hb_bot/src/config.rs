//! Bot configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use headbands::{MIN_PLAYERS, Player, RoleToken, SessionConfig};
use std::path::{Path, PathBuf};

/// Complete bot configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Roles dealt to players
    pub role_pool: Vec<RoleToken>,
    /// Prefix marking a chat line as a command
    pub command_prefix: String,
    /// Channel the bot listens and replies in
    pub channel: String,
    /// Users whose direct messages are refused by the console transport
    pub dm_blocklist: Vec<Player>,
    /// Session settings
    pub session: SessionConfig,
}

/// Values given on the command line, which take precedence over the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub roles_file: Option<PathBuf>,
    pub command_prefix: Option<String>,
    pub channel: Option<String>,
}

impl BotConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if no role pool is configured or a roles file cannot be read
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        Self::from_lookup(overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Arguments
    ///
    /// * `overrides` - CLI overrides
    /// * `lookup` - Returns the value of a variable, if set
    pub fn from_lookup<F>(overrides: Overrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let roles_file = overrides
            .roles_file
            .or_else(|| lookup("HB_ROLES_FILE").map(PathBuf::from));

        // A roles file wins over an inline pool
        let role_pool = match roles_file {
            Some(path) => load_roles_file(&path)?,
            None => {
                let inline = lookup("HB_ROLE_POOL").ok_or_else(|| ConfigError::MissingRequired {
                    var: "HB_ROLE_POOL".to_string(),
                    hint: "Set a comma-separated list of roles, or HB_ROLES_FILE / --roles-file"
                        .to_string(),
                })?;
                parse_role_list(&inline)
            }
        };

        let command_prefix = overrides
            .command_prefix
            .or_else(|| lookup("HB_COMMAND_PREFIX"))
            .unwrap_or_else(|| "!".to_string());

        let channel = overrides
            .channel
            .or_else(|| lookup("HB_CHANNEL"))
            .unwrap_or_else(|| "general".to_string());

        let dm_blocklist = lookup("HB_DM_BLOCKLIST")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(Player::new)
                    .collect()
            })
            .unwrap_or_default();

        let defaults = SessionConfig::default();
        let session = SessionConfig {
            name: channel.clone(),
            lock_roster_after_start: parse_or(
                lookup("HB_LOCK_ROSTER"),
                defaults.lock_roster_after_start,
            ),
            inbox_capacity: parse_or(lookup("HB_INBOX_CAPACITY"), defaults.inbox_capacity),
        };

        Ok(BotConfig {
            role_pool,
            command_prefix,
            channel,
            dm_blocklist,
            session,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.role_pool.len() < MIN_PLAYERS {
            return Err(ConfigError::Invalid {
                var: "HB_ROLE_POOL".to_string(),
                reason: format!(
                    "Must contain at least {MIN_PLAYERS} roles, got {}",
                    self.role_pool.len()
                ),
            });
        }

        if self.command_prefix.is_empty() || self.command_prefix.contains(char::is_whitespace) {
            return Err(ConfigError::Invalid {
                var: "HB_COMMAND_PREFIX".to_string(),
                reason: "Must be non-empty and contain no whitespace".to_string(),
            });
        }

        self.session
            .validate()
            .map_err(|reason| ConfigError::Invalid {
                var: "HB_CHANNEL".to_string(),
                reason,
            })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },

    #[error("Failed to read roles file {path}: {source}")]
    RolesFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Parse a comma-separated role list, skipping blanks
pub fn parse_role_list(value: &str) -> Vec<RoleToken> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(RoleToken::new)
        .collect()
}

/// One role per line; blank lines and `#` comments are skipped
fn load_roles_file(path: &Path) -> Result<Vec<RoleToken>, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::RolesFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(RoleToken::new)
        .collect())
}

/// Helper to parse an optional value with default fallback
fn parse_or<T>(value: Option<String>, default: T) -> T
where
    T: std::str::FromStr,
{
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}
