//! Session and password policy.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_session_ttl_hours() -> i64 {
    24 * 30
}

const fn default_min_password_len() -> usize {
    8
}

const fn default_bcrypt_cost() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Lifetime of a login session.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,

    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,

    /// bcrypt work factor, 4..=31.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Session token supplied out of band (`TASKDECK_AUTH__TOKEN`). Takes
    /// precedence over the credentials file.
    #[serde(default)]
    pub token: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: default_session_ttl_hours(),
            min_password_len: default_min_password_len(),
            bcrypt_cost: default_bcrypt_cost(),
            token: String::new(),
        }
    }
}

impl AuthConfig {
    /// Upper bound for `session_ttl_hours` (one hundred years).
    pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365 * 100;

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::invalid(
                "auth.bcrypt_cost",
                format!("{} is outside 4..=31", self.bcrypt_cost),
            ));
        }
        if !(1..=Self::MAX_SESSION_TTL_HOURS).contains(&self.session_ttl_hours) {
            return Err(ConfigError::invalid(
                "auth.session_ttl_hours",
                format!(
                    "{} is outside 1..={}",
                    self.session_ttl_hours,
                    Self::MAX_SESSION_TTL_HOURS
                ),
            ));
        }
        Ok(())
    }
}
