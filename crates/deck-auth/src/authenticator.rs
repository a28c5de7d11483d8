//! Registration, login, and session resolution against the store.

use chrono::{Duration, Utc};

use deck_config::AuthConfig;
use deck_core::entities::Session;
use deck_core::identity::AuthIdentity;
use deck_core::seed::{SeedTask, catalogue};
use deck_db::DeckService;
use deck_db::error::DatabaseError;
use deck_db::repos::registration::Registration;

use crate::credentials::{normalize_email, validate_registration};
use crate::error::AuthError;
use crate::password::{hash_password, verify_password};
use crate::token::generate_session_token;

/// Password and session rules applied by [`Authenticator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthPolicy {
    pub session_ttl: Duration,
    pub min_password_len: usize,
    pub bcrypt_cost: u32,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self::from(&AuthConfig::default())
    }
}

impl From<&AuthConfig> for AuthPolicy {
    fn from(config: &AuthConfig) -> Self {
        Self {
            session_ttl: session_ttl(config.session_ttl_hours),
            min_password_len: config.min_password_len,
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}

/// Out-of-range hours are clamped into `1..=MAX_SESSION_TTL_HOURS`.
fn session_ttl(hours: i64) -> Duration {
    let hours = hours.clamp(1, AuthConfig::MAX_SESSION_TTL_HOURS);
    Duration::try_hours(hours).unwrap_or(Duration::MAX)
}

pub struct Authenticator<'a> {
    service: &'a DeckService,
    policy: AuthPolicy,
    catalogue: &'a [SeedTask],
}

impl<'a> Authenticator<'a> {
    /// Authenticator that seeds new accounts with the standard catalogue.
    #[must_use]
    pub fn new(service: &'a DeckService, policy: AuthPolicy) -> Self {
        Self {
            service,
            policy,
            catalogue: catalogue(),
        }
    }

    #[must_use]
    pub const fn with_catalogue(mut self, catalogue: &'a [SeedTask]) -> Self {
        self.catalogue = catalogue;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> &AuthPolicy {
        &self.policy
    }

    /// Create an account and seed its starter tasks in one transaction.
    ///
    /// # Errors
    ///
    /// `AuthError::Validation` for malformed input, `AuthError::EmailTaken`
    /// when the normalized email already exists.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<Registration, AuthError> {
        let email = validate_registration(email, password, self.policy.min_password_len)?;
        if self.service.find_user_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken(email));
        }
        let hash = hash_password(password, self.policy.bcrypt_cost).await?;
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let registration = self
            .service
            .register_with_catalogue(&email, name, &hash, self.catalogue)
            .await?;
        tracing::debug!(user_id = %registration.user.id, "account registered");
        Ok(registration)
    }

    /// Verify credentials and open a session.
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidCredentials` for an unknown email or a wrong
    /// password alike. An unknown email still pays for one bcrypt round so
    /// both failures take the same time.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "email and password are required".into(),
            ));
        }
        let Some(credentials) = self.service.find_user_by_email(&email).await? else {
            hash_password(password, self.policy.bcrypt_cost).await?;
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(password, &credentials.password_hash).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = generate_session_token()?;
        let session = self
            .service
            .create_session(&credentials.user.id, &token, self.policy.session_ttl)
            .await?;
        Ok(session)
    }

    /// Map a bearer token to the identity that owns it.
    ///
    /// # Errors
    ///
    /// `AuthError::NotAuthenticated` for an unknown token or a session whose
    /// user is gone; `AuthError::SessionExpired` after expiry, which also
    /// removes the session.
    pub async fn resolve(&self, token: &str) -> Result<AuthIdentity, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::NotAuthenticated);
        }
        let Some(session) = self.service.get_session(token).await? else {
            return Err(AuthError::NotAuthenticated);
        };
        if session.is_expired(Utc::now()) {
            self.service.delete_session(token).await?;
            return Err(AuthError::SessionExpired);
        }
        let user = match self.service.get_user(&session.user_id).await {
            Ok(user) => user,
            Err(DatabaseError::NoResult) => return Err(AuthError::NotAuthenticated),
            Err(error) => return Err(error.into()),
        };
        Ok(AuthIdentity {
            user_id: user.id,
            email: user.email,
        })
    }

    /// End a session. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Database` if the delete fails.
    pub async fn logout(&self, token: &str) -> Result<bool, AuthError> {
        Ok(self.service.delete_session(token.trim()).await?)
    }
}
