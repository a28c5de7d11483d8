use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use deck_auth::{AuthError, AuthPolicy, Authenticator};
use deck_config::{DeckConfig, PROJECT_DIR};
use deck_core::identity::AuthIdentity;
use deck_db::DeckService;

use crate::state::StateStore;

/// Shared resources initialized once at startup.
pub struct AppContext {
    pub service: Arc<DeckService>,
    pub config: DeckConfig,
    pub project_root: PathBuf,
    pub state: StateStore,
    auth: Result<AuthIdentity, AuthError>,
}

impl AppContext {
    /// Open the store under `project_root` and resolve the stored session.
    pub async fn init(project_root: PathBuf, config: DeckConfig) -> anyhow::Result<Self> {
        let deck_dir = project_root.join(PROJECT_DIR);
        std::fs::create_dir_all(&deck_dir)
            .with_context(|| format!("failed to create {}", deck_dir.display()))?;

        let db_path = database_path(&project_root, &config);
        let service = DeckService::new_local(&db_path)
            .await
            .with_context(|| format!("failed to open task store at {db_path}"))?;

        if let Err(error) = service.purge_expired_sessions(Utc::now()).await {
            tracing::warn!(%error, "failed to purge expired sessions");
        }

        let auth = resolve_identity(&service, &config).await;

        Ok(Self {
            service: Arc::new(service),
            state: StateStore::new(deck_dir.join("state")),
            config,
            project_root,
            auth,
        })
    }

    #[must_use]
    pub fn auth_policy(&self) -> AuthPolicy {
        AuthPolicy::from(&self.config.auth)
    }

    #[must_use]
    pub fn authenticator(&self) -> Authenticator<'_> {
        Authenticator::new(&self.service, self.auth_policy())
    }

    #[must_use]
    pub fn identity(&self) -> Option<&AuthIdentity> {
        self.auth.as_ref().ok()
    }

    /// The logged-in identity, or the reason there is none.
    pub fn require_identity(&self) -> anyhow::Result<&AuthIdentity> {
        self.auth
            .as_ref()
            .map_err(|error| anyhow::anyhow!("{error}"))
    }

    pub fn set_identity(&mut self, identity: AuthIdentity) {
        self.auth = Ok(identity);
    }

    pub fn clear_identity(&mut self) {
        self.auth = Err(AuthError::NotAuthenticated);
    }
}

fn database_path(project_root: &Path, config: &DeckConfig) -> String {
    if config.database.is_in_memory() {
        return config.database.path.clone();
    }
    let path = Path::new(&config.database.path);
    if path.is_absolute() {
        config.database.path.clone()
    } else {
        project_root.join(path).to_string_lossy().into_owned()
    }
}

/// Session token from config (`TASKDECK_AUTH__TOKEN`) or the credentials file.
async fn resolve_identity(
    service: &DeckService,
    config: &DeckConfig,
) -> Result<AuthIdentity, AuthError> {
    let token = if config.auth.token.trim().is_empty() {
        deck_auth::resolve_token()?
    } else {
        config.auth.token.clone()
    };
    let identity = Authenticator::new(service, AuthPolicy::from(&config.auth))
        .resolve(&token)
        .await;
    if let Err(error) = &identity {
        tracing::debug!(%error, "stored session is not usable");
    }
    identity
}
