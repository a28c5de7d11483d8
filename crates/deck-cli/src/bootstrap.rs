use std::path::Path;

use anyhow::Context;
use deck_config::DeckConfig;

/// Load `.env` and the layered config for the project at `root`.
pub fn load_config(root: &Path) -> anyhow::Result<DeckConfig> {
    load_project_dotenv(root)?;
    let figment = DeckConfig::figment_at(root);
    DeckConfig::from_figment(&figment).context("failed to load taskdeck configuration")
}

/// Prefer the project's `.env`; otherwise fall back to dotenvy's search.
fn load_project_dotenv(root: &Path) -> anyhow::Result<()> {
    let env_path = root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }
    dotenvy::dotenv().ok();
    Ok(())
}
