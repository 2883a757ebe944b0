//! The local state file: one person's settings and their day overrides.

use std::path::Path;

use anyhow::{Context, Result};
use overlap_engine::time::DEFAULT_EVENING_START;
use overlap_engine::OverrideStore;
use serde::{Deserialize, Serialize};

const STATE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Prefs {
    pub evening_start_mins: u16,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            evening_start_mins: DEFAULT_EVENING_START,
        }
    }
}

/// Everything the CLI persists between runs.
///
/// Every field has a default, so partially written or older files load and
/// are repaired rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalState {
    pub schema_version: u32,
    pub user: User,
    pub prefs: Prefs,
    pub overrides: OverrideStore,
}

impl Default for LocalState {
    fn default() -> Self {
        Self {
            schema_version: STATE_SCHEMA_VERSION,
            user: User::default(),
            prefs: Prefs::default(),
            overrides: OverrideStore::new(),
        }
    }
}

impl LocalState {
    /// Load the state file, falling back to defaults when it does not exist.
    ///
    /// A missing user id is replaced with a freshly generated one.
    pub fn load(path: &Path) -> Result<Self> {
        let mut state = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read state file: {}", path.display()))?;
            serde_json::from_str::<LocalState>(&raw)
                .with_context(|| format!("State file is not valid JSON: {}", path.display()))?
        } else {
            tracing::debug!(path = %path.display(), "no state file yet, using defaults");
            LocalState::default()
        };

        state.schema_version = STATE_SCHEMA_VERSION;
        if state.user.id.trim().is_empty() {
            state.user.id = uuid::Uuid::new_v4().to_string();
            tracing::debug!(id = %state.user.id, "generated user id");
        }
        Ok(state)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize state")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write state file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), days = self.overrides.len(), "saved state");
        Ok(())
    }
}
