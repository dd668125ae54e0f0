//! Application configuration: verification policy and prompt scripts.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;
use voiceguard_engine::DEFAULT_THRESHOLD;

/// Configuration document, stored as pretty-printed JSON.
///
/// Missing keys take their defaults, so hand-edited files stay valid
/// across upgrades.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Minimum cosine similarity to accept a verification attempt, in [0, 1].
    #[serde(default = "default_threshold")]
    pub similarity_threshold: f32,

    /// Script read aloud during enrollment.
    #[serde(default = "default_registration_script")]
    pub registration_script: String,

    /// Script read aloud during verification.
    #[serde(default = "default_verification_script")]
    pub verification_script: String,
}

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

fn default_registration_script() -> String {
    "My voice is my passport. Please verify me.".to_string()
}

fn default_verification_script() -> String {
    "I solemnly swear that I am up to no good.".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_threshold(),
            registration_script: default_registration_script(),
            verification_script: default_verification_script(),
        }
    }
}

impl AppConfig {
    /// Reads the configuration from `path`, creating it with defaults when
    /// missing. A corrupt file is replaced with defaults (it holds no user
    /// data, unlike the identity store) after a warning.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let cfg = Self::default();
            cfg.save(path)?;
            return Ok(cfg);
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        match serde_json::from_str::<Self>(&data) {
            Ok(cfg) => Ok(cfg),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt config, rewriting defaults");
                let cfg = Self::default();
                cfg.save(path)?;
                Ok(cfg)
            }
        }
    }

    /// Writes the configuration back, write-new-then-rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }
}
