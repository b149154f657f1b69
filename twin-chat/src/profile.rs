use std::path::{Path, PathBuf};

use crate::models::{Document, ProfileData};
use tracing::{debug, error};

pub const PROFILE_FILE: &str = "digitaltwin.json";

/// Where the profile JSON lives. Read fresh on every request.
#[derive(Debug, Clone)]
pub struct ProfileSource {
    candidates: Vec<PathBuf>,
}

impl ProfileSource {
    /// A single explicit file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { candidates: vec![path.into()] }
    }

    /// The usual deployment layouts relative to `base`, first one wins.
    pub fn probing(base: &Path) -> Self {
        Self {
            candidates: vec![
                base.join(PROFILE_FILE),
                base.join("data").join(PROFILE_FILE),
                base.join("..").join(PROFILE_FILE),
            ],
        }
    }

    pub fn from_config(profile_path: Option<&str>) -> Self {
        match profile_path {
            Some(path) => Self::at(path),
            None => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                Self::probing(&cwd)
            }
        }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Documents from the first existing candidate. A missing or unreadable
    /// profile yields an empty set rather than an error.
    pub async fn load(&self) -> Vec<Document> {
        for path in &self.candidates {
            if !tokio::fs::try_exists(path).await.unwrap_or(false) {
                continue;
            }

            return match read_profile(path).await {
                Ok(data) => {
                    debug!("Loaded {} profile documents from {}", data.documents.len(), path.display());
                    data.documents
                }
                Err(e) => {
                    error!("Error loading profile {}: {}", path.display(), e);
                    Vec::new()
                }
            };
        }

        debug!("No profile found in {} candidate locations", self.candidates.len());
        Vec::new()
    }
}

async fn read_profile(path: &Path) -> anyhow::Result<ProfileData> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}
