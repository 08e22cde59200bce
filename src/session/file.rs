//! File-backed session store
//!
//! Persists entries as YAML so a token survives process restarts.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{SessionStore, TOKEN_KEY};
use crate::config::write_private;
use crate::error::{ConfigError, Result};

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    entries: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

/// Session store persisted to a YAML file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the token was last written, if a session exists
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.read().ok().and_then(|file| file.updated_at)
    }

    fn read(&self) -> Result<SessionFile> {
        if !self.path.exists() {
            return Ok(SessionFile::default());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let file = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        Ok(file)
    }

    fn write(&self, file: &SessionFile) -> Result<()> {
        let contents =
            serde_yaml::to_string(file).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        write_private(&self.path, &contents)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<String> {
        match self.read() {
            Ok(file) => file.entries.get(TOKEN_KEY).cloned(),
            Err(e) => {
                warn!("Ignoring unreadable session file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<()> {
        let mut file = self.read().unwrap_or_default();
        file.entries.insert(TOKEN_KEY.to_string(), token.to_string());
        file.updated_at = Some(Utc::now());
        self.write(&file)?;
        debug!("Session token saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        let mut file = self.read().unwrap_or_default();
        file.entries.remove(TOKEN_KEY);

        if file.entries.is_empty() {
            std::fs::remove_file(&self.path)?;
        } else {
            file.updated_at = Some(Utc::now());
            self.write(&file)?;
        }

        debug!("Session cleared at {}", self.path.display());
        Ok(())
    }
}
