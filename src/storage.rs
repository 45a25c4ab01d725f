use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use tracing::error;

#[derive(Debug, Serialize, Deserialize, Default)]
struct SessionSlot {
    access_token: Option<String>,
}

/// The persisted token slot: one JSON file holding the bearer token under
/// the fixed `access_token` key. The in-memory value is authoritative for
/// the running session; the file only has to survive restarts.
#[derive(Debug)]
pub struct TokenStore {
    path: PathBuf,
    token: Option<String>,
}

impl TokenStore {
    /// Loads the slot. A missing file is an empty session; an unreadable or
    /// unparsable file is logged and treated as empty.
    pub async fn load(path: PathBuf) -> Self {
        let token = match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<SessionSlot>(&bytes) {
                Ok(slot) => slot.access_token,
                Err(err) => {
                    error!("failed to parse session file: {err}");
                    None
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                error!("failed to read session file: {err}");
                None
            }
        };

        Self { path, token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Persists a new token value: writing the slot file for `Some`,
    /// removing it for `None`. The in-memory value is updated either way,
    /// so a session that fails to persist is still valid until restart.
    pub async fn set_token(&mut self, token: Option<String>) -> Result<(), std::io::Error> {
        self.token = token;
        match &self.token {
            Some(value) => {
                let slot = SessionSlot {
                    access_token: Some(value.clone()),
                };
                let payload = serde_json::to_vec_pretty(&slot)?;
                fs::write(&self.path, payload).await?;
            }
            None => match fs::remove_file(&self.path).await {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => return Err(err),
            },
        }
        Ok(())
    }
}
