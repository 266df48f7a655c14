use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::error;

/// String key/value entries kept on disk between restarts.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ClientStorage {
    entries: BTreeMap<String, String>,
}

impl ClientStorage {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }
}

pub async fn load_storage(path: &Path) -> ClientStorage {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(storage) => storage,
            Err(err) => {
                error!("failed to parse storage file: {err}");
                ClientStorage::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => ClientStorage::default(),
        Err(err) => {
            error!("failed to read storage file: {err}");
            ClientStorage::default()
        }
    }
}

pub async fn persist_storage(path: &Path, storage: &ClientStorage) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(storage)?;
    fs::write(path, payload).await?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn scratch_path(label: &str) -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "activity_portal_{label}_{}_{nanos}.json",
        std::process::id()
    ));
    path
}
