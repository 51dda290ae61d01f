use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use tokio::sync::Mutex;

/// On-disk mapping of username to TMDb list id.
///
/// The whole store is a single JSON object, read and rewritten on every
/// update. The mutex serializes read-modify-write cycles within this process;
/// concurrent processes are not protected against.
pub struct ListStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ListStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Looks up the stored list id for a user. A missing store file reads as
    /// an empty store.
    pub async fn get(&self, username: &str) -> anyhow::Result<Option<u64>> {
        let _guard = self.lock.lock().await;
        let lists = self.load().await?;
        Ok(lists.get(username).copied())
    }

    /// Records the list id for a user, creating the store file and its parent
    /// directory when needed.
    pub async fn set(&self, username: &str, list_id: u64) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let mut lists = self.load().await?;
        lists.insert(username.to_string(), list_id);
        self.save(&lists).await
    }

    async fn load(&self) -> anyhow::Result<BTreeMap<String, u64>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read list store {}", self.path.display()))
            }
        };

        serde_json::from_slice(&raw)
            .with_context(|| format!("Failed to parse list store {}", self.path.display()))
    }

    async fn save(&self, lists: &BTreeMap<String, u64>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let raw = serde_json::to_vec_pretty(lists)?;
        tokio::fs::write(&self.path, raw)
            .await
            .with_context(|| format!("Failed to write list store {}", self.path.display()))
    }
}
