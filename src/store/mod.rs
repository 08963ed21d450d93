//! Persistence for the current schedule.
//!
//! Two layers: [`GameBook`] holds the live list in memory for request
//! handlers, and [`SnapshotStore`] keeps a timestamped copy on disk so a
//! restart can serve games before the first refresh completes.

pub mod book;

pub use book::GameBook;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::schedule::Game;

/// On-disk document: `{ "timestamp": <unix secs>, "games": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSnapshot {
    pub timestamp: i64,
    pub games: Vec<Game>,
}

impl CacheSnapshot {
    /// A snapshot is fresh while `now - timestamp < ttl`. A zero timestamp
    /// is treated as never written.
    pub fn is_fresh(&self, ttl: Duration, now: i64) -> bool {
        let ttl = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        self.timestamp > 0 && now.saturating_sub(self.timestamp) < ttl
    }
}

/// JSON snapshot file with TTL-based expiry.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Games from a fresh snapshot; `None` when the file is missing,
    /// unreadable, undecodable or stale.
    pub async fn load(&self, ttl: Duration) -> Option<Vec<Game>> {
        self.load_at(ttl, Utc::now().timestamp()).await
    }

    pub async fn load_at(&self, ttl: Duration, now: i64) -> Option<Vec<Game>> {
        let snapshot = match self.read().await {
            Ok(s) => s,
            Err(e) => {
                debug!("No usable snapshot at {}: {:#}", self.path.display(), e);
                return None;
            }
        };

        if snapshot.is_fresh(ttl, now) {
            Some(snapshot.games)
        } else {
            debug!(
                "Snapshot at {} is stale (written {}, now {})",
                self.path.display(),
                snapshot.timestamp,
                now
            );
            None
        }
    }

    async fn read(&self) -> Result<CacheSnapshot> {
        let raw = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        serde_json::from_slice(&raw).context("Failed to decode snapshot")
    }

    /// Write a snapshot stamped with the current time.
    pub async fn save(&self, games: &[Game]) -> Result<()> {
        self.save_at(games, Utc::now().timestamp()).await
    }

    pub async fn save_at(&self, games: &[Game], timestamp: i64) -> Result<()> {
        let snapshot = CacheSnapshot {
            timestamp,
            games: games.to_vec(),
        };
        let data = serde_json::to_vec_pretty(&snapshot).context("Failed to encode snapshot")?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create cache directory {}", dir.display()))?;
        }
        tokio::fs::write(&self.path, data)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        debug!("Saved {} games to {}", games.len(), self.path.display());
        Ok(())
    }
}
