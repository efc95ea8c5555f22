//! In-process memo plus on-disk snapshot of the full location list.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rmai_core::Location;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::client::DatasetClient;
use crate::error::Result;
use crate::index::CharacterIndex;

#[derive(Serialize, Deserialize)]
struct Snapshot {
    locations: Vec<Location>,
}

/// Serves the dataset from memory, then from a snapshot file, then from the
/// network, filling the faster layers on the way back.
///
/// A snapshot that cannot be read or parsed is treated as absent. Failing to
/// write one is logged and otherwise ignored.
#[derive(Debug)]
pub struct DatasetCache {
    client: DatasetClient,
    snapshot_path: Option<PathBuf>,
    memo: Mutex<Option<Arc<Vec<Location>>>>,
}

impl DatasetCache {
    pub fn new(client: DatasetClient) -> Self {
        Self { client, snapshot_path: None, memo: Mutex::new(None) }
    }

    /// Persist fetched locations to `path` and read them back on cold start.
    pub fn with_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// All locations with their residents.
    ///
    /// Concurrent callers wait on the same load, so the upstream is fetched
    /// at most once per cold start.
    pub async fn locations(&self) -> Result<Arc<Vec<Location>>> {
        let mut memo = self.memo.lock().await;
        if let Some(locations) = memo.as_ref() {
            return Ok(Arc::clone(locations));
        }

        let locations = match self.read_snapshot().await {
            Some(locations) => locations,
            None => {
                let fetched = self.client.fetch_all_locations().await?;
                self.write_snapshot(&fetched).await;
                fetched
            }
        };

        let locations = Arc::new(locations);
        *memo = Some(Arc::clone(&locations));
        Ok(locations)
    }

    /// Every resident across all locations, deduplicated by id.
    pub async fn characters(&self) -> Result<CharacterIndex> {
        let locations = self.locations().await?;
        Ok(CharacterIndex::from_locations(&locations))
    }

    /// First location whose name matches exactly.
    pub async fn find_location(&self, name: &str) -> Result<Option<Location>> {
        let locations = self.locations().await?;
        Ok(locations.iter().find(|l| l.name == name).cloned())
    }

    /// Forget the in-memory copy. The snapshot file is kept.
    pub async fn reset(&self) {
        *self.memo.lock().await = None;
    }

    /// Forget the in-memory copy and delete the snapshot file.
    pub async fn invalidate(&self) {
        self.reset().await;
        if let Some(path) = &self.snapshot_path {
            match tokio::fs::remove_file(path).await {
                Ok(()) => info!(path = %path.display(), "removed dataset snapshot"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), error = %e, "failed to remove dataset snapshot"),
            }
        }
    }

    async fn read_snapshot(&self) -> Option<Vec<Location>> {
        let path = self.snapshot_path.as_ref()?;
        let bytes = tokio::fs::read(path).await.ok()?;
        match serde_json::from_slice::<Snapshot>(&bytes) {
            Ok(snapshot) => {
                debug!(path = %path.display(), count = snapshot.locations.len(), "loaded dataset snapshot");
                Some(snapshot.locations)
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "ignoring unreadable dataset snapshot");
                None
            }
        }
    }

    async fn write_snapshot(&self, locations: &[Location]) {
        let Some(path) = &self.snapshot_path else {
            return;
        };
        let snapshot = Snapshot { locations: locations.to_vec() };
        let bytes = match serde_json::to_vec_pretty(&snapshot) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "failed to serialize dataset snapshot");
                return;
            }
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                warn!(path = %parent.display(), error = %e, "failed to create snapshot directory");
                return;
            }
        }
        if let Err(e) = tokio::fs::write(path, bytes).await {
            warn!(path = %path.display(), error = %e, "failed to write dataset snapshot");
        }
    }
}
