//! Media directory
//!
//! Messages reference media by id; the blobs live in an external system.
//! This module defines the narrow contract the lifecycle needs from it:
//! confirm a reference resolves before accepting it, and release blobs
//! once nothing references them.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreResult;

/// Lookup and release surface over externally stored media.
#[async_trait]
pub trait MediaDirectory: Send + Sync {
    /// Check whether a media id resolves to a stored blob.
    async fn media_exists(&self, media_id: Uuid) -> StoreResult<bool>;

    /// Release a stored blob. Releasing an unknown id is a no-op.
    async fn release_media(&self, media_id: Uuid) -> StoreResult<()>;
}

/// In-memory media directory for single-process apps and tests.
#[cfg(feature = "memory")]
pub use self::memory_media::MemoryMediaDirectory;

#[cfg(feature = "memory")]
mod memory_media {
    use std::collections::HashSet;
    use std::sync::Arc;

    use tokio::sync::RwLock;

    use super::*;

    /// Media directory backed by a set of known ids.
    pub struct MemoryMediaDirectory {
        known: Arc<RwLock<HashSet<Uuid>>>,
    }

    impl std::fmt::Debug for MemoryMediaDirectory {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("MemoryMediaDirectory").finish()
        }
    }

    impl MemoryMediaDirectory {
        /// Create an empty directory.
        pub fn new() -> Self {
            Self {
                known: Arc::new(RwLock::new(HashSet::new())),
            }
        }

        /// Register a stored blob and return its id.
        pub async fn add(&self) -> Uuid {
            let media_id = Uuid::now_v7();
            self.known.write().await.insert(media_id);
            media_id
        }

        /// Count of blobs currently stored.
        pub async fn len(&self) -> usize {
            self.known.read().await.len()
        }

        /// Check if no blobs are stored.
        pub async fn is_empty(&self) -> bool {
            self.known.read().await.is_empty()
        }
    }

    impl Default for MemoryMediaDirectory {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl MediaDirectory for MemoryMediaDirectory {
        async fn media_exists(&self, media_id: Uuid) -> StoreResult<bool> {
            Ok(self.known.read().await.contains(&media_id))
        }

        async fn release_media(&self, media_id: Uuid) -> StoreResult<()> {
            self.known.write().await.remove(&media_id);
            Ok(())
        }
    }
}
