use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use recordshop_catalog::Album;
use recordshop_core::AlbumId;

/// Point-lookup cache for albums, keyed by id.
///
/// Entries are only written or evicted by the inventory service; nothing
/// expires on its own.
pub trait AlbumCache: Send + Sync {
    fn get(&self, id: AlbumId) -> Option<Album>;
    /// Insert or replace the entry for `album.id`.
    fn put(&self, album: Album);
    fn evict(&self, id: AlbumId);
    fn clear(&self);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C> AlbumCache for Arc<C>
where
    C: AlbumCache + ?Sized,
{
    fn get(&self, id: AlbumId) -> Option<Album> {
        (**self).get(id)
    }

    fn put(&self, album: Album) {
        (**self).put(album)
    }

    fn evict(&self, id: AlbumId) {
        (**self).evict(id)
    }

    fn clear(&self) {
        (**self).clear()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// Process-wide in-memory cache.
///
/// Poisoned locks are recovered, never skipped: an eviction must always land.
#[derive(Debug, Default)]
pub struct InMemoryAlbumCache {
    inner: RwLock<HashMap<AlbumId, Album>>,
}

impl InMemoryAlbumCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AlbumCache for InMemoryAlbumCache {
    fn get(&self, id: AlbumId) -> Option<Album> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&id).cloned()
    }

    fn put(&self, album: Album) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(album.id, album);
    }

    fn evict(&self, id: AlbumId) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.remove(&id);
    }

    fn clear(&self) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.clear();
    }

    fn len(&self) -> usize {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.len()
    }
}

/// Cache that never holds anything; every lookup goes to the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledCache;

impl AlbumCache for DisabledCache {
    fn get(&self, _id: AlbumId) -> Option<Album> {
        None
    }

    fn put(&self, _album: Album) {}

    fn evict(&self, _id: AlbumId) {}

    fn clear(&self) {}

    fn len(&self) -> usize {
        0
    }
}
