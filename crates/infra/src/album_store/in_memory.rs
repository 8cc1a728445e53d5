use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use recordshop_catalog::{Album, Genre, NewAlbum};
use recordshop_core::AlbumId;

use super::r#trait::{AlbumStore, StoreError};

/// In-memory album store.
///
/// Intended for tests/dev. Ids start at 1 and are never handed out twice.
#[derive(Debug)]
pub struct InMemoryAlbumStore {
    albums: RwLock<BTreeMap<AlbumId, Album>>,
    next_id: AtomicI64,
}

impl InMemoryAlbumStore {
    pub fn new() -> Self {
        Self {
            albums: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Seed a store with albums, assigning ids in iteration order.
    pub fn with_albums(albums: impl IntoIterator<Item = NewAlbum>) -> Result<Self, StoreError> {
        let store = Self::new();
        for album in albums {
            store.create(album)?;
        }
        Ok(store)
    }

    fn poisoned() -> StoreError {
        StoreError::Backend("lock poisoned".to_string())
    }

    fn filter(&self, predicate: impl Fn(&Album) -> bool) -> Result<Vec<Album>, StoreError> {
        let albums = self.albums.read().map_err(|_| Self::poisoned())?;
        Ok(albums.values().filter(|a| predicate(a)).cloned().collect())
    }
}

impl Default for InMemoryAlbumStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AlbumStore for InMemoryAlbumStore {
    fn create(&self, album: NewAlbum) -> Result<Album, StoreError> {
        album.validate()?;

        let mut albums = self.albums.write().map_err(|_| Self::poisoned())?;
        let id = AlbumId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let stored = Album::from_new(id, album);
        albums.insert(id, stored.clone());
        Ok(stored)
    }

    fn find_by_id(&self, id: AlbumId) -> Result<Option<Album>, StoreError> {
        let albums = self.albums.read().map_err(|_| Self::poisoned())?;
        Ok(albums.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Album>, StoreError> {
        self.filter(|_| true)
    }

    fn find_by_artist(&self, artist: &str) -> Result<Vec<Album>, StoreError> {
        self.filter(|a| a.artist == artist)
    }

    fn find_by_genre(&self, genre: Genre) -> Result<Vec<Album>, StoreError> {
        self.filter(|a| a.genre == genre)
    }

    fn find_by_release_year(&self, year: i32) -> Result<Vec<Album>, StoreError> {
        self.filter(|a| a.release_year() == year)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Album>, StoreError> {
        let albums = self.albums.read().map_err(|_| Self::poisoned())?;
        // BTreeMap iterates in id order, so the first match has the lowest id.
        Ok(albums.values().find(|a| a.name == name).cloned())
    }

    fn save(&self, album: Album) -> Result<Album, StoreError> {
        album.validate()?;

        let mut albums = self.albums.write().map_err(|_| Self::poisoned())?;
        match albums.get_mut(&album.id) {
            Some(slot) => {
                *slot = album.clone();
                Ok(album)
            }
            None => Err(StoreError::Missing(album.id)),
        }
    }

    fn delete_by_id(&self, id: AlbumId) -> Result<(), StoreError> {
        let mut albums = self.albums.write().map_err(|_| Self::poisoned())?;
        albums.remove(&id).map(|_| ()).ok_or(StoreError::Missing(id))
    }
}
