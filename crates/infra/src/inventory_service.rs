//! Album inventory service (application-level orchestration).
//!
//! Mediates every read and write of albums. It composes an `AlbumStore` and
//! an `AlbumCache`, both injected at construction:
//!
//! ```text
//! caller
//!   ↓
//! InventoryService operation ── cache (point lookups only)
//!   ↓
//! AlbumStore call(s)
//!   ↓
//! album(s) | InventoryError::NotFound(key) | InventoryError::Store(..)
//! ```
//!
//! ## Cache Contract
//!
//! - `get_by_id` serves hits from the cache; misses read the store and
//!   populate the cache.
//! - `update` writes the saved album into the cache (write-through).
//! - `delete_by_id` evicts.
//! - Nothing else touches the cache.
//!
//! ## Linearization
//!
//! Cache misses, updates and deletes for an id run under a striped per-id
//! mutex spanning the store call and the cache write/evict. A miss therefore
//! never repopulates a value older than a concurrent mutation, and the cache
//! is settled before a mutation returns. Cache hits only take the cache's own
//! read lock.
//!
//! This module contains no IO itself; it composes infrastructure traits.

use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, info, warn};

use recordshop_catalog::{Album, AlbumPatch, Genre, NewAlbum};
use recordshop_core::AlbumId;

use crate::album_store::{AlbumStore, StoreError};
use crate::cache::AlbumCache;

const LOCK_STRIPES: usize = 64;

/// The lookup that produced an empty result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Id(AlbumId),
    Artist(String),
    Genre(Genre),
    Year(i32),
    Name(String),
}

impl core::fmt::Display for LookupKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LookupKey::Id(id) => write!(f, "Cannot find Album with id '{id}'"),
            LookupKey::Artist(artist) => {
                write!(f, "Cannot find any album with artist name '{artist}'")
            }
            LookupKey::Genre(genre) => {
                write!(f, "Cannot find any album belonging to the genre '{genre}'")
            }
            LookupKey::Year(year) => {
                write!(f, "Cannot find any albums with release year '{year}'")
            }
            LookupKey::Name(name) => write!(f, "Cannot find any album with name '{name}'"),
        }
    }
}

#[derive(Debug, Error)]
pub enum InventoryError {
    /// Nothing matched the lookup key.
    #[error("{0}")]
    NotFound(LookupKey),

    /// The store failed; the transport layer treats this as a server error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl InventoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, InventoryError::NotFound(_))
    }

    /// The lookup key for `NotFound`, if any.
    pub fn lookup_key(&self) -> Option<&LookupKey> {
        match self {
            InventoryError::NotFound(key) => Some(key),
            InventoryError::Store(_) => None,
        }
    }
}

fn not_found(key: LookupKey) -> InventoryError {
    debug!(%key, "lookup matched nothing");
    InventoryError::NotFound(key)
}

fn store_failure(operation: &'static str) -> impl FnOnce(StoreError) -> InventoryError {
    move |err| {
        warn!(operation, error = %err, "album store call failed");
        InventoryError::Store(err)
    }
}

/// Album inventory service.
///
/// ## Generic Parameters
///
/// - `S`: album store (must implement `AlbumStore`)
/// - `C`: lookup cache (must implement `AlbumCache`; use `DisabledCache` to
///   turn caching off)
pub struct InventoryService<S, C> {
    store: S,
    cache: C,
    id_locks: Box<[Mutex<()>]>,
}

impl<S, C> InventoryService<S, C>
where
    S: AlbumStore,
    C: AlbumCache,
{
    pub fn new(store: S, cache: C) -> Self {
        Self {
            store,
            cache,
            id_locks: (0..LOCK_STRIPES).map(|_| Mutex::new(())).collect(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    fn lock_id(&self, id: AlbumId) -> MutexGuard<'_, ()> {
        let stripe = id.get().rem_euclid(LOCK_STRIPES as i64) as usize;
        // The guarded section holds no data, so a poisoned stripe is still usable.
        self.id_locks[stripe]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Every album, in store order.
    pub fn list_all(&self) -> Result<Vec<Album>, InventoryError> {
        self.store.find_all().map_err(store_failure("find_all"))
    }

    pub fn get_by_id(&self, id: AlbumId) -> Result<Album, InventoryError> {
        if let Some(album) = self.cache.get(id) {
            debug!(album_id = %id, "album cache hit");
            return Ok(album);
        }

        let _guard = self.lock_id(id);

        // Another miss for the same id may have filled the entry while we waited.
        if let Some(album) = self.cache.get(id) {
            debug!(album_id = %id, "album cache hit after wait");
            return Ok(album);
        }

        debug!(album_id = %id, "album cache miss");
        match self.store.find_by_id(id).map_err(store_failure("find_by_id"))? {
            Some(album) => {
                self.cache.put(album.clone());
                Ok(album)
            }
            None => Err(not_found(LookupKey::Id(id))),
        }
    }

    pub fn add(&self, album: NewAlbum) -> Result<Album, InventoryError> {
        let created = self.store.create(album).map_err(store_failure("create"))?;
        info!(
            album_id = %created.id,
            artist = %created.artist,
            genre = %created.genre,
            "album added"
        );
        Ok(created)
    }

    /// Replace every mutable field of album `id` with `patch`.
    pub fn update(&self, id: AlbumId, patch: AlbumPatch) -> Result<Album, InventoryError> {
        let _guard = self.lock_id(id);

        let mut album = match self.store.find_by_id(id).map_err(store_failure("find_by_id"))? {
            Some(album) => album,
            None => {
                self.cache.evict(id);
                return Err(not_found(LookupKey::Id(id)));
            }
        };
        album.apply_patch(patch);

        match self.store.save(album) {
            Ok(saved) => {
                self.cache.put(saved.clone());
                info!(album_id = %id, quantity = saved.quantity, "album updated");
                Ok(saved)
            }
            Err(StoreError::Missing(_)) => {
                self.cache.evict(id);
                Err(not_found(LookupKey::Id(id)))
            }
            Err(err) => {
                // Unknown whether the write landed; drop the entry so the next read goes to the store.
                self.cache.evict(id);
                Err(store_failure("save")(err))
            }
        }
    }

    pub fn delete_by_id(&self, id: AlbumId) -> Result<(), InventoryError> {
        let _guard = self.lock_id(id);

        if self
            .store
            .find_by_id(id)
            .map_err(store_failure("find_by_id"))?
            .is_none()
        {
            self.cache.evict(id);
            return Err(not_found(LookupKey::Id(id)));
        }

        let result = self.store.delete_by_id(id);
        self.cache.evict(id);

        match result {
            Ok(()) => {
                info!(album_id = %id, "album deleted");
                Ok(())
            }
            Err(StoreError::Missing(_)) => Err(not_found(LookupKey::Id(id))),
            Err(err) => Err(store_failure("delete_by_id")(err)),
        }
    }

    pub fn get_by_artist(&self, artist: &str) -> Result<Vec<Album>, InventoryError> {
        let albums = self
            .store
            .find_by_artist(artist)
            .map_err(store_failure("find_by_artist"))?;
        if albums.is_empty() {
            return Err(not_found(LookupKey::Artist(artist.to_string())));
        }
        Ok(albums)
    }

    pub fn get_by_genre(&self, genre: Genre) -> Result<Vec<Album>, InventoryError> {
        let albums = self
            .store
            .find_by_genre(genre)
            .map_err(store_failure("find_by_genre"))?;
        if albums.is_empty() {
            return Err(not_found(LookupKey::Genre(genre)));
        }
        Ok(albums)
    }

    /// Albums whose release date falls in `year`.
    pub fn get_by_year(&self, year: i32) -> Result<Vec<Album>, InventoryError> {
        let albums = self
            .store
            .find_by_release_year(year)
            .map_err(store_failure("find_by_release_year"))?;
        if albums.is_empty() {
            return Err(not_found(LookupKey::Year(year)));
        }
        Ok(albums)
    }

    /// Human-readable rendering of the album called `name` (lowest id on ties).
    pub fn get_info_by_name(&self, name: &str) -> Result<String, InventoryError> {
        self.store
            .find_by_name(name)
            .map_err(store_failure("find_by_name"))?
            .map(|album| album.to_string())
            .ok_or_else(|| not_found(LookupKey::Name(name.to_string())))
    }
}
