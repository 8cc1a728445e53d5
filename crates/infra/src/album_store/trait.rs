use std::sync::Arc;

use thiserror::Error;

use recordshop_catalog::{Album, Genre, NewAlbum};
use recordshop_core::{AlbumId, DomainError};

/// Album store operation error.
///
/// These are **infrastructure errors**. Absence of a record is never an error
/// at this level: lookups report it with `None` or an empty `Vec`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record was rejected by a storage constraint (blank name, ...).
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// `save`/`delete_by_id` targeted an id the store does not hold.
    #[error("album {0} does not exist")]
    Missing(AlbumId),

    /// The backend failed (connection, driver, poisoned lock).
    #[error("store backend failure: {0}")]
    Backend(String),

    /// A persisted row could not be decoded into an album.
    #[error("corrupt album record: {0}")]
    Corrupt(String),
}

impl From<DomainError> for StoreError {
    fn from(value: DomainError) -> Self {
        StoreError::Constraint(value.to_string())
    }
}

/// Durable album storage.
///
/// ## Ordering
///
/// Every multi-record query returns albums ordered by id, which is creation
/// order since ids are assigned monotonically.
///
/// ## Identifiers
///
/// Callers hand `create` a `NewAlbum` and get back the record with a fresh
/// id. Ids are never reused after deletion.
pub trait AlbumStore: Send + Sync {
    /// Persist a new album and assign its identifier.
    fn create(&self, album: NewAlbum) -> Result<Album, StoreError>;

    fn find_by_id(&self, id: AlbumId) -> Result<Option<Album>, StoreError>;

    fn find_all(&self) -> Result<Vec<Album>, StoreError>;

    fn find_by_artist(&self, artist: &str) -> Result<Vec<Album>, StoreError>;

    fn find_by_genre(&self, genre: Genre) -> Result<Vec<Album>, StoreError>;

    fn find_by_release_year(&self, year: i32) -> Result<Vec<Album>, StoreError>;

    /// Exact name match. When several albums share a name the lowest id wins.
    fn find_by_name(&self, name: &str) -> Result<Option<Album>, StoreError>;

    /// Overwrite an existing record. Fails with `Missing` for unknown ids.
    fn save(&self, album: Album) -> Result<Album, StoreError>;

    /// Remove a record. Fails with `Missing` for unknown ids.
    fn delete_by_id(&self, id: AlbumId) -> Result<(), StoreError>;
}

impl<S> AlbumStore for Arc<S>
where
    S: AlbumStore + ?Sized,
{
    fn create(&self, album: NewAlbum) -> Result<Album, StoreError> {
        (**self).create(album)
    }

    fn find_by_id(&self, id: AlbumId) -> Result<Option<Album>, StoreError> {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> Result<Vec<Album>, StoreError> {
        (**self).find_all()
    }

    fn find_by_artist(&self, artist: &str) -> Result<Vec<Album>, StoreError> {
        (**self).find_by_artist(artist)
    }

    fn find_by_genre(&self, genre: Genre) -> Result<Vec<Album>, StoreError> {
        (**self).find_by_genre(genre)
    }

    fn find_by_release_year(&self, year: i32) -> Result<Vec<Album>, StoreError> {
        (**self).find_by_release_year(year)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Album>, StoreError> {
        (**self).find_by_name(name)
    }

    fn save(&self, album: Album) -> Result<Album, StoreError> {
        (**self).save(album)
    }

    fn delete_by_id(&self, id: AlbumId) -> Result<(), StoreError> {
        (**self).delete_by_id(id)
    }
}
