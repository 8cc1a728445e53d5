use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use recordshop_core::{AlbumId, DomainError, DomainResult};

use crate::genre::Genre;

/// A persisted album record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub artist: String,
    pub genre: Genre,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub track_count: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: u32,
}

/// Input for creating an album. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAlbum {
    pub name: String,
    pub artist: String,
    pub genre: Genre,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub track_count: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: u32,
}

/// Full-record replacement of every mutable album field.
///
/// To change a single field, start from the current record:
/// `AlbumPatch { quantity: 3, ..AlbumPatch::from(&album) }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumPatch {
    pub name: String,
    pub artist: String,
    pub genre: Genre,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub track_count: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: u32,
}

fn ensure_present(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl NewAlbum {
    pub fn validate(&self) -> DomainResult<()> {
        ensure_present("name", &self.name)?;
        ensure_present("artist", &self.artist)
    }
}

impl AlbumPatch {
    pub fn validate(&self) -> DomainResult<()> {
        ensure_present("name", &self.name)?;
        ensure_present("artist", &self.artist)
    }
}

impl Album {
    /// Materialize a new album under a store-assigned id.
    pub fn from_new(id: AlbumId, new: NewAlbum) -> Self {
        Self {
            id,
            name: new.name,
            artist: new.artist,
            genre: new.genre,
            release_date: new.release_date,
            track_count: new.track_count,
            description: new.description,
            quantity: new.quantity,
        }
    }

    /// Copy every mutable field from `patch`. `id` is left untouched.
    pub fn apply_patch(&mut self, patch: AlbumPatch) {
        self.name = patch.name;
        self.artist = patch.artist;
        self.genre = patch.genre;
        self.release_date = patch.release_date;
        self.track_count = patch.track_count;
        self.description = patch.description;
        self.quantity = patch.quantity;
    }

    pub fn release_year(&self) -> i32 {
        self.release_date.year()
    }

    pub fn validate(&self) -> DomainResult<()> {
        ensure_present("name", &self.name)?;
        ensure_present("artist", &self.artist)
    }
}

impl From<&Album> for AlbumPatch {
    fn from(album: &Album) -> Self {
        Self {
            name: album.name.clone(),
            artist: album.artist.clone(),
            genre: album.genre,
            release_date: album.release_date,
            track_count: album.track_count,
            description: album.description.clone(),
            quantity: album.quantity,
        }
    }
}

impl From<Album> for NewAlbum {
    fn from(album: Album) -> Self {
        Self {
            name: album.name,
            artist: album.artist,
            genre: album.genre,
            release_date: album.release_date,
            track_count: album.track_count,
            description: album.description,
            quantity: album.quantity,
        }
    }
}

/// Human-readable single-line rendering of every field.
impl core::fmt::Display for Album {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Album(id={}, name={}, artist={}, genre={}, release_date={}, track_count={}, description={}, quantity={})",
            self.id,
            self.name,
            self.artist,
            self.genre,
            self.release_date,
            self.track_count,
            self.description.as_deref().unwrap_or("null"),
            self.quantity,
        )
    }
}
