//! Album lookup cache abstractions.

pub mod album_cache;

pub use album_cache::{AlbumCache, DisabledCache, InMemoryAlbumCache};
