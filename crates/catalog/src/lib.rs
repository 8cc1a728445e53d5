//! Album catalog domain module.
//!
//! This crate contains the album record and its genre, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod album;
pub mod genre;

pub use album::{Album, AlbumPatch, NewAlbum};
pub use genre::Genre;
