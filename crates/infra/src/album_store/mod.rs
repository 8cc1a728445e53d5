//! Durable album storage boundary.
//!
//! The inventory service consumes `AlbumStore`; absence is reported as
//! `None`/empty results, never as an error.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryAlbumStore;
pub use postgres::PostgresAlbumStore;
pub use r#trait::{AlbumStore, StoreError};
