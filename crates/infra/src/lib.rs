//! Infrastructure layer: album storage, lookup cache, inventory service, config.

pub mod album_store;
pub mod cache;
pub mod config;
pub mod inventory_service;
pub mod wiring;

mod integration_tests;

pub use album_store::{AlbumStore, InMemoryAlbumStore, PostgresAlbumStore, StoreError};
pub use cache::{AlbumCache, DisabledCache, InMemoryAlbumCache};
pub use config::CatalogConfig;
pub use inventory_service::{InventoryError, InventoryService, LookupKey};
pub use wiring::{DynInventoryService, build_service};
