//! Explicit construction of the inventory service from configuration.

use std::sync::Arc;

use anyhow::Context;

use crate::album_store::{AlbumStore, InMemoryAlbumStore, PostgresAlbumStore};
use crate::cache::{AlbumCache, DisabledCache, InMemoryAlbumCache};
use crate::config::CatalogConfig;
use crate::inventory_service::InventoryService;

/// Type-erased service, as wired from configuration.
pub type DynInventoryService = InventoryService<Arc<dyn AlbumStore>, Arc<dyn AlbumCache>>;

/// Build the service selected by `config`.
///
/// `DATABASE_URL` selects the Postgres store, otherwise the in-memory store.
pub fn build_service(config: &CatalogConfig) -> anyhow::Result<DynInventoryService> {
    let store: Arc<dyn AlbumStore> = match &config.database_url {
        Some(url) => {
            tracing::info!(max_connections = config.db_max_connections, "using postgres album store");
            let store = PostgresAlbumStore::connect(url, config.db_max_connections)
                .context("failed to connect postgres album store")?;
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory album store");
            Arc::new(InMemoryAlbumStore::new())
        }
    };

    let cache: Arc<dyn AlbumCache> = if config.cache_enabled {
        Arc::new(InMemoryAlbumCache::new())
    } else {
        tracing::info!("album lookup cache disabled");
        Arc::new(DisabledCache)
    };

    Ok(InventoryService::new(store, cache))
}
