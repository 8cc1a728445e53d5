//! Integration tests for the full inventory pipeline.
//!
//! Tests: InventoryService → AlbumCache → AlbumStore
//!
//! Verifies:
//! - The two-album catalog scenario end to end
//! - Deleted albums never resurface from the cache
//! - Concurrent same-id updates and reads leave cache and store agreeing

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use chrono::NaiveDate;

    use recordshop_catalog::{Album, AlbumPatch, Genre, NewAlbum};
    use recordshop_core::AlbumId;

    use crate::album_store::{AlbumStore, InMemoryAlbumStore};
    use crate::cache::{AlbumCache, InMemoryAlbumCache};
    use crate::inventory_service::{InventoryService, LookupKey};

    type Service = InventoryService<Arc<InMemoryAlbumStore>, Arc<InMemoryAlbumCache>>;

    fn test_album(name: &str, artist: &str, genre: Genre, year: i32, quantity: u32) -> NewAlbum {
        NewAlbum {
            name: name.to_string(),
            artist: artist.to_string(),
            genre,
            release_date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            track_count: 10,
            description: None,
            quantity,
        }
    }

    fn setup() -> (Service, Arc<InMemoryAlbumStore>, Arc<InMemoryAlbumCache>) {
        recordshop_observability::init_for_tests();
        let store = Arc::new(InMemoryAlbumStore::new());
        let cache = Arc::new(InMemoryAlbumCache::new());
        let service = InventoryService::new(store.clone(), cache.clone());
        (service, store, cache)
    }

    #[test]
    fn two_album_catalog_scenario() {
        let (service, store, _cache) = setup();
        let first = service.add(test_album("Album1", "A", Genre::Rock, 2001, 5)).unwrap();
        let second = service.add(test_album("Album2", "B", Genre::Jazz, 2002, 7)).unwrap();
        assert_eq!(first.id, AlbumId::new(1));
        assert_eq!(second.id, AlbumId::new(2));

        assert_eq!(service.get_by_genre(Genre::Jazz).unwrap(), vec![second.clone()]);

        let err = service.get_by_genre(Genre::Pop).unwrap_err();
        assert_eq!(err.lookup_key(), Some(&LookupKey::Genre(Genre::Pop)));

        let updated = service
            .update(first.id, AlbumPatch { quantity: 3, ..AlbumPatch::from(&first) })
            .unwrap();
        assert_eq!(updated.quantity, 3);
        assert_eq!(service.get_by_id(first.id).unwrap().quantity, 3);

        service.delete_by_id(second.id).unwrap();
        let err = service.get_by_id(second.id).unwrap_err();
        assert_eq!(err.lookup_key(), Some(&LookupKey::Id(second.id)));

        assert_eq!(store.find_all().unwrap(), vec![updated]);
    }

    #[test]
    fn cached_album_is_gone_after_delete() {
        let (service, _store, cache) = setup();
        let album = service.add(test_album("A", "X", Genre::Blues, 1969, 1)).unwrap();

        assert_eq!(service.get_by_id(album.id).unwrap(), album);
        assert_eq!(cache.get(album.id), Some(album.clone()));

        service.delete_by_id(album.id).unwrap();

        assert!(cache.is_empty());
        assert!(service.get_by_id(album.id).unwrap_err().is_not_found());
        assert!(service.delete_by_id(album.id).unwrap_err().is_not_found());
    }

    #[test]
    fn list_all_preserves_insertion_order() {
        let (service, _store, _cache) = setup();
        let names = ["C", "A", "B"];
        for name in names {
            service.add(test_album(name, "X", Genre::Pop, 2000, 1)).unwrap();
        }

        let listed: Vec<String> = service.list_all().unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(listed, names);
    }

    #[test]
    fn concurrent_updates_and_reads_keep_cache_consistent() {
        let (service, store, cache) = setup();
        let service = Arc::new(service);
        let album = service.add(test_album("A", "X", Genre::Electronic, 2010, 0)).unwrap();

        let writers: Vec<_> = (1..=4u32)
            .map(|w| {
                let service = service.clone();
                let base = album.clone();
                thread::spawn(move || {
                    for i in 0..50u32 {
                        let patch = AlbumPatch {
                            quantity: w * 1000 + i,
                            ..AlbumPatch::from(&base)
                        };
                        service.update(base.id, patch).unwrap();
                    }
                })
            })
            .collect();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let service = service.clone();
                let id = album.id;
                thread::spawn(move || {
                    for i in 0..100 {
                        service.get_by_id(id).unwrap();
                        if i % 2 == 0 {
                            // Force misses so reads race the store path too.
                            service.cache().evict(id);
                        }
                    }
                })
            })
            .collect();

        for handle in writers.into_iter().chain(readers) {
            handle.join().unwrap();
        }

        let stored: Album = store.find_by_id(album.id).unwrap().unwrap();
        if let Some(cached) = cache.get(album.id) {
            assert_eq!(cached, stored);
        }
        assert_eq!(service.get_by_id(album.id).unwrap(), stored);
    }

    #[test]
    fn concurrent_delete_never_leaves_stale_entry() {
        for _ in 0..20 {
            let (service, _store, cache) = setup();
            let service = Arc::new(service);
            let id = service.add(test_album("A", "X", Genre::Country, 1975, 1)).unwrap().id;

            let reader = {
                let service = service.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        let _ = service.get_by_id(id);
                    }
                })
            };
            let deleter = {
                let service = service.clone();
                thread::spawn(move || service.delete_by_id(id))
            };

            deleter.join().unwrap().unwrap();
            reader.join().unwrap();

            assert_eq!(cache.get(id), None);
            assert!(service.get_by_id(id).unwrap_err().is_not_found());
        }
    }
}
