//! Postgres-backed album store.
//!
//! Expects the `albums` table to exist (schema migration is handled outside
//! this crate):
//!
//! ```sql
//! CREATE TABLE albums (
//!     id           BIGSERIAL PRIMARY KEY,
//!     name         TEXT    NOT NULL,
//!     artist       TEXT    NOT NULL,
//!     genre        TEXT    NOT NULL,
//!     release_date DATE    NOT NULL,
//!     track_count  INTEGER NOT NULL DEFAULT 0 CHECK (track_count >= 0),
//!     description  TEXT    NULL,
//!     quantity     INTEGER NOT NULL DEFAULT 0 CHECK (quantity >= 0)
//! );
//! ```

use std::future::Future;

use chrono::NaiveDate;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tokio::runtime::Runtime;
use tracing::instrument;

use recordshop_catalog::{Album, Genre, NewAlbum};
use recordshop_core::AlbumId;

use super::r#trait::{AlbumStore, StoreError};

const SELECT_COLUMNS: &str =
    "SELECT id, name, artist, genre, release_date, track_count, description, quantity FROM albums";

/// Postgres-backed album store.
///
/// ## Sync Boundary
///
/// `AlbumStore` is synchronous. The store owns a small tokio runtime and
/// drives each sqlx call to completion on it, so callers never need to be
/// inside an async context. Do not call it from within another tokio
/// runtime's worker thread.
///
/// ## Thread Safety
///
/// `PgPool` is `Send + Sync`; concurrent callers share the pool.
pub struct PostgresAlbumStore {
    pool: PgPool,
    runtime: Runtime,
}

impl PostgresAlbumStore {
    /// Connect to `database_url` with at most `max_connections` pooled connections.
    pub fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("recordshop-pg")
            .enable_all()
            .build()
            .map_err(|e| StoreError::Backend(format!("failed to start runtime: {e}")))?;

        let pool = runtime
            .block_on(
                PgPoolOptions::new()
                    .max_connections(max_connections)
                    .connect(database_url),
            )
            .map_err(backend)?;

        Ok(Self { pool, runtime })
    }

    fn run<T>(&self, fut: impl Future<Output = Result<T, StoreError>>) -> Result<T, StoreError> {
        self.runtime.block_on(fut)
    }

    async fn fetch_many(&self, sql: String, bind: Bind<'_>) -> Result<Vec<Album>, StoreError> {
        let query = sqlx::query(&sql);
        let query = match bind {
            Bind::None => query,
            Bind::Text(v) => query.bind(v),
            Bind::Int(v) => query.bind(v),
        };
        let rows = query.fetch_all(&self.pool).await.map_err(backend)?;
        rows.iter().map(album_from_row).collect()
    }
}

enum Bind<'a> {
    None,
    Text(&'a str),
    Int(i32),
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn to_column(field: &str, value: u32) -> Result<i32, StoreError> {
    i32::try_from(value).map_err(|_| StoreError::Constraint(format!("{field} {value} exceeds column range")))
}

fn from_column(field: &str, value: i32) -> Result<u32, StoreError> {
    u32::try_from(value).map_err(|_| StoreError::Corrupt(format!("negative {field}: {value}")))
}

fn album_from_row(row: &PgRow) -> Result<Album, StoreError> {
    let corrupt = |e: sqlx::Error| StoreError::Corrupt(e.to_string());

    let genre: String = row.try_get("genre").map_err(corrupt)?;
    let genre: Genre = genre
        .parse()
        .map_err(|e| StoreError::Corrupt(format!("{e}")))?;

    Ok(Album {
        id: AlbumId::new(row.try_get::<i64, _>("id").map_err(corrupt)?),
        name: row.try_get("name").map_err(corrupt)?,
        artist: row.try_get("artist").map_err(corrupt)?,
        genre,
        release_date: row.try_get::<NaiveDate, _>("release_date").map_err(corrupt)?,
        track_count: from_column("track_count", row.try_get("track_count").map_err(corrupt)?)?,
        description: row.try_get("description").map_err(corrupt)?,
        quantity: from_column("quantity", row.try_get("quantity").map_err(corrupt)?)?,
    })
}

impl AlbumStore for PostgresAlbumStore {
    #[instrument(skip_all, fields(operation = "create_album"))]
    fn create(&self, album: NewAlbum) -> Result<Album, StoreError> {
        album.validate()?;
        let track_count = to_column("track_count", album.track_count)?;
        let quantity = to_column("quantity", album.quantity)?;

        self.run(async {
            let row = sqlx::query(
                r#"
                INSERT INTO albums (name, artist, genre, release_date, track_count, description, quantity)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, name, artist, genre, release_date, track_count, description, quantity
                "#,
            )
            .bind(&album.name)
            .bind(&album.artist)
            .bind(album.genre.as_str())
            .bind(album.release_date)
            .bind(track_count)
            .bind(&album.description)
            .bind(quantity)
            .fetch_one(&self.pool)
            .await
            .map_err(backend)?;

            album_from_row(&row)
        })
    }

    #[instrument(skip(self), fields(operation = "find_album_by_id"))]
    fn find_by_id(&self, id: AlbumId) -> Result<Option<Album>, StoreError> {
        self.run(async {
            let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = $1"))
                .bind(id.get())
                .fetch_optional(&self.pool)
                .await
                .map_err(backend)?;

            row.as_ref().map(album_from_row).transpose()
        })
    }

    fn find_all(&self) -> Result<Vec<Album>, StoreError> {
        self.run(self.fetch_many(format!("{SELECT_COLUMNS} ORDER BY id"), Bind::None))
    }

    fn find_by_artist(&self, artist: &str) -> Result<Vec<Album>, StoreError> {
        self.run(self.fetch_many(
            format!("{SELECT_COLUMNS} WHERE artist = $1 ORDER BY id"),
            Bind::Text(artist),
        ))
    }

    fn find_by_genre(&self, genre: Genre) -> Result<Vec<Album>, StoreError> {
        self.run(self.fetch_many(
            format!("{SELECT_COLUMNS} WHERE genre = $1 ORDER BY id"),
            Bind::Text(genre.as_str()),
        ))
    }

    fn find_by_release_year(&self, year: i32) -> Result<Vec<Album>, StoreError> {
        self.run(self.fetch_many(
            format!("{SELECT_COLUMNS} WHERE EXTRACT(YEAR FROM release_date)::INTEGER = $1 ORDER BY id"),
            Bind::Int(year),
        ))
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Album>, StoreError> {
        self.run(async {
            let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE name = $1 ORDER BY id LIMIT 1"))
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(backend)?;

            row.as_ref().map(album_from_row).transpose()
        })
    }

    #[instrument(skip_all, fields(operation = "save_album", album_id = %album.id))]
    fn save(&self, album: Album) -> Result<Album, StoreError> {
        album.validate()?;
        let track_count = to_column("track_count", album.track_count)?;
        let quantity = to_column("quantity", album.quantity)?;

        self.run(async {
            let row = sqlx::query(
                r#"
                UPDATE albums SET
                    name = $2,
                    artist = $3,
                    genre = $4,
                    release_date = $5,
                    track_count = $6,
                    description = $7,
                    quantity = $8
                WHERE id = $1
                RETURNING id, name, artist, genre, release_date, track_count, description, quantity
                "#,
            )
            .bind(album.id.get())
            .bind(&album.name)
            .bind(&album.artist)
            .bind(album.genre.as_str())
            .bind(album.release_date)
            .bind(track_count)
            .bind(&album.description)
            .bind(quantity)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;

            match row {
                Some(row) => album_from_row(&row),
                None => Err(StoreError::Missing(album.id)),
            }
        })
    }

    #[instrument(skip(self), fields(operation = "delete_album"))]
    fn delete_by_id(&self, id: AlbumId) -> Result<(), StoreError> {
        self.run(async {
            let result = sqlx::query("DELETE FROM albums WHERE id = $1")
                .bind(id.get())
                .execute(&self.pool)
                .await
                .map_err(backend)?;

            if result.rows_affected() == 0 {
                return Err(StoreError::Missing(id));
            }
            Ok(())
        })
    }
}
