//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of an album.
///
/// Assigned by the store when an album is created and never reused after
/// deletion. Backed by `i64` so it maps directly onto a `BIGSERIAL` column.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumId(i64);

impl AlbumId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for AlbumId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for AlbumId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<AlbumId> for i64 {
    fn from(value: AlbumId) -> Self {
        value.0
    }
}

impl FromStr for AlbumId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|e| DomainError::invalid_id(format!("AlbumId: {e}")))?;
        if value <= 0 {
            return Err(DomainError::invalid_id(format!(
                "AlbumId: must be positive, got {value}"
            )));
        }
        Ok(Self(value))
    }
}
