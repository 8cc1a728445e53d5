use core::str::FromStr;

use serde::{Deserialize, Serialize};

use recordshop_core::DomainError;

/// Musical genre of an album (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Genre {
    Rock,
    Classical,
    Pop,
    Afrobeat,
    Country,
    Electronic,
    HipHop,
    Jazz,
    Disco,
    Blues,
}

impl Genre {
    pub const ALL: [Genre; 10] = [
        Genre::Rock,
        Genre::Classical,
        Genre::Pop,
        Genre::Afrobeat,
        Genre::Country,
        Genre::Electronic,
        Genre::HipHop,
        Genre::Jazz,
        Genre::Disco,
        Genre::Blues,
    ];

    /// Canonical upper-case name, as stored and exchanged on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Rock => "ROCK",
            Genre::Classical => "CLASSICAL",
            Genre::Pop => "POP",
            Genre::Afrobeat => "AFROBEAT",
            Genre::Country => "COUNTRY",
            Genre::Electronic => "ELECTRONIC",
            Genre::HipHop => "HIP_HOP",
            Genre::Jazz => "JAZZ",
            Genre::Disco => "DISCO",
            Genre::Blues => "BLUES",
        }
    }
}

impl core::fmt::Display for Genre {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; accepts `-` or space in place of `_` (e.g. "hip-hop").
impl FromStr for Genre {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        Genre::ALL
            .into_iter()
            .find(|g| g.as_str() == normalized)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "unknown genre '{s}'; expected one of: {}",
                    Genre::ALL.map(|g| g.as_str()).join(", ")
                ))
            })
    }
}
