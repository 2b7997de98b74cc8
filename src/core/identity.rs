//! Catalog entry identity using type-prefixed ULIDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Prefix carried by every catalog entry ID
pub const CATALOG_PREFIX: &str = "CAT";

/// A unique catalog entry identifier (`CAT-<ULID>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogId(Ulid);

impl CatalogId {
    /// Create a fresh identifier
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Get the ULID component
    pub fn ulid(&self) -> Ulid {
        self.0
    }

    /// Parse a CatalogId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl Default for CatalogId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", CATALOG_PREFIX, self.0)
    }
}

impl FromStr for CatalogId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        if !prefix.eq_ignore_ascii_case(CATALOG_PREFIX) {
            return Err(IdParseError::InvalidPrefix(prefix.to_string()));
        }

        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| IdParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self(ulid))
    }
}

impl Serialize for CatalogId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CatalogId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing catalog IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid catalog ID prefix: '{0}' (expected CAT)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in catalog ID: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_id_generation() {
        let id = CatalogId::new();
        assert!(id.to_string().starts_with("CAT-"));
        assert_eq!(id.to_string().len(), 30); // CAT- (4) + ULID (26) = 30
    }

    #[test]
    fn test_catalog_id_roundtrip() {
        let original = CatalogId::new();
        let parsed = CatalogId::parse(&original.to_string()).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_catalog_id_invalid_prefix() {
        let err = CatalogId::parse("XXX-01HQ3K4N5M6P7R8S9T0UVWXYZ").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidPrefix(_)));
    }

    #[test]
    fn test_catalog_id_missing_delimiter() {
        let err = CatalogId::parse("CAT01HQ3K4N5M6P7R8S9T0UVWXYZ").unwrap_err();
        assert!(matches!(err, IdParseError::MissingDelimiter(_)));
    }

    #[test]
    fn test_catalog_id_invalid_ulid() {
        let err = CatalogId::parse("CAT-notaulid").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidUlid(_, _)));
    }
}
