//! Snapshot loading and fingerprinting
//!
//! The host application delivers a consistent snapshot of one user's
//! restaurants and visits (it awaits both fetches before invoking the
//! engine). This module loads such a snapshot from JSON and derives a
//! stable fingerprint used as the cache key component.

use crate::error::{Error, Result};
use crate::types::{Restaurant, Visit};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;

/// A consistent, read-only view of one user's data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
    #[serde(default)]
    pub visits: Vec<Visit>,
}

impl Snapshot {
    /// Load a snapshot from a JSON file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Snapshot(format!("failed to read snapshot {}: {}", path.display(), e))
        })?;
        let snapshot: Snapshot = serde_json::from_str(&content)
            .map_err(|e| Error::Snapshot(format!("failed to parse snapshot: {}", e)))?;

        tracing::debug!(
            restaurants = snapshot.restaurants.len(),
            visits = snapshot.visits.len(),
            "Loaded snapshot"
        );

        Ok(snapshot)
    }

    /// Hex SHA-256 over the serialized snapshot.
    ///
    /// Two snapshots with identical content share a fingerprint, so cached
    /// statistics keyed on (fingerprint, period) stay valid exactly as long
    /// as the underlying collections are unchanged.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        // Serialization of these types is infallible: no maps with
        // non-string keys, no non-finite floats are introduced by us.
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        hasher.update(&bytes);
        hex::encode(hasher.finalize())
    }

    /// Lookup table from restaurant id to display name.
    ///
    /// Visits referencing an unknown restaurant resolve to the placeholder
    /// downstream.
    pub fn name_index(&self) -> HashMap<&str, &str> {
        self.restaurants
            .iter()
            .map(|r| (r.id.as_str(), r.name.as_str()))
            .collect()
    }
}
