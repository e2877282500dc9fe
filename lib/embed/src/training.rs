//! Training-set snapshot types.
//!
//! The similarity engine classifies against a point-in-time snapshot of the
//! classified knowledge base. Snapshots are bincode-encoded for the durable
//! cache tier so multiple process instances share one embedding pass.

use autocat_core::{CategoryId, Error, Result, Vector};
use serde::{Deserialize, Serialize};

/// One classified merchant example.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingExample {
    pub normalized_name: String,
    pub category_id: CategoryId,
    pub category_slug: Option<String>,
    pub embedding: Vector,
}

/// The nearest-neighbor example set, built lazily from the knowledge base.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingSet {
    pub examples: Vec<TrainingExample>,
}

impl TrainingSet {
    #[inline]
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Encode for the durable cache tier.
    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Decode a durable-cache payload.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| Error::Serialization(e.to_string()))
    }
}
