use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::CategoryId;
use crate::vector::Vector;

/// Confidence assigned to entries created from bulk import / rule application.
pub const SEED_CONFIDENCE: f32 = 0.9;

/// Confidence assigned to entries created or overwritten by a user correction.
pub const CORRECTION_CONFIDENCE: f32 = 0.95;

/// Provenance of a knowledge-base entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeSource {
    /// Created during import or by rule application.
    Seed,
    /// Created or overwritten by a manual user recategorization.
    UserCorrection,
}

impl KnowledgeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::UserCorrection => "user_correction",
        }
    }
}

impl std::fmt::Display for KnowledgeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A learned merchant-to-category example, shared across all users'
/// transactions for a given merchant name. The set of classified entries is
/// the training set for embedding similarity search.
///
/// Keyed by `merchant_name`. Entries are created on first encounter of an
/// unseen merchant and updated by user corrections (most recent wins); they
/// are never deleted through this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantKnowledgeEntry {
    /// Original/raw key, unique per merchant.
    pub merchant_name: String,
    /// Canonical display form produced by the normalizer.
    pub normalized_name: String,
    /// Null until the merchant has been classified at least once.
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_slug: Option<String>,
    /// Provenance-weighted confidence in the stored category.
    pub confidence_score: f32,
    pub source: KnowledgeSource,
    /// Cached embedding of `normalized_name`. Derived, not authoritative:
    /// recomputable at any time and invalidated when the entry changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vector>,
    pub updated_at: DateTime<Utc>,
    /// Audit trail, e.g. the previous category id after an overwrite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl MerchantKnowledgeEntry {
    /// Entry created on first encounter during import or rule application.
    #[must_use]
    pub fn seed(
        merchant_name: impl Into<String>,
        normalized_name: impl Into<String>,
        category_id: Option<CategoryId>,
        category_slug: Option<String>,
    ) -> Self {
        Self {
            merchant_name: merchant_name.into(),
            normalized_name: normalized_name.into(),
            category_id,
            category_slug,
            confidence_score: SEED_CONFIDENCE,
            source: KnowledgeSource::Seed,
            embedding: None,
            updated_at: Utc::now(),
            metadata: None,
        }
    }

    /// Entry created from a user correction, timestamped at the correction.
    #[must_use]
    pub fn from_correction(
        merchant_name: impl Into<String>,
        normalized_name: impl Into<String>,
        category_id: CategoryId,
        category_slug: Option<String>,
        corrected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            merchant_name: merchant_name.into(),
            normalized_name: normalized_name.into(),
            category_id: Some(category_id),
            category_slug,
            confidence_score: CORRECTION_CONFIDENCE,
            source: KnowledgeSource::UserCorrection,
            embedding: None,
            updated_at: corrected_at,
            metadata: None,
        }
    }

    /// Whether the entry can serve as a training example.
    #[inline]
    pub fn is_classified(&self) -> bool {
        self.category_id.is_some()
    }

    /// Record the previous category in the metadata audit trail.
    pub fn record_previous_category(&mut self, previous: CategoryId) {
        let mut meta = match self.metadata.take() {
            Some(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        meta.insert(
            "previous_category_id".to_string(),
            serde_json::Value::String(previous.to_string()),
        );
        self.metadata = Some(serde_json::Value::Object(meta));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_entry_defaults() {
        let entry = MerchantKnowledgeEntry::seed("TIM HORTONS #123", "tim hortons", None, None);
        assert_eq!(entry.source, KnowledgeSource::Seed);
        assert_eq!(entry.confidence_score, SEED_CONFIDENCE);
        assert!(!entry.is_classified());
    }

    #[test]
    fn test_correction_entry() {
        let id = CategoryId::new();
        let entry = MerchantKnowledgeEntry::from_correction(
            "STARBUCKS",
            "starbucks",
            id,
            Some("coffee".to_string()),
            Utc::now(),
        );
        assert_eq!(entry.source, KnowledgeSource::UserCorrection);
        assert_eq!(entry.confidence_score, CORRECTION_CONFIDENCE);
        assert!(entry.is_classified());
    }

    #[test]
    fn test_record_previous_category() {
        let old = CategoryId::new();
        let mut entry =
            MerchantKnowledgeEntry::from_correction("X", "x", CategoryId::new(), None, Utc::now());
        entry.record_previous_category(old);

        let meta = entry.metadata.as_ref().unwrap();
        assert_eq!(
            meta["previous_category_id"],
            serde_json::Value::String(old.to_string())
        );
    }
}
