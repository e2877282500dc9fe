//! Persistence seam for the categorization engine.
//!
//! The surrounding application owns the actual database; this crate only
//! defines the narrow read/write surface the engine needs and ships an
//! in-memory reference implementation for tests and embedded use.

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::category::CategoryId;
use crate::error::Result;
use crate::knowledge::MerchantKnowledgeEntry;
use crate::transaction::CorrectedTransaction;

/// Read/write surface over the merchant knowledge base and the correction
/// backlog. Implementations must be safe to share across threads.
pub trait Store: Send + Sync {
    /// All knowledge entries with a non-null category, i.e. the training set.
    fn load_classified(&self) -> Result<Vec<MerchantKnowledgeEntry>>;

    /// Look up one entry by its merchant-name key.
    fn get_entry(&self, merchant_name: &str) -> Result<Option<MerchantKnowledgeEntry>>;

    /// Insert or replace one entry by its merchant-name key.
    fn upsert_entry(&self, entry: MerchantKnowledgeEntry) -> Result<()>;

    /// Transactions flagged user-corrected with a non-null category,
    /// optionally scoped to one user, most recently corrected first.
    fn corrected_transactions(&self, user_id: Option<&str>) -> Result<Vec<CorrectedTransaction>>;

    /// Resolve a category slug to its opaque id.
    fn resolve_category(&self, slug: &str) -> Option<CategoryId>;

    /// Resolve a subcategory slug to its opaque id.
    fn resolve_subcategory(&self, slug: &str) -> Option<CategoryId>;

    /// Total number of knowledge entries (classified or not).
    fn knowledge_size(&self) -> Result<usize>;
}

/// In-memory [`Store`] backed by hash maps.
///
/// The reference implementation: tests and single-process embedders use it
/// directly; server deployments implement [`Store`] over their database.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<AHashMap<String, MerchantKnowledgeEntry>>,
    corrections: RwLock<Vec<CorrectedTransaction>>,
    categories: RwLock<AHashMap<String, CategoryId>>,
    subcategories: RwLock<AHashMap<String, CategoryId>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a category slug, minting an id for it. Returns the id.
    pub fn register_category(&self, slug: impl Into<String>) -> CategoryId {
        let id = CategoryId::new();
        self.categories.write().insert(slug.into(), id);
        id
    }

    /// Register a subcategory slug, minting an id for it. Returns the id.
    pub fn register_subcategory(&self, slug: impl Into<String>) -> CategoryId {
        let id = CategoryId::new();
        self.subcategories.write().insert(slug.into(), id);
        id
    }

    /// Record a user correction for the learner to pick up.
    pub fn push_correction(&self, correction: CorrectedTransaction) {
        self.corrections.write().push(correction);
    }
}

impl Store for MemoryStore {
    fn load_classified(&self) -> Result<Vec<MerchantKnowledgeEntry>> {
        Ok(self
            .entries
            .read()
            .values()
            .filter(|e| e.is_classified())
            .cloned()
            .collect())
    }

    fn get_entry(&self, merchant_name: &str) -> Result<Option<MerchantKnowledgeEntry>> {
        Ok(self.entries.read().get(merchant_name).cloned())
    }

    fn upsert_entry(&self, entry: MerchantKnowledgeEntry) -> Result<()> {
        self.entries
            .write()
            .insert(entry.merchant_name.clone(), entry);
        Ok(())
    }

    fn corrected_transactions(&self, user_id: Option<&str>) -> Result<Vec<CorrectedTransaction>> {
        let mut rows: Vec<CorrectedTransaction> = self
            .corrections
            .read()
            .iter()
            .filter(|c| match user_id {
                Some(uid) => c.user_id.as_deref() == Some(uid),
                None => true,
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.corrected_at.cmp(&a.corrected_at));
        Ok(rows)
    }

    fn resolve_category(&self, slug: &str) -> Option<CategoryId> {
        self.categories.read().get(slug).copied()
    }

    fn resolve_subcategory(&self, slug: &str) -> Option<CategoryId> {
        self.subcategories.read().get(slug).copied()
    }

    fn knowledge_size(&self) -> Result<usize> {
        Ok(self.entries.read().len())
    }
}
