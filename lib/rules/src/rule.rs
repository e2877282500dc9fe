use serde::{Deserialize, Serialize};

/// A keyword rule mapping merchant text to a category.
///
/// Rules are static product data compiled into the engine, not persisted
/// per-user. `confidence` reflects the precision of the rule: brand keywords
/// are near-certain, generic words much less so.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizationRule {
    /// Case-insensitive substrings; any hit matches the rule.
    pub keywords: Vec<String>,
    pub category_slug: String,
    pub subcategory_slug: Option<String>,
    /// In (0, 1]. Fixed per rule.
    pub confidence: f32,
    /// Higher sorts first. Ties keep declaration order.
    pub priority: i32,
}

impl CategorizationRule {
    #[must_use]
    pub fn new(
        priority: i32,
        confidence: f32,
        category_slug: impl Into<String>,
        subcategory_slug: Option<&str>,
        keywords: &[&str],
    ) -> Self {
        Self {
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            category_slug: category_slug.into(),
            subcategory_slug: subcategory_slug.map(str::to_string),
            confidence,
            priority,
        }
    }
}

/// Outcome of a rule-table scan. Diagnostic: carried on the final
/// categorization result even when the rule stage loses the vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleMatch {
    pub category_slug: String,
    pub subcategory_slug: Option<String>,
    pub confidence: f32,
    /// The keyword (as declared) that hit.
    pub matched_keyword: String,
    pub priority: i32,
}
