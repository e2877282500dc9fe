//! First-match rule scanning.

use autocat_core::TransactionInput;

use crate::rule::{CategorizationRule, RuleMatch};
use crate::table::builtin_rules;

/// Deterministic keyword matcher over a prioritized rule table.
///
/// Rules are ordered once at construction by `(priority desc, declaration
/// index asc)` - the tie-break is part of the contract, not an artifact of
/// the sort algorithm. Matching returns the first keyword hit in that order
/// and stops; it never searches for a "better" match.
pub struct RuleEngine {
    rules: Vec<PreparedRule>,
}

struct PreparedRule {
    rule: CategorizationRule,
    /// Keywords pre-normalized the same way search text is.
    normalized_keywords: Vec<String>,
}

impl RuleEngine {
    #[must_use]
    pub fn new(rules: Vec<CategorizationRule>) -> Self {
        let mut indexed: Vec<(usize, CategorizationRule)> = rules.into_iter().enumerate().collect();
        indexed.sort_by(|a, b| b.1.priority.cmp(&a.1.priority).then(a.0.cmp(&b.0)));

        let rules = indexed
            .into_iter()
            .map(|(_, rule)| {
                let normalized_keywords = rule
                    .keywords
                    .iter()
                    .map(|k| normalize_search_text(k))
                    .collect();
                PreparedRule {
                    rule,
                    normalized_keywords,
                }
            })
            .collect();

        Self { rules }
    }

    /// Engine over the built-in table.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(builtin_rules())
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Scan the table for the first keyword contained in the transaction's
    /// combined description + merchant text. `None` when nothing matches.
    #[must_use]
    pub fn matches(&self, input: &TransactionInput) -> Option<RuleMatch> {
        let search =
            normalize_search_text(&format!("{} {}", input.description, input.merchant_name));
        if search.is_empty() {
            return None;
        }

        for prepared in &self.rules {
            for (keyword, normalized) in prepared
                .rule
                .keywords
                .iter()
                .zip(prepared.normalized_keywords.iter())
            {
                if !normalized.is_empty() && search.contains(normalized.as_str()) {
                    return Some(RuleMatch {
                        category_slug: prepared.rule.category_slug.clone(),
                        subcategory_slug: prepared.rule.subcategory_slug.clone(),
                        confidence: prepared.rule.confidence,
                        matched_keyword: keyword.clone(),
                        priority: prepared.rule.priority,
                    });
                }
            }
        }

        None
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Lowercase, replace non-alphanumerics with spaces, collapse whitespace.
/// Lighter than the merchant normalizer: rule keywords match against
/// relatively raw statement text, so no id/date/phone stripping here.
#[must_use]
pub fn normalize_search_text(text: &str) -> String {
    let mapped: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(description: &str, merchant: &str) -> TransactionInput {
        TransactionInput::new(description, merchant, -10.0)
    }

    fn overlap_table() -> Vec<CategorizationRule> {
        vec![
            CategorizationRule::new(50, 0.85, "dining", Some("restaurants"), &["restaurant"]),
            CategorizationRule::new(
                100,
                0.95,
                "dining",
                Some("fast-food"),
                &["mcdonalds restaurant", "mcdonalds"],
            ),
        ]
    }

    #[test]
    fn test_higher_priority_rule_preempts_generic() {
        let engine = RuleEngine::new(overlap_table());
        let m = engine
            .matches(&input("MCDONALDS RESTAURANT #40321", "McDonalds"))
            .unwrap();
        assert_eq!(m.subcategory_slug.as_deref(), Some("fast-food"));
        assert_eq!(m.confidence, 0.95);
        // First keyword in declared order wins, not the shortest or longest.
        assert_eq!(m.matched_keyword, "mcdonalds restaurant");
    }

    #[test]
    fn test_matching_is_deterministic() {
        let engine = RuleEngine::new(overlap_table());
        let tx = input("MCDONALDS #12", "");
        let first = engine.matches(&tx).unwrap();
        for _ in 0..10 {
            let again = engine.matches(&tx).unwrap();
            assert_eq!(again.matched_keyword, first.matched_keyword);
            assert_eq!(again.category_slug, first.category_slug);
        }
    }

    #[test]
    fn test_priority_tie_breaks_by_declaration_order() {
        let rules = vec![
            CategorizationRule::new(90, 0.9, "first", None, &["acme"]),
            CategorizationRule::new(90, 0.9, "second", None, &["acme"]),
        ];
        let engine = RuleEngine::new(rules);
        let m = engine.matches(&input("ACME SUPPLIES", "")).unwrap();
        assert_eq!(m.category_slug, "first");
    }

    #[test]
    fn test_no_match_returns_none() {
        let engine = RuleEngine::builtin();
        assert!(engine
            .matches(&input("ZZZYX UNHEARD OF LLC", "ZZZYX"))
            .is_none());
    }

    #[test]
    fn test_empty_input_returns_none() {
        let engine = RuleEngine::builtin();
        assert!(engine.matches(&input("", "")).is_none());
    }

    #[test]
    fn test_builtin_starbucks_hits_coffee() {
        let engine = RuleEngine::builtin();
        let m = engine
            .matches(&input("STARBUCKS COFFEE #12345", "Starbucks"))
            .unwrap();
        assert_eq!(m.category_slug, "dining");
        assert_eq!(m.subcategory_slug.as_deref(), Some("coffee"));
        assert_eq!(m.confidence, 0.90);
    }

    #[test]
    fn test_keyword_matching_ignores_punctuation_and_case() {
        let engine = RuleEngine::builtin();
        let m = engine.matches(&input("TIM-HORTONS/0233", "")).unwrap();
        assert_eq!(m.subcategory_slug.as_deref(), Some("coffee"));
    }

    #[test]
    fn test_search_text_normalization() {
        assert_eq!(normalize_search_text("McDonald's  #42!"), "mcdonald s 42");
        assert_eq!(normalize_search_text(""), "");
    }
}
