//! The rule-vs-embedding decision table.
//!
//! Kept as a pure function over the two stage outcomes so the business logic
//! is auditable and testable without running either engine.

use serde::{Deserialize, Serialize};

use autocat_embed::EmbeddingOutcome;
use autocat_rules::RuleMatch;

/// How a categorization decision was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// The rule engine's answer was used (alone, or after the embedding
    /// stage failed to beat it without producing a category).
    RuleBased,
    /// The embedding engine's answer beat the rule engine's confidence.
    Ml,
    /// Both stages produced a category; the rule answer was kept.
    Hybrid,
    /// Neither stage produced a category.
    None,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RuleBased => "rule-based",
            Self::Ml => "ml",
            Self::Hybrid => "hybrid",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Choose the winning stage once both have been consulted.
///
/// A missing embedding outcome means the stage was unavailable or returned
/// nothing usable. The rule result, when present, always carries a category.
/// The embedding result wins only with a category and strictly greater
/// confidence than the rule's (0 when no rule matched).
#[must_use]
pub fn decide(rule: Option<&RuleMatch>, embedding: Option<&EmbeddingOutcome>) -> Method {
    let rule_confidence = rule.map(|r| r.confidence).unwrap_or(0.0);
    let embedding_wins = embedding
        .map(|e| e.has_category() && e.confidence > rule_confidence)
        .unwrap_or(false);

    match (rule, embedding) {
        (_, Some(_)) if embedding_wins => Method::Ml,
        (Some(_), Some(e)) if e.has_category() => Method::Hybrid,
        (Some(_), _) => Method::RuleBased,
        (None, _) => Method::None,
    }
}
