use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::category::CategoryId;

/// A bank transaction to categorize.
///
/// Ephemeral: constructed per categorization call by the import pipeline or
/// the edit UI, never persisted by this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionInput {
    pub description: String,
    pub merchant_name: String,
    /// Signed amount: negative = debit/expense, positive = credit/income.
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl TransactionInput {
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        merchant_name: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            description: description.into(),
            merchant_name: merchant_name.into(),
            amount,
            date: None,
        }
    }

    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    #[inline]
    pub fn is_debit(&self) -> bool {
        self.amount < 0.0
    }
}

/// A user-corrected transaction row, as read back through the [`Store`] seam.
///
/// Corrections are treated as ground truth by the online learner.
///
/// [`Store`]: crate::Store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectedTransaction {
    pub merchant_name: String,
    pub description: String,
    pub category_id: CategoryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<CategoryId>,
    /// Slug of the corrected category, when the caller has it on hand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_slug: Option<String>,
    pub corrected_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl CorrectedTransaction {
    #[must_use]
    pub fn new(
        merchant_name: impl Into<String>,
        category_id: CategoryId,
        corrected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            merchant_name: merchant_name.into(),
            description: String::new(),
            category_id,
            subcategory_id: None,
            category_slug: None,
            corrected_at,
            user_id: None,
        }
    }

    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.category_slug = Some(slug.into());
        self
    }
}
