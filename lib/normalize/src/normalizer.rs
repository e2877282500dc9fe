//! Statement-line cleanup.
//!
//! Bank statement merchant strings carry transaction ids, dates, store
//! numbers, locations and phone numbers alongside the actual merchant name.
//! [`Normalizer`] strips that noise down to a canonical, comparable form.

use regex::Regex;

/// Sentinel returned for input that has no usable merchant text left after
/// cleaning (empty, whitespace, or shorter than two characters).
pub const UNKNOWN_MERCHANT: &str = "Unknown Merchant";

/// Deterministic, total merchant-string normalizer.
///
/// All regexes are compiled once at construction; the normalizer is cheap to
/// clone behind an `Arc` and safe to share across threads.
pub struct Normalizer {
    reference_ids: Regex,
    dates: Regex,
    times: Regex,
    store_ids: Regex,
    locations: Regex,
    postal_codes: Regex,
    phone_numbers: Regex,
    urls: Regex,
    emails: Regex,
    punctuation: Regex,
    whitespace: Regex,
}

impl Normalizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            // Short reference keyword (or a bare '#') glued to digits.
            reference_ids: Regex::new(
                r"(?:\b(?:ref|trans|transaction|id|no|num)\b|#)\s*[:#-]?\s*\d+",
            )
            .expect("invalid reference-id pattern"),
            dates: Regex::new(r"\b\d{1,4}[/-]\d{1,2}[/-]\d{1,4}\b").expect("invalid date pattern"),
            times: Regex::new(r"\b\d{1,2}:\d{2}(?::\d{2})?\b").expect("invalid time pattern"),
            store_ids: Regex::new(r"\b(?:store|location|branch|unit)\b\s*#?\s*\d+")
                .expect("invalid store-id pattern"),
            // City words followed by a two-letter Canadian province code;
            // everything from the fragment through end of string is location
            // noise, postal code included.
            locations: Regex::new(
                r"(?:[,-]\s[a-z'\s\.]*?\b|\s[a-z']+\s+)(?:ab|bc|mb|nb|nl|ns|nt|nu|on|pe|qc|sk|yt)\b.*$",
            )
            .expect("invalid location pattern"),
            postal_codes: Regex::new(r"\b[a-z]\d[a-z]\s*\d[a-z]\d\b")
                .expect("invalid postal-code pattern"),
            phone_numbers: Regex::new(r"\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b")
                .expect("invalid phone pattern"),
            urls: Regex::new(r"https?://\S+|www\.\S+").expect("invalid url pattern"),
            emails: Regex::new(r"\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b")
                .expect("invalid email pattern"),
            punctuation: Regex::new(r"[^a-z0-9 &']").expect("invalid punctuation pattern"),
            whitespace: Regex::new(r"\s+").expect("invalid whitespace pattern"),
        }
    }

    /// Clean a raw merchant/description string into a canonical, comparable
    /// form. Total: never fails, returning [`UNKNOWN_MERCHANT`] when nothing
    /// usable remains.
    ///
    /// Idempotent: `normalize(normalize(s)) == normalize(s)` for every input.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        // The sentinel is a fixed point, which keeps idempotence total.
        if raw.trim().eq_ignore_ascii_case(UNKNOWN_MERCHANT) {
            return UNKNOWN_MERCHANT.to_string();
        }

        let mut text = raw.to_lowercase();

        // Punctuation removal can expose token shapes the earlier strips
        // missed (e.g. "(123) 456-7890" only looks like a phone number once
        // the parens are gone), so the pass repeats until the text is stable.
        for _ in 0..4 {
            let pass = self.strip_pass(&text);
            if pass == text {
                break;
            }
            text = pass;
        }

        if text.chars().count() < 2 {
            UNKNOWN_MERCHANT.to_string()
        } else {
            text
        }
    }

    /// One ordered application of every stripping step. Order matters: later
    /// steps assume the earlier ones ran.
    fn strip_pass(&self, text: &str) -> String {
        let text = self.reference_ids.replace_all(text, " ");
        let text = self.dates.replace_all(&text, " ");
        let text = self.times.replace_all(&text, " ");
        let text = self.store_ids.replace_all(&text, " ");
        let text = self.locations.replace_all(&text, " ");
        let text = self.postal_codes.replace_all(&text, " ");
        let text = self.phone_numbers.replace_all(&text, " ");
        let text = self.urls.replace_all(&text, " ");
        let text = self.emails.replace_all(&text, " ");
        let text = self.punctuation.replace_all(&text, " ");
        let text = self.whitespace.replace_all(&text, " ");
        text.trim().to_string()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
