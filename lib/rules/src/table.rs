//! Built-in rule table.
//!
//! Priorities and confidences are hand-assigned product data: brand keywords
//! sit above chain/format keywords, which sit above generic words, so that a
//! McDonald's receipt containing the word "restaurant" still lands on the
//! brand rule. Priority ties resolve by declaration order.

use crate::rule::CategorizationRule;

fn rule(
    priority: i32,
    confidence: f32,
    category: &str,
    subcategory: Option<&str>,
    keywords: &[&str],
) -> CategorizationRule {
    CategorizationRule::new(priority, confidence, category, subcategory, keywords)
}

/// The default rule table, ordered by domain. Declaration order is the
/// priority tie-break, so entries within a priority band are meaningful.
#[must_use]
pub fn builtin_rules() -> Vec<CategorizationRule> {
    vec![
        // Coffee
        rule(100, 0.95, "dining", Some("coffee"), &["tim hortons", "tim horton"]),
        rule(100, 0.90, "dining", Some("coffee"), &["starbucks"]),
        rule(95, 0.92, "dining", Some("coffee"), &["second cup", "country style", "mccafe"]),
        // Fast food
        rule(100, 0.95, "dining", Some("fast-food"), &["mcdonald", "mcdonalds"]),
        rule(95, 0.93, "dining", Some("fast-food"), &[
            "burger king", "wendy", "harvey", "a&w", "kfc", "popeyes", "taco bell",
            "dairy queen", "five guys", "chipotle", "subway",
        ]),
        rule(95, 0.92, "dining", Some("fast-food"), &[
            "pizza pizza", "pizza nova", "dominos", "domino's", "little caesars",
        ]),
        // Delivery platforms
        rule(95, 0.92, "dining", Some("delivery"), &[
            "uber eats", "ubereats", "skip the dishes", "skipthedishes", "doordash",
        ]),
        // Sit-down dining
        rule(90, 0.90, "dining", Some("restaurants"), &[
            "swiss chalet", "the keg", "boston pizza", "montana's", "east side mario",
        ]),
        rule(50, 0.85, "dining", Some("restaurants"), &[
            "restaurant", "bistro", "eatery", "grill", "diner", "cafe",
        ]),
        rule(45, 0.75, "dining", Some("bars"), &["pub", "brewery", "taproom", "bar & "]),
        // Groceries
        rule(95, 0.94, "groceries", None, &[
            "loblaws", "no frills", "nofrills", "sobeys", "metro", "food basics",
            "freshco", "fortinos", "zehrs", "farm boy", "safeway", "superstore",
            "t&t supermarket", "giant tiger", "save on foods",
        ]),
        rule(90, 0.88, "groceries", None, &["costco", "walmart", "wal mart"]),
        rule(50, 0.82, "groceries", None, &["grocery", "supermarket", "market", "foods"]),
        // Gas & auto
        rule(95, 0.94, "transport", Some("gas"), &[
            "petro canada", "petro-canada", "esso", "shell", "husky", "ultramar",
            "pioneer", "chevron", "mobil",
        ]),
        rule(50, 0.82, "transport", Some("gas"), &["gas bar", "fuel", "gas station"]),
        rule(85, 0.90, "transport", Some("parking"), &["impark", "precise parklink", "parking"]),
        // Rideshare & transit
        rule(90, 0.92, "transport", Some("rideshare"), &["uber trip", "uber", "lyft"]),
        rule(95, 0.94, "transport", Some("public-transit"), &[
            "ttc", "presto", "go transit", "oc transpo", "translink", "stm",
        ]),
        rule(90, 0.92, "travel", Some("rail"), &["via rail"]),
        // Telecom
        rule(95, 0.93, "bills", Some("telecom"), &[
            "rogers", "bell canada", "telus", "fido", "koodo", "freedom mobile",
            "virgin plus", "virgin mobile", "public mobile", "teksavvy",
        ]),
        rule(50, 0.80, "bills", Some("telecom"), &["wireless", "mobility", "internet"]),
        // Utilities
        rule(95, 0.94, "bills", Some("utilities"), &[
            "hydro one", "toronto hydro", "bc hydro", "hydro quebec", "enbridge",
            "fortisbc", "epcor", "enmax",
        ]),
        rule(50, 0.82, "bills", Some("utilities"), &["hydro", "utility", "water bill"]),
        // Insurance
        rule(90, 0.92, "bills", Some("insurance"), &[
            "intact insurance", "aviva", "belairdirect", "td insurance", "sonnet",
        ]),
        rule(50, 0.82, "bills", Some("insurance"), &["insurance", "assurance"]),
        // Streaming & subscriptions
        rule(95, 0.94, "entertainment", Some("streaming"), &[
            "netflix", "spotify", "disney plus", "crave", "prime video",
            "youtube premium", "audible", "apple.com/bill", "apple com bill",
        ]),
        rule(90, 0.90, "entertainment", Some("gaming"), &[
            "steam", "steamgames", "playstation", "xbox", "nintendo",
        ]),
        rule(85, 0.88, "entertainment", Some("movies"), &["cineplex", "landmark cinemas"]),
        // Pharmacy & health
        rule(95, 0.93, "health", Some("pharmacy"), &[
            "shoppers drug mart", "rexall", "pharmaprix", "jean coutu", "london drugs",
        ]),
        rule(50, 0.82, "health", Some("pharmacy"), &["pharmacy", "drug mart", "apothecary"]),
        rule(85, 0.88, "health", Some("fitness"), &[
            "goodlife", "planet fitness", "anytime fitness", "ymca",
        ]),
        rule(50, 0.80, "health", Some("medical"), &["dental", "physio", "clinic", "optometr"]),
        // Retail
        rule(90, 0.90, "shopping", Some("online"), &["amazon", "amzn", "ebay", "etsy", "aliexpress"]),
        rule(90, 0.90, "shopping", Some("home-improvement"), &[
            "home depot", "rona", "lowes", "lowe's", "canadian tire", "home hardware",
        ]),
        rule(85, 0.88, "shopping", Some("electronics"), &["best buy", "the source", "memory express"]),
        rule(85, 0.88, "shopping", Some("clothing"), &[
            "winners", "marshalls", "h&m", "uniqlo", "old navy", "lululemon", "sport chek",
        ]),
        rule(80, 0.86, "shopping", Some("general"), &[
            "dollarama", "ikea", "indigo", "chapters", "staples", "homesense", "hudson's bay",
        ]),
        // Travel
        rule(90, 0.92, "travel", Some("flights"), &["air canada", "westjet", "porter", "flair air"]),
        rule(85, 0.88, "travel", Some("hotels"), &[
            "marriott", "hilton", "best western", "airbnb", "booking.com", "expedia",
        ]),
        // Banking & fees
        rule(85, 0.90, "finance", Some("fees"), &[
            "monthly fee", "service charge", "nsf fee", "overdraft", "atm fee", "interac fee",
        ]),
        rule(85, 0.90, "finance", Some("interest"), &["interest charge", "interest paid"]),
        rule(80, 0.88, "finance", Some("transfers"), &["e-transfer", "etransfer", "wire transfer"]),
        // Income
        rule(85, 0.90, "income", Some("salary"), &["payroll", "pay deposit", "direct deposit"]),
        rule(80, 0.86, "income", Some("government"), &[
            "canada child benefit", "cra ", "gst credit", "ei canada",
        ]),
        // Personal care & misc
        rule(80, 0.86, "personal-care", None, &["salon", "barber", "spa ", "nails"]),
        rule(80, 0.86, "education", None, &["tuition", "university", "college", "udemy", "coursera"]),
        rule(80, 0.86, "pets", None, &["pet valu", "petsmart", "vet clinic", "veterinary"]),
        rule(75, 0.85, "home", Some("rent"), &["rent payment", "property mgmt", "landlord"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_well_formed() {
        let rules = builtin_rules();
        assert!(rules.len() > 40);
        for r in &rules {
            assert!(!r.keywords.is_empty());
            assert!(r.confidence > 0.0 && r.confidence <= 1.0, "{}", r.category_slug);
            assert!(!r.category_slug.is_empty());
        }
    }

    #[test]
    fn test_brand_rules_outrank_generic_rules() {
        let rules = builtin_rules();
        let mcdonalds = rules
            .iter()
            .find(|r| r.keywords.iter().any(|k| k == "mcdonalds"))
            .unwrap();
        let generic = rules
            .iter()
            .find(|r| r.keywords.iter().any(|k| k == "restaurant"))
            .unwrap();
        assert!(mcdonalds.priority > generic.priority);
        assert!(mcdonalds.confidence > generic.confidence);
    }
}
