//! Canonical merchant aliases.
//!
//! Maps normalized merchant strings to their canonical display name. Covers
//! the common regional variants seen on Canadian bank statements; anything
//! not in the table falls back to title-casing the normalized string.

use ahash::AHashMap;

/// Alias table entries, grouped by domain. Keys are normalized (lowercase,
/// stripped) merchant strings.
const ALIASES: &[(&str, &str)] = &[
    // Groceries
    ("loblaws", "Loblaws"),
    ("no frills", "No Frills"),
    ("nofrills", "No Frills"),
    ("real canadian superstore", "Real Canadian Superstore"),
    ("superstore", "Real Canadian Superstore"),
    ("rcss", "Real Canadian Superstore"),
    ("sobeys", "Sobeys"),
    ("safeway", "Safeway"),
    ("metro", "Metro"),
    ("food basics", "Food Basics"),
    ("freshco", "FreshCo"),
    ("fortinos", "Fortinos"),
    ("zehrs", "Zehrs"),
    ("farm boy", "Farm Boy"),
    ("longo's", "Longo's"),
    ("longos", "Longo's"),
    ("t&t supermarket", "T&T Supermarket"),
    ("t&t", "T&T Supermarket"),
    ("walmart", "Walmart"),
    ("walmart supercenter", "Walmart"),
    ("wal mart", "Walmart"),
    ("costco", "Costco"),
    ("costco wholesale", "Costco"),
    ("giant tiger", "Giant Tiger"),
    ("save on foods", "Save-On-Foods"),
    ("thrifty foods", "Thrifty Foods"),
    ("iga", "IGA"),
    ("co op", "Co-op"),
    // Coffee
    ("tim hortons", "Tim Hortons"),
    ("tim horton", "Tim Hortons"),
    ("tim horton's", "Tim Hortons"),
    ("tims", "Tim Hortons"),
    ("timmy's", "Tim Hortons"),
    ("timmies", "Tim Hortons"),
    ("starbucks", "Starbucks"),
    ("starbucks coffee", "Starbucks"),
    ("sbux", "Starbucks"),
    ("second cup", "Second Cup"),
    ("country style", "Country Style"),
    ("coffee time", "Coffee Time"),
    ("balzac's", "Balzac's Coffee"),
    ("mccafe", "McCafé"),
    // Fast food & dining
    ("mcdonalds", "McDonald's"),
    ("mcdonald's", "McDonald's"),
    ("mcd", "McDonald's"),
    ("a&w", "A&W"),
    ("burger king", "Burger King"),
    ("wendys", "Wendy's"),
    ("wendy's", "Wendy's"),
    ("harveys", "Harvey's"),
    ("harvey's", "Harvey's"),
    ("subway", "Subway"),
    ("kfc", "KFC"),
    ("popeyes", "Popeyes"),
    ("taco bell", "Taco Bell"),
    ("pizza pizza", "Pizza Pizza"),
    ("pizza nova", "Pizza Nova"),
    ("dominos", "Domino's Pizza"),
    ("domino's", "Domino's Pizza"),
    ("swiss chalet", "Swiss Chalet"),
    ("the keg", "The Keg"),
    ("boston pizza", "Boston Pizza"),
    ("mr sub", "Mr. Sub"),
    ("dairy queen", "Dairy Queen"),
    ("dq", "Dairy Queen"),
    ("chipotle", "Chipotle"),
    ("five guys", "Five Guys"),
    ("uber eats", "Uber Eats"),
    ("ubereats", "Uber Eats"),
    ("skip the dishes", "SkipTheDishes"),
    ("skipthedishes", "SkipTheDishes"),
    ("doordash", "DoorDash"),
    // Gas
    ("petro canada", "Petro-Canada"),
    ("petrocanada", "Petro-Canada"),
    ("petro can", "Petro-Canada"),
    ("esso", "Esso"),
    ("shell", "Shell"),
    ("husky", "Husky"),
    ("ultramar", "Ultramar"),
    ("pioneer", "Pioneer"),
    ("canadian tire gas", "Canadian Tire Gas+"),
    ("mobil", "Mobil"),
    ("chevron", "Chevron"),
    // Banks
    ("rbc", "RBC Royal Bank"),
    ("royal bank", "RBC Royal Bank"),
    ("td", "TD Canada Trust"),
    ("td bank", "TD Canada Trust"),
    ("td canada trust", "TD Canada Trust"),
    ("scotiabank", "Scotiabank"),
    ("bank of nova scotia", "Scotiabank"),
    ("bmo", "BMO Bank of Montreal"),
    ("bank of montreal", "BMO Bank of Montreal"),
    ("cibc", "CIBC"),
    ("tangerine", "Tangerine"),
    ("simplii", "Simplii Financial"),
    ("desjardins", "Desjardins"),
    ("eq bank", "EQ Bank"),
    ("wealthsimple", "Wealthsimple"),
    ("questrade", "Questrade"),
    // Telecom
    ("rogers", "Rogers"),
    ("bell", "Bell"),
    ("bell canada", "Bell"),
    ("telus", "Telus"),
    ("fido", "Fido"),
    ("koodo", "Koodo"),
    ("freedom mobile", "Freedom Mobile"),
    ("freedom", "Freedom Mobile"),
    ("virgin mobile", "Virgin Plus"),
    ("virgin plus", "Virgin Plus"),
    ("public mobile", "Public Mobile"),
    ("teksavvy", "TekSavvy"),
    // Pharmacy
    ("shoppers drug mart", "Shoppers Drug Mart"),
    ("shoppers", "Shoppers Drug Mart"),
    ("sdm", "Shoppers Drug Mart"),
    ("rexall", "Rexall"),
    ("pharmaprix", "Pharmaprix"),
    ("jean coutu", "Jean Coutu"),
    ("london drugs", "London Drugs"),
    // Retail
    ("canadian tire", "Canadian Tire"),
    ("cdn tire", "Canadian Tire"),
    ("home depot", "Home Depot"),
    ("the home depot", "Home Depot"),
    ("rona", "RONA"),
    ("lowes", "Lowe's"),
    ("lowe's", "Lowe's"),
    ("ikea", "IKEA"),
    ("amazon", "Amazon"),
    ("amazon ca", "Amazon"),
    ("amzn", "Amazon"),
    ("amzn mktp", "Amazon"),
    ("amzn mktp ca", "Amazon"),
    ("best buy", "Best Buy"),
    ("bestbuy", "Best Buy"),
    ("winners", "Winners"),
    ("marshalls", "Marshalls"),
    ("homesense", "HomeSense"),
    ("dollarama", "Dollarama"),
    ("indigo", "Indigo"),
    ("chapters", "Indigo"),
    ("sport chek", "Sport Chek"),
    ("mec", "MEC"),
    ("the bay", "Hudson's Bay"),
    ("hudson's bay", "Hudson's Bay"),
    ("hbc", "Hudson's Bay"),
    ("staples", "Staples"),
    // Streaming & subscriptions
    ("netflix", "Netflix"),
    ("netflix com", "Netflix"),
    ("spotify", "Spotify"),
    ("apple com bill", "Apple"),
    ("apple", "Apple"),
    ("disney plus", "Disney+"),
    ("disney", "Disney+"),
    ("crave", "Crave"),
    ("prime video", "Prime Video"),
    ("amazon prime", "Amazon Prime"),
    ("youtube premium", "YouTube Premium"),
    ("audible", "Audible"),
    ("playstation network", "PlayStation Network"),
    ("steam", "Steam"),
    ("steamgames", "Steam"),
    // Transit & travel
    ("ttc", "TTC"),
    ("presto", "PRESTO"),
    ("go transit", "GO Transit"),
    ("via rail", "VIA Rail"),
    ("uber", "Uber"),
    ("uber trip", "Uber"),
    ("lyft", "Lyft"),
    ("air canada", "Air Canada"),
    ("westjet", "WestJet"),
    ("porter", "Porter Airlines"),
    ("stm", "STM"),
    ("translink", "TransLink"),
    ("oc transpo", "OC Transpo"),
    // Utilities
    ("hydro one", "Hydro One"),
    ("toronto hydro", "Toronto Hydro"),
    ("bc hydro", "BC Hydro"),
    ("hydro quebec", "Hydro-Québec"),
    ("enbridge", "Enbridge"),
    ("fortisbc", "FortisBC"),
    ("epcor", "EPCOR"),
    ("enmax", "ENMAX"),
];

/// Case-insensitive exact lookup over the alias table with a title-case
/// fallback for misses.
pub struct Canonicalizer {
    aliases: AHashMap<&'static str, &'static str>,
}

impl Canonicalizer {
    #[must_use]
    pub fn new() -> Self {
        let mut aliases = AHashMap::with_capacity(ALIASES.len());
        for (key, value) in ALIASES {
            aliases.insert(*key, *value);
        }
        Self { aliases }
    }

    /// Turn a normalized merchant string into its canonical display form.
    ///
    /// Exact (case-insensitive) table hit wins; otherwise each word is
    /// title-cased.
    #[must_use]
    pub fn canonicalize(&self, normalized: &str) -> String {
        let key = normalized.trim().to_lowercase();
        if let Some(canonical) = self.aliases.get(key.as_str()) {
            return (*canonical).to_string();
        }
        title_case(&key)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Capitalize the first letter of each whitespace-separated word.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_hits() {
        let c = Canonicalizer::new();
        assert_eq!(c.canonicalize("tims"), "Tim Hortons");
        assert_eq!(c.canonicalize("timmy's"), "Tim Hortons");
        assert_eq!(c.canonicalize("tim horton"), "Tim Hortons");
        assert_eq!(c.canonicalize("sbux"), "Starbucks");
        assert_eq!(c.canonicalize("amzn mktp"), "Amazon");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let c = Canonicalizer::new();
        assert_eq!(c.canonicalize("TIM HORTONS"), "Tim Hortons");
        assert_eq!(c.canonicalize("  Petro Canada  "), "Petro-Canada");
    }

    #[test]
    fn test_title_case_fallback() {
        let c = Canonicalizer::new();
        assert_eq!(c.canonicalize("joe's garage"), "Joe's Garage");
        assert_eq!(c.canonicalize("corner store"), "Corner Store");
    }

    #[test]
    fn test_no_duplicate_alias_keys() {
        let mut seen = std::collections::HashSet::new();
        for (key, _) in ALIASES {
            assert!(seen.insert(*key), "duplicate alias key: {key}");
        }
    }
}
