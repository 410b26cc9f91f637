//! Country alias resolution
//!
//! Maps free-text country names, common short forms and native names to ISO
//! codes. The catalog is the authority: aliases only ever resolve to catalog
//! countries.

use super::CountryCatalog;
use geoprov_common::CountryDistribution;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::{BTreeMap, HashMap};

/// Curated aliases (alias, ISO code), checked before catalog names
const MANUAL_ALIASES: &[(&str, &str)] = &[
    ("usa", "us"),
    ("u.s.a.", "us"),
    ("united states of america", "us"),
    ("america", "us"),
    ("great britain", "gb"),
    ("britain", "gb"),
    ("england", "gb"),
    ("scotland", "gb"),
    ("wales", "gb"),
    ("northern ireland", "gb"),
    ("united kingdom of great britain and northern ireland", "gb"),
    ("deutschland", "de"),
    ("federal republic of germany", "de"),
    ("españa", "es"),
    ("espana", "es"),
    ("méxico", "mx"),
    ("brasil", "br"),
    ("russian federation", "ru"),
    ("россия", "ru"),
    ("people's republic of china", "cn"),
    ("prc", "cn"),
    ("south korea", "kr"),
    ("republic of korea", "kr"),
    ("korea, republic of", "kr"),
    ("north korea", "kp"),
    ("nippon", "jp"),
    ("nihon", "jp"),
    ("holland", "nl"),
    ("the netherlands", "nl"),
    ("nederland", "nl"),
    ("schweiz", "ch"),
    ("suisse", "ch"),
    ("svizzera", "ch"),
    ("österreich", "at"),
    ("osterreich", "at"),
    ("italia", "it"),
    ("polska", "pl"),
    ("sverige", "se"),
    ("norge", "no"),
    ("danmark", "dk"),
    ("suomi", "fi"),
    ("éire", "ie"),
    ("czech republic", "cz"),
    ("česká republika", "cz"),
    ("viet nam", "vn"),
    ("türkiye", "tr"),
    ("turkiye", "tr"),
    ("hellas", "gr"),
    ("uae", "ae"),
    ("ksa", "sa"),
    ("iran, islamic republic of", "ir"),
    ("taiwan, province of china", "tw"),
    ("tanzania, united republic of", "tz"),
    ("bolivia, plurinational state of", "bo"),
    ("venezuela, bolivarian republic of", "ve"),
    ("moldova, republic of", "md"),
    ("macedonia", "mk"),
    ("cote d'ivoire", "ci"),
    ("côte d'ivoire", "ci"),
    ("burma", "mm"),
    ("swaziland", "sz"),
    ("cabo verde", "cv"),
    ("hong kong sar", "hk"),
];

/// Phrases that contain a country alias but name somewhere else
///
/// They take part in free-text matching (longest match wins) and count for nobody.
const SHADOW_PHRASES: &[&str] = &[
    "new jersey",
    "new mexico",
    "new south wales",
    "new england",
    "georgia tech",
];

/// Shortest alias considered when scanning free text
const MIN_SCAN_ALIAS_LEN: usize = 3;

static BUILTIN_RESOLVER: Lazy<AliasResolver> =
    Lazy::new(|| AliasResolver::new(CountryCatalog::builtin()));

/// Alias → ISO code resolver with a free-text mention scanner
#[derive(Debug, Clone)]
pub struct AliasResolver {
    aliases: HashMap<String, &'static str>,
    scanner: Option<Regex>,
}

impl AliasResolver {
    /// Resolver over the built-in catalog
    pub fn builtin() -> &'static AliasResolver {
        &BUILTIN_RESOLVER
    }

    /// Build a resolver from catalog names plus the curated alias table
    pub fn new(catalog: &CountryCatalog) -> Self {
        let mut aliases: HashMap<String, &'static str> = HashMap::new();

        for &(alias, iso) in MANUAL_ALIASES {
            if let Some(country) = catalog.get(iso) {
                aliases.insert(alias.to_string(), country.iso_code);
            }
        }
        for country in catalog.iter() {
            aliases
                .entry(country.name.to_lowercase())
                .or_insert(country.iso_code);
        }

        let scanner = build_scanner(aliases.keys().map(String::as_str));
        Self { aliases, scanner }
    }

    /// ISO code for an alias (input must already be lowercase and trimmed)
    pub fn lookup(&self, alias: &str) -> Option<&'static str> {
        self.aliases.get(alias).copied()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Map a raw country token to a distribution
    ///
    /// - shorter than 2 characters (or missing): no information
    /// - exactly 2 characters: taken as an ISO code, not validated
    /// - longer: alias lookup, no information when unknown
    pub fn to_distribution(&self, raw: Option<&str>) -> CountryDistribution {
        let token = raw.unwrap_or_default().trim().to_lowercase();
        match token.chars().count() {
            0 | 1 => CountryDistribution::new(),
            2 => CountryDistribution::single(token),
            _ => self
                .lookup(&token)
                .map(CountryDistribution::single)
                .unwrap_or_default(),
        }
    }

    /// Count word-bounded alias mentions per country in free text
    ///
    /// Matching is case-insensitive; overlapping aliases resolve to the longest.
    pub fn scan_mentions(&self, text: &str) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        let Some(scanner) = &self.scanner else {
            return counts;
        };
        let lowered = text.to_lowercase();
        for found in scanner.find_iter(&lowered) {
            if let Some(iso) = self.lookup(found.as_str()) {
                *counts.entry(iso).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// Map a raw country token to a distribution using the built-in alias table
pub fn country_to_distribution(raw: Option<&str>) -> CountryDistribution {
    AliasResolver::builtin().to_distribution(raw)
}

fn build_scanner<'a>(aliases: impl Iterator<Item = &'a str>) -> Option<Regex> {
    let mut phrases: Vec<&str> = aliases
        .filter(|a| a.chars().count() >= MIN_SCAN_ALIAS_LEN)
        .filter(|a| starts_and_ends_with_word_char(a))
        .chain(SHADOW_PHRASES.iter().copied())
        .collect();
    if phrases.is_empty() {
        return None;
    }
    // leftmost-first alternation: list longer phrases first
    phrases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    phrases.dedup();

    let alternation = phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"\b(?:{})\b", alternation);

    match RegexBuilder::new(&pattern).size_limit(1 << 24).build() {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!(error = %e, "Alias scanner failed to compile, free-text scanning disabled");
            None
        }
    }
}

fn starts_and_ends_with_word_char(s: &str) -> bool {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    matches!((s.chars().next(), s.chars().last()), (Some(a), Some(b)) if is_word(a) && is_word(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_tokens_carry_no_information() {
        assert!(country_to_distribution(None).is_empty());
        assert!(country_to_distribution(Some("")).is_empty());
        assert!(country_to_distribution(Some("  x ")).is_empty());
    }

    #[test]
    fn test_two_letter_codes_round_trip() {
        for code in ["de", "us", "gb", "zz", "uk"] {
            let dist = country_to_distribution(Some(code));
            assert_eq!(dist.len(), 1);
            assert_eq!(dist.codes().next(), Some(code));
            assert_eq!(dist.get(code), 1.0);
        }
    }

    #[test]
    fn test_two_letter_codes_are_normalized() {
        let dist = country_to_distribution(Some(" DE "));
        assert_eq!(dist.get("de"), 1.0);
    }

    #[test]
    fn test_alias_lookup() {
        assert_eq!(country_to_distribution(Some("Germany")).get("de"), 1.0);
        assert_eq!(country_to_distribution(Some("UNITED STATES")).get("us"), 1.0);
        assert_eq!(country_to_distribution(Some("Deutschland")).get("de"), 1.0);
        assert_eq!(country_to_distribution(Some("usa")).get("us"), 1.0);
        assert_eq!(country_to_distribution(Some("Korea, Republic of")).get("kr"), 1.0);
        assert!(country_to_distribution(Some("Atlantis")).is_empty());
    }

    #[test]
    fn test_aliases_resolve_to_catalog_countries() {
        let catalog = CountryCatalog::builtin();
        let resolver = AliasResolver::builtin();
        assert!(resolver.aliases.values().all(|iso| catalog.contains(iso)));
    }

    #[test]
    fn test_scan_mentions_counts_words() {
        let resolver = AliasResolver::builtin();
        let text = "Registrant Country: Canada\nAdmin: Toronto, CANADA\nTech contact in United States";
        let counts = resolver.scan_mentions(text);
        assert_eq!(counts.get("ca"), Some(&2));
        assert_eq!(counts.get("us"), Some(&1));
    }

    #[test]
    fn test_scan_mentions_respects_word_boundaries() {
        let resolver = AliasResolver::builtin();
        // "nigeria" must not count as "niger", "dominican republic" not as "dominica"
        let counts = resolver.scan_mentions("lagos, nigeria / santo domingo, dominican republic");
        assert_eq!(counts.get("ng"), Some(&1));
        assert_eq!(counts.get("do"), Some(&1));
        assert!(counts.get("ne").is_none());
        assert!(counts.get("dm").is_none());
    }

    #[test]
    fn test_scan_mentions_prefers_longest_phrase() {
        let resolver = AliasResolver::builtin();
        let counts = resolver.scan_mentions("Port Moresby, Papua New Guinea. Newark, New Jersey");
        assert_eq!(counts.get("pg"), Some(&1));
        assert!(counts.get("gn").is_none());
        assert!(counts.get("je").is_none());
    }

    #[test]
    fn test_scan_mentions_ignores_two_letter_codes() {
        let resolver = AliasResolver::builtin();
        let counts = resolver.scan_mentions("Yerevan, 0015\n      AM\n");
        assert!(counts.is_empty());
    }
}
