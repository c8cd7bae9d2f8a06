//! Region-word policy for locale-specific content units.
//!
//! Catalog depots frequently ship one unit per market or language and only
//! hint at it in the display name ("Watch_Dogs English", "Watch_Dogs RU").
//! The policy holds two user-editable word sets:
//!
//! - **Allow** - words marking content the user wants (their market)
//! - **Deny** - words marking content for other markets
//!
//! A unit is dropped as soon as any token of its name is a deny word, even
//! if another token is an allow word. A unit whose name carries no region
//! word at all is treated as universal and always kept.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

/// Default allow words.
pub const DEFAULT_ALLOW_WORDS: &[&str] = &["eu", "europe", "row", "en", "english", "ww"];

/// Default deny words: market and language markers for other regions.
///
/// Ambiguous short codes that double as common English words ("it", "us",
/// "sea") are left out so ordinary depot names are not caught.
pub const DEFAULT_DENY_WORDS: &[&str] = &[
    "ru", "russia", "russian", "cis", "cn", "china", "chinese", "schinese", "tchinese", "hk",
    "tw", "taiwan", "jp", "japan", "japanese", "kr", "korea", "korean", "asia", "th", "thai",
    "pl", "polish", "cz", "czech", "tr", "turkish", "br", "brazil", "latam", "de", "german",
    "fr", "french", "italian", "es", "spanish", "ar", "arabic",
];

/// Word pattern: runs of letters and digits, so underscores, dashes and
/// punctuation all separate words.
fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[\p{L}\p{N}]+").expect("token pattern is valid"))
}

/// Normalize a configured region word: trimmed, lowercase.
///
/// Returns `None` for words that are empty after trimming.
pub fn normalize_word(word: &str) -> Option<String> {
    let trimmed = word.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Split a unit display name into lowercase word tokens.
pub fn tokenize(name: &str) -> Vec<String> {
    token_pattern()
        .find_iter(name)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Allow/deny word sets applied to content-unit display names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionWordPolicy {
    allow: BTreeSet<String>,
    deny: BTreeSet<String>,
}

impl Default for RegionWordPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_ALLOW_WORDS.iter().copied(),
            DEFAULT_DENY_WORDS.iter().copied(),
        )
    }
}

impl RegionWordPolicy {
    /// Build a policy from raw word lists.
    ///
    /// Words are trimmed, lowercased and deduplicated; blank entries are
    /// discarded. A word may appear in both lists, in which case deny wins
    /// when matching.
    pub fn new<A, D, S, T>(allow: A, deny: D) -> Self
    where
        A: IntoIterator<Item = S>,
        D: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            allow: allow
                .into_iter()
                .filter_map(|w| normalize_word(w.as_ref()))
                .collect(),
            deny: deny
                .into_iter()
                .filter_map(|w| normalize_word(w.as_ref()))
                .collect(),
        }
    }

    /// Parse a policy from comma-separated word lists.
    pub fn from_lists(allow: &str, deny: &str) -> Self {
        Self::new(allow.split(','), deny.split(','))
    }

    /// Normalized allow words.
    pub fn allow(&self) -> &BTreeSet<String> {
        &self.allow
    }

    /// Normalized deny words.
    pub fn deny(&self) -> &BTreeSet<String> {
        &self.deny
    }

    /// True if any token is a deny word.
    pub fn is_denied_by_region(&self, tokens: &[String]) -> bool {
        tokens.iter().any(|t| self.deny.contains(t))
    }

    /// True if any token is an allow word.
    pub fn is_allowed_by_region(&self, tokens: &[String]) -> bool {
        tokens.iter().any(|t| self.allow.contains(t))
    }

    /// True if no token is a region word of either list.
    pub fn is_region_agnostic(&self, tokens: &[String]) -> bool {
        !tokens
            .iter()
            .any(|t| self.allow.contains(t) || self.deny.contains(t))
    }

    /// Decide whether a unit with this display name survives the region pass.
    ///
    /// Deny is checked first and is final.
    pub fn keeps(&self, name: &str) -> bool {
        let tokens = tokenize(name);
        if self.is_denied_by_region(&tokens) {
            return false;
        }
        self.is_region_agnostic(&tokens) || self.is_allowed_by_region(&tokens)
    }

    /// Allow words joined for persistence.
    pub fn allow_list(&self) -> String {
        join_words(&self.allow)
    }

    /// Deny words joined for persistence.
    pub fn deny_list(&self) -> String {
        join_words(&self.deny)
    }
}

fn join_words(words: &BTreeSet<String>) -> String {
    words.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_on_punctuation_and_underscores() {
        assert_eq!(
            tokenize("Watch_Dogs - English"),
            vec!["watch", "dogs", "english"]
        );
        assert_eq!(tokenize("  "), Vec::<String>::new());
        assert_eq!(tokenize("Game (RU/CIS)"), vec!["game", "ru", "cis"]);
    }

    #[test]
    fn test_new_normalizes_and_dedupes() {
        let policy = RegionWordPolicy::new(vec![" EU ", "eu", "", "Europe"], vec!["RU"]);
        assert_eq!(policy.allow().len(), 2);
        assert!(policy.allow().contains("eu"));
        assert!(policy.allow().contains("europe"));
        assert!(policy.deny().contains("ru"));
    }

    #[test]
    fn test_default_lists_do_not_overlap() {
        let policy = RegionWordPolicy::default();
        assert!(policy.allow().is_disjoint(policy.deny()));
    }

    #[test]
    fn test_keeps_region_agnostic_unit() {
        let policy = RegionWordPolicy::default();
        assert!(policy.keeps("Watch_Dogs Common"));
        assert!(policy.keeps("Binaries"));
    }

    #[test]
    fn test_keeps_allowed_unit() {
        let policy = RegionWordPolicy::default();
        assert!(policy.keeps("Watch_Dogs English"));
        assert!(policy.keeps("Content EU"));
    }

    #[test]
    fn test_drops_denied_unit() {
        let policy = RegionWordPolicy::default();
        assert!(!policy.keeps("Watch_Dogs Russian"));
        assert!(!policy.keeps("Content JP"));
    }

    #[test]
    fn test_deny_takes_precedence_over_allow() {
        let policy = RegionWordPolicy::default();
        assert!(!policy.keeps("Content EU RU"));
        assert!(!policy.keeps("English Japanese Voices"));
    }

    #[test]
    fn test_word_in_both_lists_is_denied() {
        let policy = RegionWordPolicy::new(vec!["en"], vec!["en"]);
        assert!(!policy.keeps("Voices EN"));
    }

    #[test]
    fn test_from_lists_round_trip() {
        let policy = RegionWordPolicy::from_lists("eu, ww", "ru,cn ,");
        assert_eq!(policy.allow_list(), "eu, ww");
        assert_eq!(policy.deny_list(), "cn, ru");
        assert_eq!(
            RegionWordPolicy::from_lists(&policy.allow_list(), &policy.deny_list()),
            policy
        );
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn word() -> impl Strategy<Value = String> {
            "[a-z]{3,8}"
        }

        proptest! {
            #[test]
            fn test_any_deny_token_wins(
                filler in proptest::collection::vec(word(), 0..4),
                allow_count in 0usize..4,
            ) {
                let policy = RegionWordPolicy::new(vec!["eu", "english"], vec!["ru"]);
                let mut parts = filler.clone();
                for _ in 0..allow_count {
                    parts.push("english".to_string());
                }
                parts.push("ru".to_string());
                let name = parts.join(" ");
                prop_assert!(!policy.keeps(&name), "name {:?} should be denied", name);
            }

            #[test]
            fn test_names_without_region_words_are_kept(
                words in proptest::collection::vec("[a-z]{5,8}", 0..5),
            ) {
                // Five letters or more never collide with the short default codes.
                let policy = RegionWordPolicy::new(vec!["eu"], vec!["ru"]);
                let name = words.join("_");
                prop_assert!(policy.keeps(&name));
            }
        }
    }
}
