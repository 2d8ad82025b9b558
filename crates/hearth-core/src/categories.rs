//! Keyword categorizer for free-text expense names
//!
//! A default keyword table maps merchant and description words to
//! categories. Each user can add keywords (which take precedence over the
//! defaults) or remove default keywords that misfire for them. Matching is
//! case-insensitive on whole words, and the longest matching keyword wins.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Mutex;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::ExpenseCategory;

/// Built-in keyword table
const DEFAULT_KEYWORDS: &[(&str, ExpenseCategory)] = &[
    // Groceries
    ("grocery", ExpenseCategory::Groceries),
    ("groceries", ExpenseCategory::Groceries),
    ("supermarket", ExpenseCategory::Groceries),
    ("woolworths", ExpenseCategory::Groceries),
    ("checkers", ExpenseCategory::Groceries),
    ("pick n pay", ExpenseCategory::Groceries),
    ("shoprite", ExpenseCategory::Groceries),
    ("spar", ExpenseCategory::Groceries),
    ("whole foods", ExpenseCategory::Groceries),
    ("aldi", ExpenseCategory::Groceries),
    ("tesco", ExpenseCategory::Groceries),
    ("butcher", ExpenseCategory::Groceries),
    // Dining
    ("restaurant", ExpenseCategory::Dining),
    ("cafe", ExpenseCategory::Dining),
    ("coffee", ExpenseCategory::Dining),
    ("starbucks", ExpenseCategory::Dining),
    ("mcdonalds", ExpenseCategory::Dining),
    ("kfc", ExpenseCategory::Dining),
    ("nandos", ExpenseCategory::Dining),
    ("pizza", ExpenseCategory::Dining),
    ("sushi", ExpenseCategory::Dining),
    ("takeaway", ExpenseCategory::Dining),
    ("uber eats", ExpenseCategory::Dining),
    ("mr d", ExpenseCategory::Dining),
    // Transport
    ("uber", ExpenseCategory::Transport),
    ("bolt", ExpenseCategory::Transport),
    ("taxi", ExpenseCategory::Transport),
    ("fuel", ExpenseCategory::Transport),
    ("petrol", ExpenseCategory::Transport),
    ("shell", ExpenseCategory::Transport),
    ("engen", ExpenseCategory::Transport),
    ("parking", ExpenseCategory::Transport),
    ("toll", ExpenseCategory::Transport),
    ("train", ExpenseCategory::Transport),
    ("bus", ExpenseCategory::Transport),
    ("gautrain", ExpenseCategory::Transport),
    // Utilities
    ("electricity", ExpenseCategory::Utilities),
    ("prepaid electricity", ExpenseCategory::Utilities),
    ("water", ExpenseCategory::Utilities),
    ("internet", ExpenseCategory::Utilities),
    ("fibre", ExpenseCategory::Utilities),
    ("airtime", ExpenseCategory::Utilities),
    ("vodacom", ExpenseCategory::Utilities),
    ("telkom", ExpenseCategory::Utilities),
    ("mtn", ExpenseCategory::Utilities),
    // Housing
    ("rent", ExpenseCategory::Housing),
    ("levy", ExpenseCategory::Housing),
    ("bond", ExpenseCategory::Housing),
    ("mortgage", ExpenseCategory::Housing),
    ("plumber", ExpenseCategory::Housing),
    ("hardware", ExpenseCategory::Housing),
    ("builders", ExpenseCategory::Housing),
    // Health
    ("pharmacy", ExpenseCategory::Health),
    ("clicks", ExpenseCategory::Health),
    ("dis-chem", ExpenseCategory::Health),
    ("doctor", ExpenseCategory::Health),
    ("dentist", ExpenseCategory::Health),
    ("hospital", ExpenseCategory::Health),
    ("medical", ExpenseCategory::Health),
    ("gym", ExpenseCategory::Health),
    // Entertainment
    ("netflix", ExpenseCategory::Entertainment),
    ("showmax", ExpenseCategory::Entertainment),
    ("spotify", ExpenseCategory::Entertainment),
    ("disney", ExpenseCategory::Entertainment),
    ("cinema", ExpenseCategory::Entertainment),
    ("movies", ExpenseCategory::Entertainment),
    ("concert", ExpenseCategory::Entertainment),
    ("steam", ExpenseCategory::Entertainment),
    ("playstation", ExpenseCategory::Entertainment),
    // Shopping
    ("takealot", ExpenseCategory::Shopping),
    ("amazon", ExpenseCategory::Shopping),
    ("mr price", ExpenseCategory::Shopping),
    ("clothing", ExpenseCategory::Shopping),
    ("shoes", ExpenseCategory::Shopping),
    ("makro", ExpenseCategory::Shopping),
    ("zara", ExpenseCategory::Shopping),
    // Education
    ("school", ExpenseCategory::Education),
    ("tuition", ExpenseCategory::Education),
    ("university", ExpenseCategory::Education),
    ("course", ExpenseCategory::Education),
    ("udemy", ExpenseCategory::Education),
    ("books", ExpenseCategory::Education),
    ("stationery", ExpenseCategory::Education),
    // Travel
    ("flight", ExpenseCategory::Travel),
    ("airline", ExpenseCategory::Travel),
    ("hotel", ExpenseCategory::Travel),
    ("airbnb", ExpenseCategory::Travel),
    ("booking.com", ExpenseCategory::Travel),
    ("car hire", ExpenseCategory::Travel),
    // Personal care
    ("salon", ExpenseCategory::PersonalCare),
    ("barber", ExpenseCategory::PersonalCare),
    ("haircut", ExpenseCategory::PersonalCare),
    ("spa", ExpenseCategory::PersonalCare),
    ("nails", ExpenseCategory::PersonalCare),
    ("cosmetics", ExpenseCategory::PersonalCare),
    // Gifts
    ("gift", ExpenseCategory::Gifts),
    ("donation", ExpenseCategory::Gifts),
    ("charity", ExpenseCategory::Gifts),
    ("birthday", ExpenseCategory::Gifts),
    ("flowers", ExpenseCategory::Gifts),
];

fn normalize_keyword(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}

/// One user's changes to the default keyword table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordOverrides {
    /// Extra keywords, checked before the defaults
    #[serde(default)]
    pub additions: BTreeMap<String, ExpenseCategory>,
    /// Default keywords to ignore
    #[serde(default)]
    pub removals: BTreeSet<String>,
}

impl KeywordOverrides {
    pub fn add(&mut self, keyword: &str, category: ExpenseCategory) {
        self.additions.insert(normalize_keyword(keyword), category);
    }

    pub fn remove(&mut self, keyword: &str) {
        self.removals.insert(normalize_keyword(keyword));
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }
}

/// Storage for per-user keyword overrides
///
/// Persistence lives outside the engine; implementations adapt whatever
/// store the host application uses.
pub trait KeywordOverrideStore: Send + Sync {
    /// Overrides for a user; a user with none gets the empty set
    fn load(&self, user_id: &str) -> Result<KeywordOverrides>;

    fn save(&self, user_id: &str, overrides: &KeywordOverrides) -> Result<()>;
}

/// Process-local override store
#[derive(Debug, Default)]
pub struct InMemoryOverrideStore {
    entries: Mutex<HashMap<String, KeywordOverrides>>,
}

impl InMemoryOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeywordOverrideStore for InMemoryOverrideStore {
    fn load(&self, user_id: &str) -> Result<KeywordOverrides> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| Error::InvalidData("Failed to acquire override store lock".into()))?;
        Ok(entries.get(user_id).cloned().unwrap_or_default())
    }

    fn save(&self, user_id: &str, overrides: &KeywordOverrides) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::InvalidData("Failed to acquire override store lock".into()))?;
        entries.insert(user_id.to_string(), overrides.clone());
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct KeywordRule {
    keyword: String,
    category: ExpenseCategory,
    pattern: Regex,
}

impl KeywordRule {
    /// Keywords may start or end with punctuation ("booking.com", "a+b (co)"),
    /// where `\b` would not match, so edges are anchored on non-word
    /// characters instead.
    fn new(keyword: String, category: ExpenseCategory) -> Result<Self> {
        let pattern = Regex::new(&format!(r"(?i)(?:^|\W){}(?:\W|$)", regex::escape(&keyword)))
            .map_err(|e| Error::InvalidData(format!("Invalid keyword '{}': {}", keyword, e)))?;
        Ok(Self {
            keyword,
            category,
            pattern,
        })
    }
}

/// A keyword that matched an expense name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordMatch {
    pub keyword: String,
    pub category: ExpenseCategory,
    /// Came from the user's additions rather than the defaults
    pub user_defined: bool,
}

/// Assigns categories to free-text expense names
#[derive(Debug, Clone)]
pub struct Categorizer {
    user_rules: Vec<KeywordRule>,
    default_rules: Vec<KeywordRule>,
}

impl Categorizer {
    /// Build a categorizer from the defaults with a user's overrides applied
    pub fn new(overrides: &KeywordOverrides) -> Result<Self> {
        let user_rules = overrides
            .additions
            .iter()
            .map(|(keyword, category)| (normalize_keyword(keyword), *category))
            .filter(|(keyword, _)| !keyword.is_empty())
            .map(|(keyword, category)| KeywordRule::new(keyword, category))
            .collect::<Result<Vec<_>>>()?;

        let removals: BTreeSet<String> =
            overrides.removals.iter().map(|k| normalize_keyword(k)).collect();

        let default_rules = DEFAULT_KEYWORDS
            .iter()
            .filter(|(keyword, _)| !removals.contains(*keyword))
            .map(|(keyword, category)| KeywordRule::new(keyword.to_string(), *category))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            user_rules: longest_first(user_rules),
            default_rules: longest_first(default_rules),
        })
    }

    /// Categorizer with the default table only
    pub fn with_defaults() -> Result<Self> {
        Self::new(&KeywordOverrides::default())
    }

    /// Load a user's overrides from `store` and build their categorizer
    pub fn for_user(store: &dyn KeywordOverrideStore, user_id: &str) -> Result<Self> {
        Self::new(&store.load(user_id)?)
    }

    /// The keyword that decides the category for `name`, if any
    pub fn find_match(&self, name: &str) -> Option<KeywordMatch> {
        let user = self
            .user_rules
            .iter()
            .find(|rule| rule.pattern.is_match(name))
            .map(|rule| (rule, true));

        user.or_else(|| {
            self.default_rules
                .iter()
                .find(|rule| rule.pattern.is_match(name))
                .map(|rule| (rule, false))
        })
        .map(|(rule, user_defined)| KeywordMatch {
            keyword: rule.keyword.clone(),
            category: rule.category,
            user_defined,
        })
    }

    /// Category for an expense name; `OTHER` when no keyword matches
    pub fn categorize(&self, name: &str) -> ExpenseCategory {
        self.find_match(name)
            .map(|m| m.category)
            .unwrap_or(ExpenseCategory::Other)
    }
}

/// Longest keyword first; ties alphabetical so results don't depend on
/// table order
fn longest_first(mut rules: Vec<KeywordRule>) -> Vec<KeywordRule> {
    rules.sort_by(|a, b| {
        b.keyword
            .len()
            .cmp(&a.keyword.len())
            .then_with(|| a.keyword.cmp(&b.keyword))
    });
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches() {
        let categorizer = Categorizer::with_defaults().unwrap();
        assert_eq!(categorizer.categorize("WOOLWORTHS SANDTON"), ExpenseCategory::Groceries);
        assert_eq!(categorizer.categorize("Netflix.com"), ExpenseCategory::Entertainment);
        assert_eq!(categorizer.categorize("Dis-Chem Rosebank"), ExpenseCategory::Health);
        assert_eq!(categorizer.categorize("Something odd"), ExpenseCategory::Other);
        assert_eq!(categorizer.categorize(""), ExpenseCategory::Other);
    }

    #[test]
    fn test_whole_word_only() {
        let categorizer = Categorizer::with_defaults().unwrap();
        // "rent" must not match inside "parental"; "bus" not inside "business"
        assert_eq!(categorizer.categorize("Parental advisory"), ExpenseCategory::Other);
        assert_eq!(categorizer.categorize("Business lunch at Nandos"), ExpenseCategory::Dining);
    }

    #[test]
    fn test_longest_keyword_wins() {
        let categorizer = Categorizer::with_defaults().unwrap();
        assert_eq!(categorizer.categorize("Uber trip"), ExpenseCategory::Transport);
        assert_eq!(categorizer.categorize("Uber Eats order"), ExpenseCategory::Dining);

        let m = categorizer.find_match("Prepaid electricity 500").unwrap();
        assert_eq!(m.keyword, "prepaid electricity");
        assert!(!m.user_defined);
    }

    #[test]
    fn test_user_additions_take_precedence() {
        let mut overrides = KeywordOverrides::default();
        overrides.add("Uber", ExpenseCategory::Travel);
        overrides.add("  Corner Shop ", ExpenseCategory::Groceries);

        let categorizer = Categorizer::new(&overrides).unwrap();
        // A short user keyword beats a longer default
        assert_eq!(categorizer.categorize("Uber Eats order"), ExpenseCategory::Travel);
        assert_eq!(categorizer.categorize("CORNER SHOP #2"), ExpenseCategory::Groceries);

        let m = categorizer.find_match("uber").unwrap();
        assert!(m.user_defined);
    }

    #[test]
    fn test_removed_defaults_ignored() {
        let mut overrides = KeywordOverrides::default();
        overrides.remove("Shell");

        let categorizer = Categorizer::new(&overrides).unwrap();
        assert_eq!(categorizer.categorize("Shell Garage"), ExpenseCategory::Other);
        assert_eq!(categorizer.categorize("Engen Garage"), ExpenseCategory::Transport);
    }

    #[test]
    fn test_keywords_with_regex_characters() {
        let mut overrides = KeywordOverrides::default();
        overrides.add("a+b (co)", ExpenseCategory::Shopping);

        let categorizer = Categorizer::new(&overrides).unwrap();
        assert_eq!(categorizer.categorize("paid a+b (co) today"), ExpenseCategory::Shopping);
        assert_eq!(categorizer.categorize("Booking.com stay"), ExpenseCategory::Travel);
    }

    #[test]
    fn test_in_memory_store() {
        let store = InMemoryOverrideStore::new();
        assert!(store.load("alex").unwrap().is_empty());

        let mut overrides = KeywordOverrides::default();
        overrides.add("vet", ExpenseCategory::Health);
        store.save("alex", &overrides).unwrap();

        assert_eq!(store.load("alex").unwrap(), overrides);
        assert!(store.load("sam").unwrap().is_empty());

        let categorizer = Categorizer::for_user(&store, "alex").unwrap();
        assert_eq!(categorizer.categorize("Vet visit"), ExpenseCategory::Health);
    }

    #[test]
    fn test_overrides_serde() {
        let json = r#"{"additions": {"vet": "HEALTH"}, "removals": ["spa"]}"#;
        let overrides: KeywordOverrides = serde_json::from_str(json).unwrap();
        assert_eq!(overrides.additions.get("vet"), Some(&ExpenseCategory::Health));
        assert!(overrides.removals.contains("spa"));
    }
}
