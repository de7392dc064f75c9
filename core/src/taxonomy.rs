//! Ordered keyword taxonomy and filename classification.
//!
//! Classification is first-match: rules are consulted in declaration
//! order, keywords within a rule in declaration order, and the first rule
//! with any keyword occurring as a substring of the lower-cased filename
//! wins. Filenames matching no rule fall through to the fallback category.

/// A single category in the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub name: String,
    /// Keywords matched as case-insensitive substrings, in order.
    pub keywords: Vec<String>,
    pub title: String,
    pub description: String,
}

impl CategoryRule {
    pub fn new(name: &str, keywords: &[&str], title: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// The ordered rule table plus the keyword-less fallback category.
///
/// Declaration order is load-bearing: it is the tie-break when a filename
/// matches keywords from more than one category. The table is therefore a
/// sequence, never a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    rules: Vec<CategoryRule>,
    fallback: CategoryRule,
}

impl Taxonomy {
    pub fn new(rules: Vec<CategoryRule>, fallback: CategoryRule) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &CategoryRule {
        &self.fallback
    }

    /// All categories in declaration order, fallback last.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryRule> {
        self.rules.iter().chain(std::iter::once(&self.fallback))
    }

    /// Looks up a category by name.
    pub fn category(&self, name: &str) -> Option<&CategoryRule> {
        self.categories().find(|rule| rule.name == name)
    }

    /// Returns the name of the first category with a keyword occurring as
    /// a substring of the lower-cased filename, or the fallback name.
    ///
    /// Matching ignores word boundaries: a keyword embedded in a longer
    /// token still matches.
    pub fn classify(&self, file_name: &str) -> &str {
        let lowered = file_name.to_lowercase();
        for rule in &self.rules {
            if rule
                .keywords
                .iter()
                .any(|keyword| lowered.contains(keyword.as_str()))
            {
                return &rule.name;
            }
        }
        &self.fallback.name
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new(
            vec![
                CategoryRule::new(
                    "characters",
                    &["thanos", "proxima", "ebony", "corvus", "black-dwarf"],
                    "Characters",
                    "Thanos and the Black Order",
                ),
                CategoryRule::new(
                    "stones",
                    &["power", "time", "mind", "reality", "space", "soul"],
                    "Infinity Stones",
                    "The six Infinity Stones",
                ),
                CategoryRule::new("enemies", &["outriders"], "Enemies", "Thanos' forces"),
            ],
            CategoryRule::new("misc", &[], "Miscellaneous", "Uncategorized assets"),
        )
    }
}
