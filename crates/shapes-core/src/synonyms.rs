use std::collections::HashMap;

/// Built-in phrase → identifier pairs.
const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("circle", "circle"),
    ("rectangle", "rectangle"),
    ("triangle", "triangle"),
    ("square", "square"),
    ("area of circle", "circle"),
    ("area of rectangle", "rectangle"),
    ("perimeter of rectangle", "rectangle"),
    ("perimeter of square", "square"),
    ("circumference of circle", "circle"),
];

/// Static mapping from a lowercased phrase to a canonical shape identifier.
///
/// Used twice: as the fallback normalizer for raw user text, and to
/// validate (and possibly rename) classifier labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymTable {
    entries: HashMap<String, String>,
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::empty().with_entries(
            DEFAULT_SYNONYMS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }
}

impl SynonymTable {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Merge extra entries. Keys are trimmed and lowercased so lookups
    /// against normalized text hit; later entries override earlier ones.
    pub fn with_entries<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (phrase, identifier) in entries {
            self.entries.insert(phrase.trim().to_lowercase(), identifier);
        }
        self
    }

    pub fn get(&self, phrase: &str) -> Option<&str> {
        self.entries.get(phrase).map(String::as_str)
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.entries.contains_key(phrase)
    }

    /// `get(phrase)`, or the phrase itself when unmapped.
    pub fn resolve(&self, phrase: &str) -> String {
        self.get(phrase).unwrap_or(phrase).to_string()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
