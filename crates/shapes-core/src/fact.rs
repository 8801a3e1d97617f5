use serde::{Deserialize, Serialize};

/// Formula text as stored in a fact base: either one string or a list
/// of alternatives, of which only the first is ever reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormulaText {
    One(String),
    Many(Vec<String>),
}

impl FormulaText {
    /// The reported formula, trimmed.
    /// `None` for an empty string or an empty list.
    pub fn primary(&self) -> Option<&str> {
        match self {
            FormulaText::One(s) if s.is_empty() => None,
            FormulaText::One(s) => Some(s.trim()),
            FormulaText::Many(items) => items.first().map(|s| s.trim()),
        }
    }
}

impl From<&str> for FormulaText {
    fn from(s: &str) -> Self {
        FormulaText::One(s.to_string())
    }
}

impl From<Vec<&str>> for FormulaText {
    fn from(items: Vec<&str>) -> Self {
        FormulaText::Many(items.into_iter().map(str::to_string).collect())
    }
}

/// One shape in the fact base: a set of equivalent labels plus formulas.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShapeRecord {
    pub labels: Vec<String>,
    #[serde(default)]
    pub area_formula: Option<FormulaText>,
    #[serde(default)]
    pub perimeter_formula: Option<FormulaText>,
}

impl ShapeRecord {
    pub fn new(labels: &[&str]) -> Self {
        Self {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            area_formula: None,
            perimeter_formula: None,
        }
    }

    pub fn with_area(mut self, formula: impl Into<FormulaText>) -> Self {
        self.area_formula = Some(formula.into());
        self
    }

    pub fn with_perimeter(mut self, formula: impl Into<FormulaText>) -> Self {
        self.perimeter_formula = Some(formula.into());
        self
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Case-insensitive label match. `needle` must already be lowercase.
    fn has_lowercase_label(&self, needle: &str) -> bool {
        self.labels.iter().any(|l| l.to_lowercase() == needle)
    }
}

/// Read-only, load-ordered table of shape records.
///
/// Built once at startup and shared (behind `Arc`) by the normalizer and
/// the lookup engine. There is no way to mutate it after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactStore {
    records: Vec<ShapeRecord>,
}

impl FactStore {
    pub fn new(records: Vec<ShapeRecord>) -> Self {
        Self { records }
    }

    /// Records in load order.
    pub fn iter(&self) -> impl Iterator<Item = &ShapeRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record (in load order) carrying `label`, ignoring case.
    pub fn find_by_label(&self, label: &str) -> Option<&ShapeRecord> {
        let needle = label.to_lowercase();
        self.records.iter().find(|r| r.has_lowercase_label(&needle))
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.find_by_label(label).is_some()
    }
}
