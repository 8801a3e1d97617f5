use std::fmt;
use std::sync::Arc;

use crate::constants::{AREA_PREFIX, AREA_UNAVAILABLE, NOT_FOUND, PERIMETER_PREFIX};
use crate::fact::{FactStore, FormulaText, ShapeRecord};

/// Formulas extracted from a matching record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaAnswer {
    pub area: String,
    pub perimeter: Option<String>,
}

impl FormulaAnswer {
    pub fn from_record(record: &ShapeRecord) -> Self {
        let area = record
            .area_formula
            .as_ref()
            .and_then(FormulaText::primary)
            .unwrap_or(AREA_UNAVAILABLE)
            .to_string();
        let perimeter = record
            .perimeter_formula
            .as_ref()
            .and_then(FormulaText::primary)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        Self { area, perimeter }
    }
}

/// Renders the response text; the second line is present only when a
/// perimeter formula exists. Line breaks are `\n`.
impl fmt::Display for FormulaAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{AREA_PREFIX}{}", self.area)?;
        if let Some(perimeter) = &self.perimeter {
            write!(f, "\n{PERIMETER_PREFIX}{perimeter}")?;
        }
        Ok(())
    }
}

/// Linear scan over the fact base for a canonical identifier.
#[derive(Debug, Clone)]
pub struct LookupEngine {
    facts: Arc<FactStore>,
}

impl LookupEngine {
    pub fn new(facts: Arc<FactStore>) -> Self {
        Self { facts }
    }

    pub fn facts(&self) -> &FactStore {
        &self.facts
    }

    /// First record in load order whose labels match, ignoring case.
    pub fn find(&self, identifier: &str) -> Option<FormulaAnswer> {
        self.facts
            .find_by_label(identifier)
            .map(FormulaAnswer::from_record)
    }

    pub fn lookup(&self, identifier: &str) -> String {
        match self.find(identifier) {
            Some(answer) => answer.to_string(),
            None => {
                tracing::debug!("no fact record for '{identifier}'");
                NOT_FOUND.to_string()
            }
        }
    }
}
