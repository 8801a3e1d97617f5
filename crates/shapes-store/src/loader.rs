use std::fs;
use std::path::Path;

use serde::Deserialize;
use shapes_core::{FactStore, ShapeRecord};

use crate::error::{Result, StoreError};

const BUILTIN_FACTS: &str = include_str!("../data/shapes.toml");

/// On-disk fact-base encodings, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactFormat {
    Toml,
    Json,
}

impl FactFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("toml") => Ok(FactFormat::Toml),
            Some("json") => Ok(FactFormat::Json),
            _ => Err(StoreError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Top-level document. TOML files spell the array `[[shape]]`,
/// JSON files `"shapes": [...]`; both are accepted either way.
#[derive(Debug, Deserialize)]
struct FactDocument {
    #[serde(default, alias = "shape")]
    shapes: Vec<ShapeRecord>,
}

/// Parse fact-base text in the given format and validate it.
pub fn parse_str(content: &str, format: FactFormat) -> Result<FactStore> {
    let doc: FactDocument = match format {
        FactFormat::Toml => toml::from_str(content)?,
        FactFormat::Json => serde_json::from_str(content)?,
    };
    validate(&doc.shapes)?;
    Ok(FactStore::new(doc.shapes))
}

/// Load a fact base from a `.toml` or `.json` file.
pub fn load_path(path: &Path) -> Result<FactStore> {
    let format = FactFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let facts = parse_str(&content, format)?;
    tracing::info!(
        "loaded {} shape records from {}",
        facts.len(),
        path.display()
    );
    Ok(facts)
}

/// The fact base compiled into the binary.
pub fn builtin() -> Result<FactStore> {
    parse_str(BUILTIN_FACTS, FactFormat::Toml)
}

fn validate(records: &[ShapeRecord]) -> Result<()> {
    for (i, record) in records.iter().enumerate() {
        if record.labels.iter().all(|l| l.trim().is_empty()) {
            return Err(StoreError::InvalidData(format!(
                "shape #{} has no non-blank label",
                i + 1
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapes_core::FormulaText;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_has_four_shapes() {
        let facts = builtin().unwrap();
        let labels: Vec<&str> = facts.iter().map(|r| r.labels[0].as_str()).collect();
        assert_eq!(labels, vec!["circle", "rectangle", "square", "triangle"]);
    }

    #[test]
    fn test_builtin_circle_formulas() {
        let facts = builtin().unwrap();
        let circle = facts.find_by_label("circle").unwrap();
        assert_eq!(circle.area_formula, Some(FormulaText::from("πr²")));
        assert_eq!(
            circle.perimeter_formula,
            Some(FormulaText::from(vec!["2πr", "πd"]))
        );
    }

    #[test]
    fn test_parse_toml() {
        let facts = parse_str(
            r#"
[[shape]]
labels = ["Hexagon", "regular hexagon"]
area_formula = "(3√3/2)s²"

[[shape]]
labels = ["point"]
"#,
            FactFormat::Toml,
        )
        .unwrap();
        assert_eq!(facts.len(), 2);
        assert!(facts.contains_label("regular hexagon"));
        assert!(facts.find_by_label("point").unwrap().area_formula.is_none());
    }

    #[test]
    fn test_parse_json() {
        let facts = parse_str(
            r#"{"shapes": [{"labels": ["ellipse"], "area_formula": ["πab"], "perimeter_formula": null}]}"#,
            FactFormat::Json,
        )
        .unwrap();
        let ellipse = facts.find_by_label("ELLIPSE").unwrap();
        assert_eq!(ellipse.area_formula, Some(FormulaText::from(vec!["πab"])));
        assert!(ellipse.perimeter_formula.is_none());
    }

    #[test]
    fn test_empty_document_is_empty_store() {
        let facts = parse_str("", FactFormat::Toml).unwrap();
        assert!(facts.is_empty());
    }

    #[test]
    fn test_blank_labels_rejected() {
        let err = parse_str(
            r#"{"shapes": [{"labels": ["circle"]}, {"labels": ["  "]}]}"#,
            FactFormat::Json,
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::InvalidData(ref m) if m.contains("#2")));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = parse_str("[[shape]]\nlabels = 3", FactFormat::Toml).unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            FactFormat::from_path(Path::new("a/facts.TOML")).unwrap(),
            FactFormat::Toml
        );
        assert_eq!(
            FactFormat::from_path(Path::new("facts.json")).unwrap(),
            FactFormat::Json
        );
        assert!(matches!(
            FactFormat::from_path(Path::new("shapes_formula.rdf")),
            Err(StoreError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_path_roundtrip_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("facts.json");
        fs::write(
            &path,
            r#"{"shapes": [{"labels": ["kite"], "area_formula": "pq/2"}]}"#,
        )
        .unwrap();

        let facts = load_path(&path).unwrap();
        assert!(facts.contains_label("kite"));
    }

    #[test]
    fn test_load_path_missing_file() {
        let dir = TempDir::new().unwrap();
        let path: PathBuf = dir.path().join("missing.toml");
        let err = load_path(&path).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }
}
