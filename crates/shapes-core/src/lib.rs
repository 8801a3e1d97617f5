//! Shape formula lookup engine.
//!
//! Turns a free-text question ("area of circle") into a canonical shape
//! identifier, then scans a read-only fact base for the matching formulas.
//! Normalization tries an optional external classifier first and falls back
//! to a static synonym table.
//!
//! No file or network I/O: fact bases are loaded by `shapes-store`, and the
//! classifier is injected through the [`Classifier`] trait.

pub mod classifier;
pub mod constants;
pub mod fact;
pub mod lookup;
pub mod normalize;
pub mod service;
pub mod synonyms;

pub use classifier::{Classifier, ClassifierError, Prediction, top_label};
pub use constants::{
    AREA_PREFIX, AREA_UNAVAILABLE, DEFAULT_CLASSIFIER_TIMEOUT, NOT_FOUND, PERIMETER_PREFIX,
};
pub use fact::{FactStore, FormulaText, ShapeRecord};
pub use lookup::{FormulaAnswer, LookupEngine};
pub use normalize::ConceptNormalizer;
pub use service::{Answer, FormulaService};
pub use synonyms::SynonymTable;
