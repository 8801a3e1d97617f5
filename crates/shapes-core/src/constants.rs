use std::time::Duration;

/// Prefix of every successful lookup response.
pub const AREA_PREFIX: &str = "Area Formula: ";

/// Prefix of the optional second response line.
pub const PERIMETER_PREFIX: &str = "Perimeter/Circumference Formula: ";

/// Substituted when a matching record carries no area formula.
pub const AREA_UNAVAILABLE: &str = "Area formula not available.";

/// Returned when no record matches the normalized concept.
pub const NOT_FOUND: &str = "The concept you entered was not found. Please try again.";

/// Upper bound on a single classifier call before it counts as failed.
pub const DEFAULT_CLASSIFIER_TIMEOUT: Duration = Duration::from_secs(2);
