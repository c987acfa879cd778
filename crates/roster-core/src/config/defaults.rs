//! Compiled defaults for every config section.

// Matching
pub const DEFAULT_LOWER_BOUND: f64 = 0.95;
pub const DEFAULT_DATE_MAX_DAYS: u32 = 30;
pub const DEFAULT_FIELD_WEIGHT: f64 = 1.0;
pub const DEFAULT_PARALLEL: bool = true;

// Events
pub const DEFAULT_WARN_ON_DUPLICATE_KEYS: bool = false;
pub const DEFAULT_DROP_DUPLICATES: bool = true;

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
