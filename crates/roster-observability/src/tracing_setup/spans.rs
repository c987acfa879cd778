//! Span definitions per pipeline stage: matching, canonicalization, event extraction.

/// Create a matching span.
#[macro_export]
macro_rules! match_span {
    ($mode:expr, $a_rows:expr, $b_rows:expr) => {
        tracing::info_span!(
            "roster.match",
            mode = ?$mode,
            a_rows = $a_rows,
            b_rows = $b_rows
        )
    };
}

/// Create a canonicalization span.
#[macro_export]
macro_rules! canonicalize_span {
    ($rows:expr, $clusters:expr) => {
        tracing::info_span!("roster.canonicalize", rows = $rows, clusters = $clusters)
    };
}

/// Create an event extraction span.
#[macro_export]
macro_rules! extract_span {
    ($kind:expr, $rows:expr) => {
        tracing::info_span!("roster.extract", kind = %$kind, rows = $rows)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const MATCH: &str = "roster.match";
    pub const CANONICALIZE: &str = "roster.canonicalize";
    pub const EXTRACT: &str = "roster.extract";
}
