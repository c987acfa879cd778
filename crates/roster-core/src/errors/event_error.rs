use crate::event_kind::EventKind;

/// Event extraction errors.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("no date columns for {kind} with prefix '{prefix}' (need {prefix}_year/_month/_day or {prefix}_date)")]
    MissingDateColumns { kind: EventKind, prefix: String },

    #[error("{kind} keeps column '{column}' which the source table lacks")]
    MissingKeepColumn { kind: EventKind, column: String },

    #[error("event key column '{column}' missing from source table")]
    MissingKeyColumn { column: String },

    #[error("no key columns given for event extraction")]
    EmptyKey,
}
