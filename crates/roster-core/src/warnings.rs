//! Non-fatal data-quality signals.
//!
//! These never abort a run. Stages collect them and log them through `tracing`;
//! callers decide whether to surface them further.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event_kind::EventKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum DataQualityWarning {
    /// Two rows of one extraction produced the same event uid with different payloads.
    DuplicateEventKey {
        kind: EventKind,
        event_uid: String,
        rows: Vec<usize>,
    },
    /// A key column holds the same value on more than one row.
    DuplicateKey { column: String, values: Vec<String> },
    /// An agency appears in a table but not in the personnel roster.
    UnknownAgency { agency: String },
    /// One uid was listed in more than one cluster; the first cluster wins.
    ConflictingCluster {
        uid: String,
        kept: String,
        ignored: String,
    },
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateEventKey { kind, event_uid, rows } => write!(
                f,
                "{kind} event {event_uid} produced by rows {rows:?} with differing payloads"
            ),
            Self::DuplicateKey { column, values } => {
                write!(f, "duplicate values in '{column}': {values:?}")
            }
            Self::UnknownAgency { agency } => write!(f, "agency not in personnel: {agency}"),
            Self::ConflictingCluster { uid, kept, ignored } => write!(
                f,
                "uid {uid} listed under {kept} and {ignored}; keeping {kept}"
            ),
        }
    }
}
