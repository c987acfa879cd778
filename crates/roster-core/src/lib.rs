//! # roster-core
//!
//! Foundation crate for the roster entity-resolution pipeline.
//! Defines the table model, errors, config, uid hashing, event kinds,
//! and the fixed column contracts. Every other crate in the workspace depends on this.

pub mod columns;
pub mod config;
pub mod constants;
pub mod dates;
pub mod errors;
pub mod event_kind;
pub mod table;
pub mod uid;
pub mod warnings;

// Re-export the most commonly used types at the crate root.
pub use config::RosterConfig;
pub use errors::{RosterError, RosterResult};
pub use event_kind::EventKind;
pub use table::{Row, Table, Value};
pub use uid::uid;
pub use warnings::DataQualityWarning;
