//! # roster-events
//!
//! Event extraction as a small rule interpreter: an [`EventSpec`] per
//! [`EventKind`](roster_core::EventKind) says where a source table keeps the
//! event's date and which columns travel with it. [`EventBuilder`] applies
//! specs to tables and collects one event log.

pub mod builder;
pub mod post;
pub mod spec;

pub use builder::EventBuilder;
pub use post::post_events;
pub use spec::{DateSource, EventSpec};
