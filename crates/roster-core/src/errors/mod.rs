//! Error handling for roster.
//! One error enum per subsystem, `thiserror` only.

mod config_error;
mod event_error;
mod match_error;
mod roster_error;
mod table_error;

pub use config_error::ConfigError;
pub use event_error::EventError;
pub use match_error::MatchError;
pub use roster_error::{RosterError, RosterResult};
pub use table_error::TableError;
