//! Configuration for a roster run.
//! TOML-based; every section is optional and falls back to [`defaults`].

pub mod defaults;
pub mod events_config;
pub mod matching_config;
pub mod observability_config;
pub mod roster_config;

pub use events_config::EventsConfig;
pub use matching_config::{
    BlockKind, BlockPartConfig, FieldConfig, MatchMode, MatchingConfig, Representative,
    ScorerConfig,
};
pub use observability_config::ObservabilityConfig;
pub use roster_config::RosterConfig;
