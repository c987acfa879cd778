use serde::{Deserialize, Serialize};

use super::defaults;

/// Event extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Report event uids shared by rows with different payloads. Off unless
    /// enabled; duplicates are otherwise merged silently.
    pub warn_on_duplicate_keys: bool,
    /// Drop fully identical event rows when finalizing.
    pub drop_duplicates: bool,
    /// chrono format used for `{prefix}_date` columns when a spec gives none.
    /// `None` means infer.
    pub default_date_format: Option<String>,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            warn_on_duplicate_keys: defaults::DEFAULT_WARN_ON_DUPLICATE_KEYS,
            drop_duplicates: defaults::DEFAULT_DROP_DUPLICATES,
            default_date_format: None,
        }
    }
}
