/// Roster system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Column holding the person identifier in every roster table.
pub const UID_COLUMN: &str = "uid";

/// Column holding the agency name.
pub const AGENCY_COLUMN: &str = "agency";

/// Descriptive identity columns blanked on non-representative rows.
pub const NAME_COLUMNS: &[&str] = &["first_name", "last_name", "middle_name", "middle_initial"];

/// Number of hex characters in a generated uid.
pub const UID_HEX_LEN: usize = 32;

/// Separator between uid hash parts. Each part is also length-prefixed.
pub const UID_PART_SEPARATOR: u8 = 0x1f;
