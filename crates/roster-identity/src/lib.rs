//! # roster-identity
//!
//! Turns match results into a canonical identity space: cluster members take
//! their representative's uid, duplicate names are suppressed, per-officer
//! attributes are fused across rosters, and downstream tables have their uids
//! substituted.

pub mod canonicalize;
pub mod checks;
pub mod personnel;
pub mod substitution;

pub use canonicalize::{canonicalize_officers, Canonicalizer};
pub use checks::{agency_subset_warnings, ensure_uid_unique, require_unique};
pub use personnel::fuse_personnel;
pub use substitution::apply_uid_mapping;
