//! Events from state POST certification history.

use std::collections::HashMap;

use roster_core::config::EventsConfig;
use roster_core::constants::{AGENCY_COLUMN, UID_COLUMN};
use roster_core::errors::RosterResult;
use roster_core::table::{set_values, Table, Value};
use roster_core::EventKind;
use roster_matching::MatchPair;

use crate::builder::EventBuilder;
use crate::spec::EventSpec;

const POST_PREFIXES: &[(EventKind, &str)] = &[
    (EventKind::OfficerHire, "hire"),
    (EventKind::OfficerLeft, "left"),
    (EventKind::OfficerLevel1Cert, "level_1_cert"),
    (EventKind::OfficerPc12Qualification, "pc_12_qualification"),
];

/// Extract hire, left, and certification events for one agency from POST history.
///
/// `matches` pairs agency roster uids (`a_id`) with POST uids (`b_id`). POST
/// rows whose uid was not matched are dropped; matched rows take the agency uid
/// and `agency`. Only prefixes present in `post` are extracted, as parts when
/// `{prefix}_year` exists and parsed from `{prefix}_date` otherwise.
pub fn post_events(
    post: &Table,
    matches: &[MatchPair],
    agency: &str,
    config: &EventsConfig,
) -> RosterResult<Table> {
    post.require_columns(&[UID_COLUMN], "post")?;

    let mut to_agency: HashMap<&str, &str> = HashMap::new();
    for pair in matches {
        to_agency.entry(pair.b_id.as_str()).or_insert(pair.a_id.as_str());
    }

    let matched = post.filter(|row| to_agency.contains_key(row.text(UID_COLUMN).as_ref()));
    let remapped = matched.map_column(UID_COLUMN, |value| {
        match to_agency.get(value.as_text().as_ref()) {
            Some(uid) => Value::text(*uid),
            None => value.clone(),
        }
    });
    let remapped = set_values(&remapped, &[(AGENCY_COLUMN, Value::text(agency))]);

    let specs: Vec<(EventKind, EventSpec)> = POST_PREFIXES
        .iter()
        .filter_map(|(kind, prefix)| {
            let spec = EventSpec::new(*prefix);
            if remapped.has_column(&spec.year_column()) {
                Some((*kind, spec))
            } else if remapped.has_column(&spec.date_column()) {
                Some((*kind, spec.parse_date(None)))
            } else {
                None
            }
        })
        .map(|(kind, spec)| (kind, spec.keep(&[UID_COLUMN, AGENCY_COLUMN])))
        .collect();

    tracing::debug!(
        post_rows = post.len(),
        matched = remapped.len(),
        kinds = specs.len(),
        agency,
        "extracting POST events"
    );

    let mut builder = EventBuilder::new(config.clone());
    builder.extract(&remapped, &specs, &[UID_COLUMN, AGENCY_COLUMN])?;
    Ok(builder.finalize())
}
