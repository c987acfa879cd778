//! Fixed column contracts for output tables and the final rearrange passes.

use crate::constants::{AGENCY_COLUMN, NAME_COLUMNS, UID_COLUMN};
use crate::table::{float_to_int_str, names_to_title_case, Table};

/// Columns of a personnel table, in output order.
pub const PERSONNEL_COLUMNS: &[&str] = &[
    "uid",
    "last_name",
    "middle_name",
    "middle_initial",
    "first_name",
    "birth_year",
    "birth_month",
    "birth_day",
    "race",
    "sex",
    "agency",
];

/// Columns of an event log, in output order. The first seven are always present.
pub const EVENT_COLUMNS: &[&str] = &[
    "event_uid",
    "kind",
    "uid",
    "agency",
    "year",
    "month",
    "day",
    "time",
    "raw_date",
    "allegation_uid",
    "appeal_uid",
    "uof_uid",
    "property_claim_uid",
    "badge_no",
    "employee_id",
    "department_code",
    "department_desc",
    "division_desc",
    "rank_code",
    "rank_desc",
    "employment_status",
    "sworn",
    "officer_inactive",
    "employee_class",
    "salary",
    "salary_freq",
    "award",
    "recommended_award",
    "years_employed",
    "left_reason",
];

/// Leading columns every event row carries.
pub const EVENT_FIXED_COLUMNS: &[&str] = &["event_uid", "kind", "uid", "agency", "year", "month", "day"];

/// Event columns rendered as integer strings on output.
pub const EVENT_NUMERIC_COLUMNS: &[&str] = &[
    "badge_no",
    "employee_id",
    "year",
    "month",
    "day",
    "years_employed",
    "department_code",
    "rank_code",
];

const PERSONNEL_NUMERIC_COLUMNS: &[&str] = &["birth_year", "birth_month", "birth_day"];

/// Columns of a complaint (allegation) table, in output order.
pub const COMPLAINT_COLUMNS: &[&str] = &[
    "complaint_uid",
    "allegation_uid",
    "tracking_number",
    "uid",
    "agency",
    "complainant_name",
    "complainant_sex",
    "complainant_type",
    "allegation",
    "allegation_class",
    "charges",
    "directive",
    "paragraph_code",
    "disposition",
    "finding",
    "action",
];

/// Columns of an appeal hearing table, in output order.
pub const APPEAL_HEARING_COLUMNS: &[&str] = &[
    "appeal_uid",
    "docket_no",
    "uid",
    "agency",
    "counsel",
    "charging_supervisor",
    "action_appealed",
    "motions",
    "appeal_disposition",
];

/// Columns of a use-of-force table, in output order.
pub const USE_OF_FORCE_COLUMNS: &[&str] = &[
    "uof_uid",
    "tracking_number",
    "uid",
    "agency",
    "service_type",
    "use_of_force_type",
    "use_of_force_level",
    "use_of_force_effective",
    "disposition",
    "citizen_age",
    "citizen_age_1",
    "citizen_race",
    "citizen_sex",
    "citizen_injured",
    "officer_current_supervisor",
    "officer_age",
    "officer_years_exp",
    "officer_years_with_unit",
    "officer_injured",
];

/// Columns of a stop-and-search table, in output order.
pub const STOP_AND_SEARCH_COLUMNS: &[&str] = &[
    "stop_and_search_uid",
    "uid",
    "agency",
    "first_name",
    "middle_name",
    "last_name",
    "stop_and_search_year",
    "stop_and_search_month",
    "stop_and_search_day",
    "stop_reason",
    "stop_results",
    "subject_race",
    "subject_sex",
    "subject_age",
    "search_performed",
    "evidence_seized",
];

const USE_OF_FORCE_NUMERIC_COLUMNS: &[&str] = &[
    "citizen_age",
    "citizen_age_1",
    "officer_current_supervisor",
    "officer_age",
    "officer_years_exp",
    "officer_years_with_unit",
];

const STOP_AND_SEARCH_NUMERIC_COLUMNS: &[&str] =
    &["stop_and_search_year", "stop_and_search_month", "stop_and_search_day"];

/// Keep `contract` columns, drop duplicate rows, render `numeric` columns as
/// integer strings, and sort by agency then `uid_column`.
fn rearrange(table: &Table, contract: &[&str], numeric: &[&str], uid_column: &str) -> Table {
    let projected = table.select_existing(contract).drop_duplicates();
    float_to_int_str(&projected, numeric).sort_by(&[AGENCY_COLUMN, uid_column])
}

/// Final processing for a personnel table: drop rows without a uid, keep the
/// contract columns, drop duplicate rows, render birth parts as integer strings,
/// title-case names, and sort by uid.
pub fn rearrange_personnel_columns(table: &Table) -> Table {
    let with_uid = table.filter(|row| !row.get(UID_COLUMN).is_missing());
    let projected = with_uid.select_existing(PERSONNEL_COLUMNS).drop_duplicates();
    let numeric = float_to_int_str(&projected, PERSONNEL_NUMERIC_COLUMNS);
    names_to_title_case(&numeric, NAME_COLUMNS).sort_by(&[UID_COLUMN])
}

/// Final processing for a complaint table, sorted by (agency, complaint_uid).
pub fn rearrange_complaint_columns(table: &Table) -> Table {
    rearrange(table, COMPLAINT_COLUMNS, &["paragraph_code"], "complaint_uid")
}

/// Final processing for an appeal hearing table; counsel names are title-cased.
pub fn rearrange_appeal_hearing_columns(table: &Table) -> Table {
    let out = rearrange(table, APPEAL_HEARING_COLUMNS, &[], "appeal_uid");
    names_to_title_case(&out, &["counsel"])
}

/// Final processing for a use-of-force table, sorted by (agency, uof_uid).
pub fn rearrange_use_of_force_columns(table: &Table) -> Table {
    rearrange(table, USE_OF_FORCE_COLUMNS, USE_OF_FORCE_NUMERIC_COLUMNS, "uof_uid")
}

/// Final processing for a stop-and-search table: rows without an officer uid
/// are dropped and officer names title-cased.
pub fn rearrange_stop_and_search_columns(table: &Table) -> Table {
    let with_uid = table.filter(|row| !row.get(UID_COLUMN).is_missing());
    let out = rearrange(
        &with_uid,
        STOP_AND_SEARCH_COLUMNS,
        STOP_AND_SEARCH_NUMERIC_COLUMNS,
        "stop_and_search_uid",
    );
    names_to_title_case(&out, &["first_name", "middle_name", "last_name"])
}

/// Final processing for an event log: keep the contract columns, drop duplicate
/// rows, render numeric columns as integer strings, sort by (agency, kind, event_uid).
pub fn rearrange_event_columns(table: &Table) -> Table {
    let projected = table.select_existing(EVENT_COLUMNS).drop_duplicates();
    float_to_int_str(&projected, EVENT_NUMERIC_COLUMNS).sort_by(&[AGENCY_COLUMN, "kind", "event_uid"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    #[test]
    fn personnel_rearrange_drops_rows_without_uid() {
        let table = Table::from_rows(
            ["first_name", "uid", "birth_year", "notes"],
            vec![
                vec!["b".into(), "u2".into(), Value::Float(1980.0), "x".into()],
                vec!["a".into(), "".into(), Value::Float(1970.0), "y".into()],
                vec!["c".into(), "u1".into(), Value::Float(f64::NAN), "z".into()],
                vec!["c".into(), "u1".into(), Value::Float(f64::NAN), "z".into()],
            ],
        )
        .unwrap();
        let out = rearrange_personnel_columns(&table);
        assert_eq!(
            out.columns(),
            &["uid".to_string(), "first_name".to_string(), "birth_year".to_string()]
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out.row(0).text("uid"), "u1");
        assert_eq!(out.row(0).text("first_name"), "C");
        assert_eq!(out.row(0).get("birth_year"), &Value::text(""));
        assert_eq!(out.row(1).get("birth_year"), &Value::text("1980"));
    }

    #[test]
    fn event_rearrange_sorts_by_agency_kind_uid() {
        let table = Table::from_rows(
            ["kind", "event_uid", "agency", "year", "scratch"],
            vec![
                vec!["officer_left".into(), "e2".into(), "b pd".into(), Value::Float(2001.0), "".into()],
                vec!["officer_hire".into(), "e3".into(), "b pd".into(), Value::Float(1999.0), "".into()],
                vec!["officer_hire".into(), "e1".into(), "a pd".into(), Value::Empty, "".into()],
            ],
        )
        .unwrap();
        let out = rearrange_event_columns(&table);
        assert!(!out.has_column("scratch"));
        let order: Vec<String> = out.rows().map(|r| r.text("event_uid").into_owned()).collect();
        assert_eq!(order, vec!["e1", "e3", "e2"]);
        assert_eq!(out.row(0).get("year"), &Value::text(""));
        assert_eq!(out.row(1).get("year"), &Value::text("1999"));
    }

    #[test]
    fn complaint_rearrange_keeps_contract_and_sorts_by_complaint_uid() {
        let table = Table::from_rows(
            ["agency", "complaint_uid", "paragraph_code", "scratch"],
            vec![
                vec!["b pd".into(), "c1".into(), Value::Float(14.0), "".into()],
                vec!["a pd".into(), "c9".into(), Value::Float(f64::NAN), "".into()],
                vec!["b pd".into(), "c0".into(), "ix".into(), "".into()],
                vec!["b pd".into(), "c0".into(), "ix".into(), "".into()],
            ],
        )
        .unwrap();
        let out = rearrange_complaint_columns(&table);
        assert_eq!(out.columns(), &["complaint_uid", "agency", "paragraph_code"]);
        let order: Vec<String> = out.rows().map(|r| r.text("complaint_uid").into_owned()).collect();
        assert_eq!(order, vec!["c9", "c0", "c1"]);
        assert_eq!(out.row(0).get("paragraph_code"), &Value::text(""));
        assert_eq!(out.row(2).get("paragraph_code"), &Value::text("14"));
    }

    #[test]
    fn appeal_rearrange_title_cases_counsel() {
        let table = Table::from_rows(
            ["appeal_uid", "agency", "counsel"],
            vec![
                vec!["p2".into(), "new orleans pd".into(), "JOHN doe".into()],
                vec!["p1".into(), "new orleans pd".into(), "".into()],
            ],
        )
        .unwrap();
        let out = rearrange_appeal_hearing_columns(&table);
        assert_eq!(out.row(0).text("appeal_uid"), "p1");
        assert_eq!(out.row(1).text("counsel"), "John Doe");
    }

    #[test]
    fn use_of_force_rearrange_renders_ages_as_integers() {
        let table = Table::from_rows(
            ["uof_uid", "agency", "officer_age", "citizen_race"],
            vec![vec!["f1".into(), "kenner pd".into(), Value::Float(31.0), "white".into()]],
        )
        .unwrap();
        let out = rearrange_use_of_force_columns(&table);
        assert_eq!(out.row(0).get("officer_age"), &Value::text("31"));
        assert_eq!(out.row(0).text("citizen_race"), "white");
    }

    #[test]
    fn stop_and_search_rearrange_drops_rows_without_officer() {
        let table = Table::from_rows(
            ["stop_and_search_uid", "uid", "agency", "last_name", "stop_and_search_year"],
            vec![
                vec!["s1".into(), "u1".into(), "new orleans pd".into(), "landry".into(), Value::Float(2019.0)],
                vec!["s2".into(), Value::Empty, "new orleans pd".into(), "doe".into(), Value::Float(2020.0)],
            ],
        )
        .unwrap();
        let out = rearrange_stop_and_search_columns(&table);
        assert_eq!(out.len(), 1);
        assert_eq!(out.row(0).text("last_name"), "Landry");
        assert_eq!(out.row(0).get("stop_and_search_year"), &Value::text("2019"));
    }
}
