use proptest::prelude::*;
use roster_core::config::EventsConfig;
use roster_core::table::{Table, Value};
use roster_core::EventKind;
use roster_events::{EventBuilder, EventSpec};

fn hires() -> impl Strategy<Value = Vec<(u8, Option<i64>, Option<i64>)>> {
    prop::collection::vec((0u8..6, prop::option::of(1990i64..2022), prop::option::of(1i64..13)), 0..16)
}

fn table(rows: &[(u8, Option<i64>, Option<i64>)]) -> Table {
    Table::from_rows(
        ["uid", "agency", "hire_year", "hire_month"],
        rows.iter()
            .map(|(officer, year, month)| {
                vec![
                    Value::Text(format!("u{officer}")),
                    Value::text("Kenner PD"),
                    (*year).into(),
                    (*month).into(),
                ]
            })
            .collect(),
    )
    .unwrap()
}

fn log(rows: &[(u8, Option<i64>, Option<i64>)]) -> Table {
    let mut builder = EventBuilder::new(EventsConfig::default());
    builder
        .extract(
            &table(rows),
            &[(EventKind::OfficerHire, EventSpec::new("hire"))],
            &["uid", "hire_year", "hire_month"],
        )
        .unwrap();
    builder.finalize()
}

proptest! {
    #[test]
    fn event_log_ignores_source_row_order(rows in hires()) {
        let mut reversed = rows.clone();
        reversed.reverse();
        prop_assert_eq!(log(&rows), log(&reversed));
    }

    #[test]
    fn only_rows_with_a_year_produce_events(rows in hires()) {
        let dated = rows
            .iter()
            .filter(|(_, year, _)| year.is_some())
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        prop_assert_eq!(log(&rows).len(), dated);
    }

    #[test]
    fn event_uids_are_unique_after_dedup(rows in hires()) {
        let log = log(&rows);
        let uids: std::collections::BTreeSet<String> =
            log.rows().map(|r| r.text("event_uid").into_owned()).collect();
        prop_assert_eq!(uids.len(), log.len());
    }
}
