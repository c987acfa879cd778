use proptest::prelude::*;
use roster_core::table::{Table, Value};
use roster_core::uid::{assign_uids, uid};

fn names() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z]{1,8}", "[a-z]{1,10}"), 1..20)
}

proptest! {
    #[test]
    fn uid_is_a_pure_function_of_its_parts(a in ".{0,30}", b in ".{0,30}") {
        prop_assert_eq!(uid(&[&a, &b]), uid(&[a.clone(), b.clone()]));
        prop_assert_eq!(uid(&[&a, &b]).len(), 32);
    }

    #[test]
    fn uid_does_not_depend_on_row_order(rows in names()) {
        let forward: Vec<Vec<Value>> = rows
            .iter()
            .map(|(f, l)| vec![Value::text(f.as_str()), Value::text(l.as_str())])
            .collect();
        let mut backward = forward.clone();
        backward.reverse();

        let a = assign_uids(&Table::from_rows(["first_name", "last_name"], forward).unwrap(), &["first_name", "last_name"]).unwrap();
        let b = assign_uids(&Table::from_rows(["first_name", "last_name"], backward).unwrap(), &["first_name", "last_name"]).unwrap();

        let n = rows.len();
        for i in 0..n {
            prop_assert_eq!(a.row(i).text("uid"), b.row(n - 1 - i).text("uid"));
        }
    }

    #[test]
    fn distinct_tuples_get_distinct_uids(a in "[a-z]{1,12}", b in "[a-z]{1,12}") {
        prop_assume!(a != b);
        prop_assert_ne!(uid(&[&a]), uid(&[&b]));
    }
}
