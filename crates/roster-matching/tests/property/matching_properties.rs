use proptest::prelude::*;
use roster_core::config::{BlockPartConfig, FieldConfig, MatchMode, MatchingConfig, ScorerConfig};
use roster_core::table::{Table, Value};
use roster_matching::blocking::BlockKey;
use roster_matching::similarity::{DamerauLevenshtein, DateSimilarity, ExactMatch, FieldSimilarity, JaroWinkler};
use roster_matching::{ClusterResolver, MatchEngine};

fn officers() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-d][a-z]{0,5}", "[a-d][a-z]{0,6}"), 0..12)
}

fn table(prefix: &str, rows: &[(String, String)]) -> Table {
    Table::from_rows(
        ["uid", "first_name", "last_name"],
        rows.iter()
            .enumerate()
            .map(|(i, (f, l))| {
                vec![
                    Value::Text(format!("{prefix}{i}")),
                    Value::text(f.as_str()),
                    Value::text(l.as_str()),
                ]
            })
            .collect(),
    )
    .unwrap()
}

fn config(mode: MatchMode, parallel: bool) -> MatchingConfig {
    MatchingConfig {
        block: vec![
            BlockPartConfig::first_char("first_name"),
            BlockPartConfig::first_char("last_name"),
        ],
        fields: vec![
            FieldConfig::new("first_name", ScorerConfig::JaroWinkler),
            FieldConfig::new("last_name", ScorerConfig::DamerauLevenshtein),
        ],
        lower_bound: 0.8,
        mode,
        parallel,
        ..MatchingConfig::default()
    }
}

proptest! {
    #[test]
    fn every_similarity_is_symmetric(a in "[a-zA-Z ]{0,12}", b in "[a-zA-Z ]{0,12}") {
        let functions: Vec<Box<dyn FieldSimilarity>> = vec![
            Box::new(JaroWinkler),
            Box::new(DamerauLevenshtein),
            Box::new(ExactMatch),
        ];
        let (a, b) = (Value::text(a), Value::text(b));
        for f in &functions {
            let ab = f.score(&a, &b);
            prop_assert_eq!(ab, f.score(&b, &a));
            prop_assert!((0.0..=1.0).contains(&ab));
        }
    }

    #[test]
    fn date_similarity_is_symmetric(x in 0i64..20_000, y in 0i64..20_000, max_days in 1u32..400) {
        let epoch = chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let a = Value::Date(epoch + chrono::Duration::days(x));
        let b = Value::Date(epoch + chrono::Duration::days(y));
        let sim = DateSimilarity { max_days };
        prop_assert_eq!(sim.score(&a, &b), sim.score(&b, &a));
    }

    #[test]
    fn report_only_holds_same_block_pairs(a in officers(), b in officers()) {
        let (a, b) = (table("a", &a), table("b", &b));
        let cfg = config(MatchMode::Pairwise, false);
        let outcome = MatchEngine::new(cfg.clone()).unwrap().run(&a, &b, "uid").unwrap();
        for pair in outcome.report().rows() {
            prop_assert_eq!(
                BlockKey::of(a.row(pair.a_row), &cfg.block),
                BlockKey::of(b.row(pair.b_row), &cfg.block)
            );
        }
    }

    #[test]
    fn parallel_scoring_matches_sequential(a in officers(), b in officers()) {
        let (a, b) = (table("a", &a), table("b", &b));
        let seq = MatchEngine::new(config(MatchMode::Cluster, false)).unwrap().run(&a, &b, "uid").unwrap();
        let par = MatchEngine::new(config(MatchMode::Cluster, true)).unwrap().run(&a, &b, "uid").unwrap();
        prop_assert_eq!(seq.pairs, par.pairs);
        prop_assert_eq!(seq.clusters, par.clusters);
        prop_assert_eq!(seq.mapping, par.mapping);
    }

    #[test]
    fn accepted_pairs_are_transitively_closed(edges in prop::collection::vec((0u8..10, 0u8..10), 0..20)) {
        let edges: Vec<(String, String)> = edges
            .iter()
            .map(|(x, y)| (format!("u{x}"), format!("u{y}")))
            .collect();
        let clusters = ClusterResolver::default().resolve(&edges);
        for (x, y) in &edges {
            let holding_x: Vec<_> = clusters.iter().filter(|c| c.contains(x)).collect();
            prop_assert_eq!(holding_x.len(), 1);
            prop_assert!(holding_x[0].contains(y));
        }
        let mut reversed = edges.clone();
        reversed.reverse();
        prop_assert_eq!(clusters, ClusterResolver::default().resolve(&reversed));
    }
}
