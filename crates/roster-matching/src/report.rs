//! Score report: every compared candidate pair, for tuning the lower bound by hand.

use std::cmp::Ordering;
use std::io;

use roster_core::errors::TableError;
use roster_core::table::{Table, Value};

use crate::matcher::{CandidateScores, ScoredPair};

/// Candidate pairs sorted by descending aggregate score.
#[derive(Debug, Clone)]
pub struct ScoreReport {
    fields: Vec<String>,
    lower_bound: f64,
    rows: Vec<ScoredPair>,
}

impl ScoreReport {
    pub fn new(scores: &CandidateScores) -> Self {
        let mut rows = scores.pairs().to_vec();
        rows.sort_by(|x, y| {
            y.score
                .partial_cmp(&x.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| (x.a_row, x.b_row).cmp(&(y.a_row, y.b_row)))
        });
        Self {
            fields: scores.fields().to_vec(),
            lower_bound: scores.lower_bound(),
            rows,
        }
    }

    pub fn rows(&self) -> &[ScoredPair] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names of the tabular form: `score`, `accepted`, `a_id`, `b_id`,
    /// `block`, then one `sim_{field}` column per configured field.
    pub fn columns(&self) -> Vec<String> {
        ["score", "accepted", "a_id", "b_id", "block"]
            .into_iter()
            .map(String::from)
            .chain(self.fields.iter().map(|f| format!("sim_{f}")))
            .collect()
    }

    pub fn to_table(&self) -> Result<Table, TableError> {
        let rows = self
            .rows
            .iter()
            .map(|pair| {
                let accepted = if pair.score >= self.lower_bound { "true" } else { "false" };
                let mut row = vec![
                    Value::Float(pair.score),
                    Value::text(accepted),
                    Value::text(pair.a_id.as_str()),
                    Value::text(pair.b_id.as_str()),
                    Value::Text(pair.block.to_string()),
                ];
                row.extend(pair.fields.iter().map(|s| Value::Float(*s)));
                row
            })
            .collect();
        Table::from_rows(self.columns(), rows)
    }

    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), TableError> {
        self.to_table()?.write_csv(writer)
    }
}

#[cfg(test)]
mod tests {
    use roster_core::config::{BlockPartConfig, FieldConfig, MatchingConfig, ScorerConfig};
    use roster_core::table::{Table, Value};

    use crate::matcher::ThresholdMatcher;

    fn scores() -> crate::matcher::CandidateScores {
        let config = MatchingConfig {
            block: vec![BlockPartConfig::exact("agency")],
            fields: vec![
                FieldConfig::new("first_name", ScorerConfig::Exact),
                FieldConfig::new("last_name", ScorerConfig::Exact),
            ],
            lower_bound: 0.75,
            parallel: false,
            ..MatchingConfig::default()
        };
        let a = Table::from_rows(
            ["uid", "first_name", "last_name", "agency"],
            vec![vec!["a1".into(), "john".into(), "smith".into(), "kenner pd".into()]],
        )
        .unwrap();
        let b = Table::from_rows(
            ["uid", "first_name", "last_name", "agency"],
            vec![
                vec!["b1".into(), "jon".into(), "smith".into(), "kenner pd".into()],
                vec!["b2".into(), "bob".into(), "ray".into(), "kenner pd".into()],
                vec!["b3".into(), "john".into(), "smith".into(), "kenner pd".into()],
            ],
        )
        .unwrap();
        ThresholdMatcher::new(config).unwrap().score(&a, &b, "uid").unwrap()
    }

    #[test]
    fn report_lists_every_candidate_by_descending_score() {
        let report = scores().report();
        assert_eq!(report.len(), 3);
        let order: Vec<&str> = report.rows().iter().map(|p| p.b_id.as_str()).collect();
        assert_eq!(order, vec!["b3", "b1", "b2"]);
    }

    #[test]
    fn table_form_flags_accepted_pairs() {
        let table = scores().report().to_table().unwrap();
        assert_eq!(
            table.columns(),
            &["score", "accepted", "a_id", "b_id", "block", "sim_first_name", "sim_last_name"]
        );
        assert_eq!(table.row(0).text("accepted"), "true");
        assert_eq!(table.row(1).text("accepted"), "false");
        assert_eq!(table.row(1).get("score"), &Value::Float(0.5));
        assert_eq!(table.row(2).text("block"), "kenner pd");
    }

    #[test]
    fn csv_export_has_header_and_one_line_per_pair() {
        let mut out = Vec::new();
        scores().report().write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("score,accepted,a_id,b_id,block,sim_first_name,sim_last_name")
        );
        assert_eq!(lines.next(), Some("1,true,a1,b3,kenner pd,1,1"));
        assert_eq!(text.lines().count(), 4);
    }
}
