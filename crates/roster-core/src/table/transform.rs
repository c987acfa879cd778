//! Column-level transforms applied between cleaning and output.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use super::value::float_to_i64;
use super::{Table, Value};

/// Render float cells of `columns` as integer strings.
///
/// Floats become their truncated integer text, NaN, infinite and empty cells
/// become `""`. Finite floats beyond the `i64` range keep their decimal text.
/// Integer and text cells are left untouched, so an integer-typed column passes
/// through unchanged and a mixed column only has its floats converted.
pub fn float_to_int_str(table: &Table, columns: &[&str]) -> Table {
    columns.iter().fold(table.clone(), |acc, column| {
        acc.map_column(column, |value| match value {
            Value::Float(f) if !f.is_finite() => Value::text(""),
            Value::Float(f) => match float_to_i64(*f) {
                Some(i) => Value::Text(i.to_string()),
                None => Value::Text(format!("{:.0}", f.trunc())),
            },
            Value::Empty => Value::text(""),
            other => other.clone(),
        })
    })
}

/// Combine year/month/day columns into one date value per row.
///
/// Rows with a missing or invalid component produce `Value::Empty`.
pub fn combine_date_columns(table: &Table, year: &str, month: &str, day: &str) -> Vec<Value> {
    table
        .rows()
        .map(|row| {
            let parts = (
                row.get(year).as_i64(),
                row.get(month).as_i64(),
                row.get(day).as_i64(),
            );
            match parts {
                (Some(y), Some(m), Some(d)) => {
                    NaiveDate::from_ymd_opt(y as i32, m as u32, d as u32).into()
                }
                _ => Value::Empty,
            }
        })
        .collect()
}

/// Blank `{prefix}_year/_month/_day` on rows whose (possibly partial) date lies
/// after `cutoff`.
///
/// A partial date is compared only on the components it has: a year after the
/// cutoff year is always in the future, a month only counts when the year ties.
pub fn remove_future_dates(table: &Table, cutoff: NaiveDate, prefixes: &[&str]) -> Table {
    let mut out = table.clone();
    for prefix in prefixes {
        let year_col = format!("{prefix}_year");
        let month_col = format!("{prefix}_month");
        let day_col = format!("{prefix}_day");
        let future: Vec<bool> = out
            .rows()
            .map(|row| {
                is_after(
                    row.get(&year_col).as_i64(),
                    row.get(&month_col).as_i64(),
                    row.get(&day_col).as_i64(),
                    cutoff,
                )
            })
            .collect();
        for column in [&year_col, &month_col, &day_col] {
            let Some(col) = out.column_index(column) else {
                continue;
            };
            for (row, blank) in out.rows.iter_mut().zip(&future) {
                if *blank {
                    row[col] = Value::text("");
                }
            }
        }
    }
    out
}

fn is_after(year: Option<i64>, month: Option<i64>, day: Option<i64>, cutoff: NaiveDate) -> bool {
    let Some(year) = year else {
        return false;
    };
    let cy = cutoff.year() as i64;
    if year != cy {
        return year > cy;
    }
    let Some(month) = month else {
        return false;
    };
    let cm = cutoff.month() as i64;
    if month != cm {
        return month > cm;
    }
    day.is_some_and(|d| d > cutoff.day() as i64)
}

static COLUMN_NAME_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\W]+").expect("static column name pattern"));

/// Drop spreadsheet `Unnamed:` columns and convert the rest to snake case.
pub fn clean_column_names(table: &Table) -> Table {
    let kept: Vec<&str> = table
        .columns()
        .iter()
        .filter(|c| !c.starts_with("Unnamed:"))
        .map(String::as_str)
        .collect();
    let mut out = table.select_existing(&kept);
    out.columns = out
        .columns
        .iter()
        .map(|c| {
            COLUMN_NAME_SEPARATORS
                .replace_all(c.trim(), "_")
                .to_lowercase()
                .trim_matches('_')
                .to_string()
        })
        .collect();
    out
}

/// Set each listed column to a constant, adding columns that do not exist yet.
pub fn set_values(table: &Table, assignments: &[(&str, Value)]) -> Table {
    assignments.iter().fold(table.clone(), |mut acc, (column, value)| {
        let values = vec![value.clone(); acc.len()];
        // Lengths always agree: the vector is sized from the table itself.
        if let Ok(next) = acc.with_column(column, values) {
            acc = next;
        }
        acc
    })
}

/// Title-case text cells of `columns`: the first letter of every alphabetic run
/// is upper-cased and the rest lower-cased, so `"o'neil-SMITH"` becomes
/// `"O'Neil-Smith"`. Other cells are left untouched.
pub fn names_to_title_case(table: &Table, columns: &[&str]) -> Table {
    columns.iter().fold(table.clone(), |acc, column| {
        acc.map_column(column, |value| match value {
            Value::Text(s) => Value::Text(title_case(s)),
            other => other.clone(),
        })
    })
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
