//! Golden datasets for roster tests.
//!
//! Each file under `golden/` is a JSON object with a `description` and one or
//! more arrays of flat records. Tests turn record arrays into tables with
//! `Table::from_records`.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::de::DeserializeOwned;

const GOLDEN_DIR: &str = "golden";

/// Directory of this crate, located from whichever crate runs the test.
fn fixtures_root() -> &'static Path {
    static ROOT: OnceLock<PathBuf> = OnceLock::new();
    ROOT.get_or_init(|| {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        manifest_dir
            .ancestors()
            .flat_map(|dir| [dir.to_path_buf(), dir.join("test-fixtures")])
            .find(|candidate| candidate.join(GOLDEN_DIR).is_dir())
            .unwrap_or_else(|| panic!("no golden fixtures above {}", manifest_dir.display()))
    })
}

/// Deserialize a fixture file into `T`.
///
/// # Panics
/// When the file is missing or does not match `T`.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let bytes = std::fs::read(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
    serde_json::from_slice(&bytes).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Records stored under `key`.
///
/// # Panics
/// When `key` is absent or not an array.
pub fn fixture_records(relative_path: &str, key: &str) -> Vec<serde_json::Value> {
    match load_fixture_value(relative_path).get_mut(key).map(serde_json::Value::take) {
        Some(serde_json::Value::Array(records)) => records,
        _ => panic!("{relative_path}: '{key}' is not a record array"),
    }
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixture_path(relative_path).is_file()
}
