use std::io::ErrorKind;
use std::path::Path;

use crate::{Result, Store};

/// Name of the per-project file the store is persisted to.
pub const PROJECT_FILE: &str = ".code-reader.json";

/// Parses a store from its JSON document form.
///
/// Parsing is strict: syntax errors, inverted or 0-indexed ranges, color
/// labels outside the known set and range arrays that are not sorted,
/// disjoint and non-adjacent all fail. Paths and colors simply absent from
/// the document are fine and read as empty.
pub fn parse(s: &str) -> Result<Store> {
    Ok(serde_json::from_str(s)?)
}

/// Renders the store as a pretty-printed JSON document.
pub fn serialize(store: &Store) -> Result<String> {
    Ok(serde_json::to_string_pretty(store)?)
}

/// Loads the project file from `dir`, or an empty store if there is none.
pub fn read_project(dir: impl AsRef<Path>) -> Result<Store> {
    match std::fs::read_to_string(dir.as_ref().join(PROJECT_FILE)) {
        Ok(contents) => parse(&contents),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Store::new()),
        Err(e) => Err(e.into()),
    }
}

/// Writes the store to the project file in `dir`.
pub fn write_project(dir: impl AsRef<Path>, store: &Store) -> Result<()> {
    std::fs::write(dir.as_ref().join(PROJECT_FILE), serialize(store)?)?;

    Ok(())
}
