use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{Error, Instructions, IntervalSet, LineRange};

/// The closed set of marker colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Blue,
    Red,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Green, Color::Blue, Color::Red];

    fn as_str(self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Red => "red",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "green" => Ok(Color::Green),
            "blue" => Ok(Color::Blue),
            "red" => Ok(Color::Red),
            other => Err(Error::UnknownColor(other.to_string())),
        }
    }
}

/// Everything recorded about a single file: its last known line count and the
/// marked ranges of each color.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(rename = "_lineCount", default)]
    line_count: u32,
    #[serde(flatten)]
    colors: BTreeMap<Color, IntervalSet>,
}

/// All marked ranges of a project, keyed by file path relative to the project
/// root.
///
/// Records are created lazily: querying an unknown path or color yields an
/// empty answer, and the first mutation touching a path materializes its
/// record. Records are never dropped again; a set that empties out through
/// deletion stays in the map as an empty sequence. Callers only ever receive
/// copies and diff instructions, never a handle into the stored data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store {
    files: BTreeMap<String, FileRecord>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, path: &str) -> &mut FileRecord {
        self.files.entry(path.to_string()).or_default()
    }

    /// The recorded number of lines of `path`, 0 when unknown.
    pub fn line_count(&self, path: &str) -> u32 {
        self.files.get(path).map_or(0, |record| record.line_count)
    }

    pub fn set_line_count(&mut self, path: &str, line_count: u32) {
        self.record(path).line_count = line_count;
    }

    /// Whether `path` has at least one range marked in `color`.
    pub fn has_color(&self, path: &str, color: Color) -> bool {
        self.files
            .get(path)
            .and_then(|record| record.colors.get(&color))
            .is_some_and(|set| !set.is_empty())
    }

    /// The current canonical ranges of one (path, color) pair, copied out.
    pub fn ranges(&self, path: &str, color: Color) -> Vec<LineRange> {
        self.files
            .get(path)
            .and_then(|record| record.colors.get(&color))
            .map_or_else(Vec::new, |set| set.as_slice().to_vec())
    }

    /// Whether at least 80% of the file's recorded lines carry some color.
    ///
    /// Always false while the line count is unknown. Lines marked in several
    /// colors count once per color, so overlapping colors can push a file
    /// over the threshold early.
    pub fn is_mostly_colored(&self, path: &str) -> bool {
        let Some(record) = self.files.get(path) else {
            return false;
        };
        if record.line_count == 0 {
            return false;
        }

        let covered: u32 = record.colors.values().map(IntervalSet::covered_lines).sum();

        f64::from(covered) / f64::from(record.line_count) >= 0.8
    }

    /// Marks `range` with `color`, merging it into the ranges already stored
    /// for the pair. See [`Instructions`] for what the result describes.
    pub fn add_range(&mut self, path: &str, color: Color, range: LineRange) -> Instructions {
        debug!("add {:?} to {} of {}", range, color, path);

        self.record(path).colors.entry(color).or_default().add(range)
    }

    /// Unmarks every line of `range` in `color`, trimming or splitting stored
    /// ranges as needed.
    pub fn delete_range(&mut self, path: &str, color: Color, range: LineRange) -> Instructions {
        debug!("delete {:?} from {} of {}", range, color, path);

        self.record(path)
            .colors
            .entry(color)
            .or_default()
            .delete(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn r(lo: u32, hi: u32) -> LineRange {
        LineRange::new(lo, hi).unwrap()
    }

    #[test]
    fn line_count_defaults_to_zero() {
        let mut store = Store::new();

        assert_eq!(store.line_count("a.rs"), 0);

        store.set_line_count("a.rs", 120);
        assert_eq!(store.line_count("a.rs"), 120);
    }

    #[test]
    fn empty_sets_do_not_count_as_colored() {
        let mut store = Store::new();

        assert!(!store.has_color("a.rs", Color::Red));

        store.add_range("a.rs", Color::Red, r(1, 3));
        assert!(store.has_color("a.rs", Color::Red));
        assert!(!store.has_color("a.rs", Color::Blue));

        store.delete_range("a.rs", Color::Red, r(1, 3));
        assert!(!store.has_color("a.rs", Color::Red));
    }

    #[test]
    fn mostly_colored_requires_a_line_count() {
        let mut store = Store::new();
        store.add_range("a.rs", Color::Green, r(1, 100));

        assert!(!store.is_mostly_colored("a.rs"));

        store.set_line_count("a.rs", 100);
        assert!(store.is_mostly_colored("a.rs"));

        store.set_line_count("a.rs", 200);
        assert!(!store.is_mostly_colored("a.rs"));
    }

    #[test]
    fn mostly_colored_counts_overlapping_colors_twice() {
        let mut store = Store::new();
        store.set_line_count("a.rs", 100);
        store.add_range("a.rs", Color::Green, r(1, 40));
        store.add_range("a.rs", Color::Blue, r(1, 40));

        assert!(store.is_mostly_colored("a.rs"));
    }

    #[test]
    fn color_labels_parse_and_print_round_trip() {
        for color in Color::ALL {
            assert_eq!(color.to_string().parse::<Color>().unwrap(), color);
        }
        assert!(matches!(
            "purple".parse::<Color>(),
            Err(Error::UnknownColor(_))
        ));
    }
}
