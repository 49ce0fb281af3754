use serde::{Deserialize, Serialize};

use crate::Error;

/// A closed interval of 1-indexed line numbers, both ends included.
///
/// `[1, 10]` and `[11, 20]` touch without overlapping; `[1, 10]` and
/// `[10, 20]` share line 10. Ranges are immutable values; operations on the
/// store hand out new ranges rather than adjusting existing ones.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "[u32; 2]", try_from = "[u32; 2]")]
pub struct LineRange {
    lo: u32,
    hi: u32,
}

impl LineRange {
    /// Constructs a range, rejecting 0-indexed or inverted bounds.
    pub fn new(lo: u32, hi: u32) -> Result<Self, Error> {
        if lo == 0 || lo > hi {
            Err(Error::InvalidRange { lo, hi })
        } else {
            Ok(Self { lo, hi })
        }
    }

    // For ranges derived from bounds of already validated ones.
    pub(crate) fn span(lo: u32, hi: u32) -> Self {
        debug_assert!(lo >= 1 && lo <= hi);
        Self { lo, hi }
    }

    pub fn lo(&self) -> u32 {
        self.lo
    }

    pub fn hi(&self) -> u32 {
        self.hi
    }

    /// Number of lines covered.
    pub fn lines(&self) -> u32 {
        self.hi - self.lo + 1
    }
}

impl std::fmt::Debug for LineRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

impl From<LineRange> for [u32; 2] {
    fn from(range: LineRange) -> Self {
        [range.lo, range.hi]
    }
}

impl TryFrom<[u32; 2]> for LineRange {
    type Error = Error;

    fn try_from([lo, hi]: [u32; 2]) -> Result<Self, Error> {
        Self::new(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_bounds() {
        assert!(LineRange::new(0, 4).is_err());
        assert!(LineRange::new(5, 4).is_err());
        assert!(LineRange::new(4, 4).is_ok());
    }

    #[test]
    fn counts_both_ends() {
        assert_eq!(LineRange::new(3, 3).unwrap().lines(), 1);
        assert_eq!(LineRange::new(1, 10).unwrap().lines(), 10);
    }
}
