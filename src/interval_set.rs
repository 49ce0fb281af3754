use serde::{Deserialize, Serialize};

use crate::{Error, LineRange};

/// Directives for keeping a visual overlay in sync with one mutation.
///
/// `deletions` are the exact ranges that were stored before the call and no
/// longer are; `additions` are the exact ranges stored now that were not
/// before. One deliberate exception: adding a range wholly subsumed by an
/// existing one reports that existing range in both lists. Consumers match
/// decorations by literal bounds, so this is not a set difference over line
/// numbers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Instructions {
    pub deletions: Vec<LineRange>,
    pub additions: Vec<LineRange>,
}

impl Instructions {
    pub fn is_empty(&self) -> bool {
        self.deletions.is_empty() && self.additions.is_empty()
    }
}

/// The marked ranges of one (file, color) pair.
///
/// Kept sorted, disjoint and non-adjacent: adding merges touching ranges, so
/// `[1, 5]` and `[6, 9]` never coexist. Deleting only widens gaps and can
/// therefore never reintroduce adjacency.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<LineRange>", try_from = "Vec<LineRange>")]
pub struct IntervalSet(Vec<LineRange>);

impl IntervalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[LineRange] {
        &self.0
    }

    /// Total number of lines covered by the set.
    pub fn covered_lines(&self) -> u32 {
        self.0.iter().map(LineRange::lines).sum()
    }

    /// Inserts `range`, merging it with every stored range it overlaps or
    /// touches, transitively.
    pub fn add(&mut self, range: LineRange) -> Instructions {
        let before = self.0.clone();
        self.0.push(range);
        self.0.sort_by_key(|r| r.lo());
        self.merge_after_adding(&before, range)
    }

    fn merge_after_adding(&mut self, before: &[LineRange], added: LineRange) -> Instructions {
        let mut instructions = Instructions::default();
        let mut has_merged = false;

        let mut i = 0;
        while i + 1 < self.0.len() {
            let mut chained = false;
            while i + 1 < self.0.len() && self.0[i].hi() + 1 >= self.0[i + 1].lo() {
                let (curr, next) = (self.0[i], self.0[i + 1]);
                let merged = LineRange::span(curr.lo(), curr.hi().max(next.hi()));
                if chained {
                    // The previous union was only an intermediate step of
                    // this chain.
                    instructions.additions.pop();
                }
                instructions.additions.push(merged);
                instructions.deletions.push(curr);
                instructions.deletions.push(next);
                self.0.splice(i..i + 2, [merged]);
                has_merged = true;
                chained = true;
            }
            i += 1;
        }

        // Operands produced mid-chain did not exist before this call and must
        // not be reported as removed.
        instructions.deletions.retain(|d| before.contains(d));

        if !has_merged {
            instructions.additions.push(added);
        }

        instructions
    }

    /// Removes every line of `range` from the set, trimming or splitting the
    /// stored ranges it intersects.
    pub fn delete(&mut self, range: LineRange) -> Instructions {
        let mut instructions = Instructions::default();
        let (delete_lo, delete_hi) = (range.lo(), range.hi());

        let mut i = 0;
        while i < self.0.len() {
            let curr = self.0[i];

            // Stored ranges are sorted, so once the deletion ends before the
            // current range nothing further right can intersect it.
            if delete_hi < curr.lo() {
                break;
            }
            if delete_lo > curr.hi() {
                i += 1;
                continue;
            }

            // The deletion swallows the whole range: xxx<xxx>xxx
            // A single call may consume several consecutive ranges this way.
            if delete_lo <= curr.lo() && delete_hi >= curr.hi() {
                instructions.deletions.push(self.0.remove(i));
                continue;
            }

            // The deletion cuts off the tail: <  xx>xxx
            if delete_lo > curr.lo() && delete_hi >= curr.hi() {
                let kept = LineRange::span(curr.lo(), delete_lo - 1);
                instructions.additions.push(kept);
                instructions.deletions.push(curr);
                self.0[i] = kept;
                i += 1;
                continue;
            }

            // The deletion cuts off the head: xxx<xx  >
            // It ends inside this range, so nothing further right intersects.
            if delete_lo <= curr.lo() {
                let kept = LineRange::span(delete_hi + 1, curr.hi());
                instructions.additions.push(kept);
                instructions.deletions.push(curr);
                self.0[i] = kept;
                break;
            }

            // The deletion falls strictly inside this one range: <  xxx  >
            // The trims above already caught deletions lining up with either
            // edge, so both remainders are non-degenerate.
            let left = LineRange::span(curr.lo(), delete_lo - 1);
            let right = LineRange::span(delete_hi + 1, curr.hi());
            instructions.deletions.push(curr);
            instructions.additions.push(left);
            instructions.additions.push(right);
            self.0.splice(i..i + 1, [left, right]);
            break;
        }

        instructions
    }
}

impl From<IntervalSet> for Vec<LineRange> {
    fn from(set: IntervalSet) -> Self {
        set.0
    }
}

impl TryFrom<Vec<LineRange>> for IntervalSet {
    type Error = Error;

    fn try_from(ranges: Vec<LineRange>) -> Result<Self, Error> {
        if ranges.windows(2).all(|w| w[0].hi() + 1 < w[1].lo()) {
            Ok(Self(ranges))
        } else {
            Err(Error::NotCanonical)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn r(lo: u32, hi: u32) -> LineRange {
        LineRange::new(lo, hi).unwrap()
    }

    fn set(ranges: &[LineRange]) -> IntervalSet {
        IntervalSet::try_from(ranges.to_vec()).unwrap()
    }

    #[test]
    fn chain_merge_reports_only_the_final_union() {
        let mut s = set(&[r(1, 10), r(20, 30), r(40, 50)]);

        let instructions = s.add(r(5, 45));

        assert_eq!(s.as_slice(), &[r(1, 50)]);
        assert_eq!(instructions.deletions, vec![r(1, 10), r(20, 30), r(40, 50)]);
        assert_eq!(instructions.additions, vec![r(1, 50)]);
    }

    #[test]
    fn intermediate_merge_products_are_not_reported_as_deleted() {
        let mut s = set(&[r(1, 10), r(20, 30)]);

        let instructions = s.add(r(11, 19));

        // [1, 19] exists transiently while the chain collapses but was never
        // stored before the call.
        assert!(!instructions.deletions.contains(&r(1, 19)));
        assert_eq!(instructions.deletions, vec![r(1, 10), r(20, 30)]);
    }

    #[test]
    fn delete_matching_the_low_edge_trims_instead_of_splitting() {
        let mut s = set(&[r(10, 20)]);

        let instructions = s.delete(r(10, 14));

        assert_eq!(s.as_slice(), &[r(15, 20)]);
        assert_eq!(instructions.deletions, vec![r(10, 20)]);
        assert_eq!(instructions.additions, vec![r(15, 20)]);
    }

    #[test]
    fn delete_matching_the_high_edge_trims_instead_of_splitting() {
        let mut s = set(&[r(10, 20)]);

        let instructions = s.delete(r(16, 20));

        assert_eq!(s.as_slice(), &[r(10, 15)]);
        assert_eq!(instructions.deletions, vec![r(10, 20)]);
        assert_eq!(instructions.additions, vec![r(10, 15)]);
    }

    #[test]
    fn delete_spanning_several_ranges_consumes_and_trims_in_one_call() {
        let mut s = set(&[r(1, 5), r(10, 15), r(20, 25), r(30, 40)]);

        let instructions = s.delete(r(3, 35));

        assert_eq!(s.as_slice(), &[r(1, 2), r(36, 40)]);
        assert_eq!(
            instructions.deletions,
            vec![r(1, 5), r(10, 15), r(20, 25), r(30, 40)]
        );
        assert_eq!(instructions.additions, vec![r(1, 2), r(36, 40)]);
    }

    #[test]
    fn rejects_overlapping_or_adjacent_stored_ranges() {
        assert!(IntervalSet::try_from(vec![r(1, 5), r(6, 9)]).is_err());
        assert!(IntervalSet::try_from(vec![r(1, 5), r(4, 9)]).is_err());
        assert!(IntervalSet::try_from(vec![r(6, 9), r(1, 4)]).is_err());
        assert!(IntervalSet::try_from(vec![r(1, 5), r(7, 9)]).is_ok());
    }
}
