use crate::error::InvalidDefinitionReason;
use std::{collections::HashSet, fmt, iter::FromIterator, ops::RangeInclusive};

/// The largest Unicode scalar value a charset may contain.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// One piece of a charset's glyph declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePointSpec {
    /// An inclusive contiguous range `lo..=hi`.
    Range(u32, u32),
    /// A single enumerated code point.
    Single(u32),
}

/// The declaration shape of a charset: ranges and single points, in order.
///
/// Most charsets are one range plus a handful of extras, so this rarely spills.
pub type GlyphSpec = smallvec::SmallVec<[CodePointSpec; 8]>;

impl CodePointSpec {
    fn validate(self) -> Result<RangeInclusive<u32>, InvalidDefinitionReason> {
        let (lo, hi) = match self {
            CodePointSpec::Range(lo, hi) => (lo, hi),
            CodePointSpec::Single(cp) => (cp, cp),
        };
        if lo > hi {
            return Err(InvalidDefinitionReason::InvertedRange { lo, hi });
        }
        if hi > MAX_CODE_POINT {
            return Err(InvalidDefinitionReason::OutOfRange(hi));
        }
        Ok(lo..=hi)
    }
}

impl From<RangeInclusive<u32>> for CodePointSpec {
    fn from(range: RangeInclusive<u32>) -> Self {
        CodePointSpec::Range(*range.start(), *range.end())
    }
}

impl From<u32> for CodePointSpec {
    fn from(cp: u32) -> Self {
        CodePointSpec::Single(cp)
    }
}

impl From<char> for CodePointSpec {
    fn from(ch: char) -> Self {
        CodePointSpec::Single(ch as u32)
    }
}

/// A deduplicated set of code points.
///
/// Used both for the contents of a [`Charset`](crate::Charset) and for query
/// sets, such as the code points a font maps.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CodePointSet {
    points: HashSet<u32>,
}

impl CodePointSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        CodePointSet::default()
    }

    /// Expands a glyph declaration into a set. Overlapping and repeated
    /// entries collapse silently.
    pub fn from_specs(specs: &[CodePointSpec]) -> Result<Self, InvalidDefinitionReason> {
        let mut points = HashSet::new();
        for spec in specs.iter().copied() {
            points.extend(spec.validate()?);
        }
        Ok(CodePointSet { points })
    }

    /// Collects the `char`s of a string.
    pub fn from_str_chars(s: &str) -> Self {
        s.chars().collect()
    }

    /// Adds a code point, returning whether it was newly inserted.
    pub fn insert(&mut self, cp: u32) -> bool {
        self.points.insert(cp)
    }

    /// Tests membership.
    #[inline]
    pub fn contains(&self, cp: u32) -> bool {
        self.points.contains(&cp)
    }

    /// Number of distinct code points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set has no code points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Size of the intersection with `other`, walking the smaller side.
    pub fn intersection_len(&self, other: &CodePointSet) -> usize {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.points.iter().filter(|cp| large.contains(**cp)).count()
    }

    /// Whether every code point here is also in `other`.
    pub fn is_subset(&self, other: &CodePointSet) -> bool {
        self.points.is_subset(&other.points)
    }

    /// Code points in ascending order.
    pub fn to_sorted_vec(&self) -> Vec<u32> {
        let mut v: Vec<u32> = self.points.iter().copied().collect();
        v.sort_unstable();
        v
    }

    /// The set as maximal inclusive ranges in ascending order.
    pub fn ranges(&self) -> Vec<RangeInclusive<u32>> {
        compress_ranges(&self.to_sorted_vec())
    }
}

/// Folds a sorted, deduplicated slice into maximal inclusive ranges.
pub(crate) fn compress_ranges(sorted: &[u32]) -> Vec<RangeInclusive<u32>> {
    let mut ranges = Vec::new();
    let mut iter = sorted.iter().copied();
    let mut start = match iter.next() {
        Some(v) => v,
        None => return ranges,
    };
    let mut end = start;
    for cp in iter {
        if end.checked_add(1) == Some(cp) {
            end = cp;
        } else {
            ranges.push(start..=end);
            start = cp;
            end = cp;
        }
    }
    ranges.push(start..=end);
    ranges
}

impl FromIterator<u32> for CodePointSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        CodePointSet {
            points: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<char> for CodePointSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        iter.into_iter().map(|ch| ch as u32).collect()
    }
}

impl Extend<u32> for CodePointSet {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        self.points.extend(iter)
    }
}

impl fmt::Debug for CodePointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CodePointSet(")?;
        f.debug_list()
            .entries(self.ranges().into_iter().map(RangeDebug))
            .finish()?;
        write!(f, ")")?;
        Ok(())
    }
}

struct RangeDebug(RangeInclusive<u32>);

impl fmt::Debug for RangeDebug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lo, hi) = (*self.0.start(), *self.0.end());
        if lo == hi {
            write!(f, "U+{:04X}", lo)
        } else {
            write!(f, "U+{:04X}..=U+{:04X}", lo, hi)
        }
    }
}
