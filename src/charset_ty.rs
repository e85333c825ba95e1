use crate::code_point_set::{CodePointSet, CodePointSpec};
use crate::error::{CharsetError, InvalidDefinitionReason, Result};
use std::{fmt, ops::RangeInclusive};

/// A named, immutable set of Unicode code points, such as "Basic Cyrillic".
#[derive(Clone, PartialEq, Eq)]
pub struct Charset {
    common_name: String,
    native_name: String,
    abbreviation: String,
    points: CodePointSet,
    sorted: Box<[u32]>,
}

impl Charset {
    /// Builds a charset from a glyph declaration of ranges and single points.
    ///
    /// Overlaps between declaration entries are allowed. Fails if the
    /// abbreviation is blank, if a value lies above U+10FFFF, or if nothing
    /// is declared.
    pub fn new(
        common_name: impl Into<String>,
        native_name: impl Into<String>,
        abbreviation: impl Into<String>,
        glyphs: &[CodePointSpec],
    ) -> Result<Self> {
        let abbreviation = abbreviation.into();
        let invalid = |reason| CharsetError::InvalidDefinition {
            abbreviation: abbreviation.clone(),
            reason,
        };
        if abbreviation.trim().is_empty() {
            return Err(invalid(InvalidDefinitionReason::BlankAbbreviation));
        }
        let points = CodePointSet::from_specs(glyphs).map_err(invalid)?;
        if points.is_empty() {
            return Err(invalid(InvalidDefinitionReason::Empty));
        }
        let sorted = points.to_sorted_vec().into_boxed_slice();
        Ok(Charset {
            common_name: common_name.into(),
            native_name: native_name.into(),
            abbreviation,
            points,
            sorted,
        })
    }

    /// Builds a charset from one contiguous range followed by extra points,
    /// the shape most charset declarations take.
    pub fn from_ranges(
        common_name: impl Into<String>,
        native_name: impl Into<String>,
        abbreviation: impl Into<String>,
        range: RangeInclusive<u32>,
        extras: &[u32],
    ) -> Result<Self> {
        let glyphs: crate::GlyphSpec = std::iter::once(CodePointSpec::from(range))
            .chain(extras.iter().copied().map(CodePointSpec::Single))
            .collect();
        Charset::new(common_name, native_name, abbreviation, &glyphs)
    }

    /// Display name, e.g. "Basic Cyrillic".
    pub fn common_name(&self) -> &str {
        &self.common_name
    }

    /// Display name in the charset's own script. Never used for matching.
    pub fn native_name(&self) -> &str {
        &self.native_name
    }

    /// Unique short key, e.g. "CYRL".
    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    /// Tests membership of a code point.
    #[inline]
    pub fn contains(&self, cp: u32) -> bool {
        self.points.contains(cp)
    }

    /// Number of distinct code points. Always at least one.
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Always `false`; construction rejects empty charsets.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Code points in ascending order.
    pub fn code_points(&self) -> &[u32] {
        &self.sorted
    }

    /// Code points as maximal inclusive ranges in ascending order.
    pub fn ranges(&self) -> Vec<RangeInclusive<u32>> {
        crate::code_point_set::compress_ranges(&self.sorted)
    }

    pub(crate) fn points(&self) -> &CodePointSet {
        &self.points
    }
}

impl fmt::Debug for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Charset")
            .field("abbreviation", &self.abbreviation)
            .field("common_name", &self.common_name)
            .field("native_name", &self.native_name)
            .field("len", &self.len())
            .finish()
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.common_name, self.abbreviation)
    }
}

#[cfg(test)]
mod tests {
    use super::Charset;
    use crate::code_point_set::CodePointSpec;
    use crate::error::{CharsetError, InvalidDefinitionReason};

    #[test]
    fn test_from_ranges_dedups_extras() {
        let charset =
            Charset::from_ranges("Test", "Test", "TST", 0x41..=0x5A, &[0x41, 0x5A, 0x61]).unwrap();
        assert_eq!(27, charset.len());
        assert!(charset.contains(0x61));
        assert!(!charset.contains(0x62));
        assert_eq!(vec![0x41..=0x5A, 0x61..=0x61], charset.ranges());
        assert_eq!(Some(&0x61), charset.code_points().last());
    }

    #[test]
    fn test_blank_abbreviation() {
        assert_eq!(
            Err(CharsetError::InvalidDefinition {
                abbreviation: " \t".to_owned(),
                reason: InvalidDefinitionReason::BlankAbbreviation,
            }),
            Charset::from_ranges("Test", "Test", " \t", 0x41..=0x5A, &[])
        );
    }

    #[test]
    fn test_empty_definition() {
        assert_eq!(
            Err(CharsetError::InvalidDefinition {
                abbreviation: "NONE".to_owned(),
                reason: InvalidDefinitionReason::Empty,
            }),
            Charset::new("Nothing", "Nothing", "NONE", &[])
        );
    }

    #[test]
    fn test_out_of_range_definition() {
        let err = Charset::new(
            "Beyond",
            "Beyond",
            "BYND",
            &[CodePointSpec::Single(0x41), CodePointSpec::Single(0x110000)],
        )
        .unwrap_err();
        assert_eq!(
            "invalid charset definition `BYND`: code point 0x110000 is outside the Unicode range",
            err.to_string()
        );
    }

    #[test]
    fn test_display() {
        let charset = Charset::from_ranges("Test", "Тест", "TST", 0x41..=0x41, &[]).unwrap();
        assert_eq!("Test (TST)", charset.to_string());
    }
}
