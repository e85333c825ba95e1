//! Coverage of charsets by a query set of code points.
//!
//! The ratio is always taken relative to the charset: it answers "how much
//! of this script does the font support", so a font with tens of thousands of
//! code points still scores 1.0 on every charset it fully contains.

use crate::charset_registry::CharsetRegistry;
use crate::charset_ty::Charset;
use crate::code_point_set::CodePointSet;
use crate::error::{CharsetError, Result};
use std::{cmp::Ordering, fmt, slice};

/// A coverage threshold in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    /// 90% of a charset's code points must be present.
    pub const DEFAULT: Threshold = Threshold(0.9);

    /// Every charset qualifies, however little is matched.
    pub const ANY: Threshold = Threshold(0.0);

    /// Only complete coverage qualifies.
    pub const FULL: Threshold = Threshold(1.0);

    /// Validates a threshold. NaN and values outside `[0, 1]` are rejected.
    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Threshold(value))
        } else {
            Err(CharsetError::InvalidThreshold(value))
        }
    }

    /// The threshold as a fraction.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold::DEFAULT
    }
}

impl TryFrom<f64> for Threshold {
    type Error = CharsetError;

    fn try_from(value: f64) -> Result<Self> {
        Threshold::new(value)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Exact ratio `matched / total` of a charset's code points present in a query.
///
/// Ordering and equality are by rational value, so `19/20` equals `38/40`.
#[derive(Debug, Clone, Copy)]
pub struct CoverageRatio {
    matched: usize,
    total: usize,
}

impl CoverageRatio {
    pub(crate) fn new(matched: usize, total: usize) -> Self {
        debug_assert!(matched <= total);
        CoverageRatio { matched, total }
    }

    /// Numerator.
    pub const fn matched(self) -> usize {
        self.matched
    }

    /// Denominator, the charset size.
    pub const fn total(self) -> usize {
        self.total
    }

    /// The ratio as a float in `[0, 1]`.
    pub fn as_f64(self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.matched as f64 / self.total as f64
    }

    /// The ratio as a percentage.
    pub fn percent(self) -> f64 {
        self.as_f64() * 100.0
    }

    /// Whether every code point is matched.
    pub fn is_full(self) -> bool {
        self.matched == self.total
    }

    /// Whether this ratio reaches `threshold`.
    pub fn meets(self, threshold: Threshold) -> bool {
        self.as_f64() >= threshold.get()
    }
}

impl PartialEq for CoverageRatio {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CoverageRatio {}

impl PartialOrd for CoverageRatio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CoverageRatio {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.matched as u128 * other.total as u128;
        let rhs = other.matched as u128 * self.total as u128;
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for CoverageRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.matched, self.total)
    }
}

/// How well a query supports a charset, relative to a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportLevel {
    /// Every code point is present.
    Full,
    /// The threshold is reached, but some code points are missing.
    Covered,
    /// Some code points are present, fewer than the threshold asks for.
    Partial,
    /// No code point is present.
    Absent,
}

impl SupportLevel {
    /// A lowercase label for reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            SupportLevel::Full => "full",
            SupportLevel::Covered => "covered",
            SupportLevel::Partial => "partial",
            SupportLevel::Absent => "absent",
        }
    }
}

impl fmt::Display for SupportLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The coverage of one charset by a query set.
#[derive(Clone, Copy, PartialEq)]
pub struct CoverageResult<'r> {
    charset: &'r Charset,
    ratio: CoverageRatio,
}

impl<'r> CoverageResult<'r> {
    /// The charset this result describes.
    pub fn charset(&self) -> &'r Charset {
        self.charset
    }

    /// Shorthand for `charset().abbreviation()`.
    pub fn abbreviation(&self) -> &'r str {
        self.charset.abbreviation()
    }

    /// Shorthand for `charset().common_name()`.
    pub fn common_name(&self) -> &'r str {
        self.charset.common_name()
    }

    /// Number of query code points that belong to the charset.
    pub fn matched_count(&self) -> usize {
        self.ratio.matched()
    }

    /// `matched_count / charset.len()` as a float.
    pub fn coverage_ratio(&self) -> f64 {
        self.ratio.as_f64()
    }

    /// The exact ratio.
    pub fn ratio(&self) -> CoverageRatio {
        self.ratio
    }

    /// Classifies the result against `threshold`.
    pub fn support_level(&self, threshold: Threshold) -> SupportLevel {
        if self.ratio.is_full() {
            SupportLevel::Full
        } else if self.ratio.meets(threshold) && self.ratio.matched() > 0 {
            SupportLevel::Covered
        } else if self.ratio.matched() > 0 {
            SupportLevel::Partial
        } else {
            SupportLevel::Absent
        }
    }

    /// The charset's code points absent from `query`, in ascending order.
    ///
    /// `query` should be the set this result was computed from.
    pub fn missing<'a>(&'a self, query: &'a CodePointSet) -> Missing<'a> {
        Missing {
            points: self.charset.code_points().iter(),
            query,
        }
    }

    /// An owned copy of the reported fields.
    pub fn to_summary(&self) -> CoverageSummary {
        CoverageSummary {
            abbreviation: self.abbreviation().to_owned(),
            common_name: self.common_name().to_owned(),
            coverage_ratio: self.coverage_ratio(),
            matched_count: self.matched_count(),
        }
    }
}

impl fmt::Debug for CoverageResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverageResult")
            .field("abbreviation", &self.abbreviation())
            .field("ratio", &format_args!("{}", self.ratio))
            .finish()
    }
}

/// Owned, reportable form of a [`CoverageResult`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageSummary {
    /// Charset abbreviation.
    pub abbreviation: String,
    /// Charset common name.
    pub common_name: String,
    /// Fraction of the charset covered.
    pub coverage_ratio: f64,
    /// Number of the charset's code points present in the query.
    pub matched_count: usize,
}

/// Iterator over a charset's code points missing from a query.
#[derive(Debug, Clone)]
pub struct Missing<'a> {
    points: slice::Iter<'a, u32>,
    query: &'a CodePointSet,
}

impl Iterator for Missing<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let query = self.query;
        self.points.by_ref().copied().find(|&cp| !query.contains(cp))
    }
}

/// Computes the coverage of a single charset, without any threshold.
pub fn coverage<'r>(charset: &'r Charset, query: &CodePointSet) -> CoverageResult<'r> {
    let matched = query.intersection_len(charset.points());
    CoverageResult {
        charset,
        ratio: CoverageRatio::new(matched, charset.len()),
    }
}

/// Options for [`CoverageMatcher`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatchOptions {
    /// Minimum coverage for a charset to be reported.
    pub threshold: Threshold,
}

impl MatchOptions {
    /// Options with the given threshold.
    pub fn with_threshold(threshold: Threshold) -> Self {
        MatchOptions { threshold }
    }
}

/// Ranks the charsets of a registry by how well a query set covers them.
///
/// The matcher holds nothing but a shared reference to the registry and its
/// options; every query is a pure function of its inputs.
#[derive(Debug, Clone, Copy)]
pub struct CoverageMatcher<'r> {
    registry: &'r CharsetRegistry,
    options: MatchOptions,
}

impl<'r> CoverageMatcher<'r> {
    /// A matcher using the default threshold.
    pub fn new(registry: &'r CharsetRegistry) -> Self {
        CoverageMatcher::with_options(registry, MatchOptions::default())
    }

    /// A matcher with explicit options.
    pub fn with_options(registry: &'r CharsetRegistry, options: MatchOptions) -> Self {
        CoverageMatcher { registry, options }
    }

    /// The registry being matched against.
    pub fn registry(&self) -> &'r CharsetRegistry {
        self.registry
    }

    /// The configured options.
    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Coverage of every registered charset, in declaration order.
    pub fn coverage_all(&self, query: &CodePointSet) -> Vec<CoverageResult<'r>> {
        self.registry
            .iter()
            .map(|charset| {
                let result = coverage(charset, query);
                log::trace!(
                    "{}: {} ({:.4})",
                    charset.abbreviation(),
                    result.ratio,
                    result.coverage_ratio()
                );
                result
            })
            .collect()
    }

    /// Charsets covered to at least `threshold`, best first.
    ///
    /// Fails only if `threshold` lies outside `[0, 1]`. No qualifying
    /// charset yields an empty vector.
    pub fn find_matches(
        &self,
        query: &CodePointSet,
        threshold: f64,
    ) -> Result<Vec<CoverageResult<'r>>> {
        let threshold = Threshold::new(threshold)?;
        Ok(self.find_matches_with(query, threshold))
    }

    /// Like [`find_matches`](Self::find_matches) with an already validated
    /// threshold.
    pub fn find_matches_with(
        &self,
        query: &CodePointSet,
        threshold: Threshold,
    ) -> Vec<CoverageResult<'r>> {
        let mut results = self.coverage_all(query);
        results.retain(|result| result.ratio.meets(threshold));
        // Stable, so equal ratios keep declaration order.
        results.sort_by(|a, b| b.ratio.cmp(&a.ratio));
        log::debug!(
            "{} of {} charsets reach {} for a query of {} code points",
            results.len(),
            self.registry.len(),
            threshold,
            query.len()
        );
        results
    }

    /// Matches using the configured threshold.
    pub fn matches(&self, query: &CodePointSet) -> Vec<CoverageResult<'r>> {
        self.find_matches_with(query, self.options.threshold)
    }

    /// The best charset reaching the configured threshold, if any.
    pub fn best_match(&self, query: &CodePointSet) -> Option<CoverageResult<'r>> {
        self.matches(query).into_iter().next()
    }

    /// Classifies every registered charset against the configured threshold,
    /// in declaration order.
    pub fn support_levels(&self, query: &CodePointSet) -> Vec<(&'r Charset, SupportLevel)> {
        self.coverage_all(query)
            .into_iter()
            .map(|result| (result.charset(), result.support_level(self.options.threshold)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{coverage, CoverageMatcher, CoverageRatio, MatchOptions, SupportLevel, Threshold};
    use crate::charset_registry::CharsetRegistry;
    use crate::charset_ty::Charset;
    use crate::code_point_set::CodePointSet;
    use crate::error::CharsetError;
    use proptest::prelude::*;

    const CYRL_EXTRAS: [u32; 5] = [0x0490, 0x0491, 0x20B4, 0x20BD, 0x2116];

    fn cyrillic_registry() -> CharsetRegistry {
        CharsetRegistry::from_charsets(vec![Charset::from_ranges(
            "Basic Cyrillic",
            "Кири́ллица",
            "CYRL",
            0x0400..=0x045F,
            &CYRL_EXTRAS,
        )
        .unwrap()])
        .unwrap()
    }

    fn abbreviations(results: &[super::CoverageResult<'_>]) -> Vec<String> {
        results.iter().map(|r| r.abbreviation().to_owned()).collect()
    }

    #[test]
    fn test_threshold_validation() {
        assert_eq!(0.9, Threshold::default().get());
        assert!(Threshold::new(0.0).is_ok());
        assert!(Threshold::new(1.0).is_ok());
        assert_eq!(
            Err(CharsetError::InvalidThreshold(1.5)),
            Threshold::new(1.5)
        );
        assert_eq!(
            Err(CharsetError::InvalidThreshold(-0.1)),
            Threshold::new(-0.1)
        );
        assert!(Threshold::new(f64::NAN).is_err());
    }

    #[test]
    fn test_ratio_ordering_is_exact() {
        assert_eq!(CoverageRatio::new(19, 20), CoverageRatio::new(38, 40));
        assert!(CoverageRatio::new(2, 3) > CoverageRatio::new(666, 1000));
        assert!(CoverageRatio::new(0, 5) < CoverageRatio::new(1, 1000));
        assert_eq!("19/20", CoverageRatio::new(19, 20).to_string());
    }

    #[test]
    fn test_cyrillic_without_extras() {
        let registry = cyrillic_registry();
        let matcher = CoverageMatcher::new(&registry);
        let query: CodePointSet = (0x0400u32..=0x045F).collect();

        let results = matcher.find_matches(&query, 0.9).unwrap();
        assert_eq!(vec!["CYRL"], abbreviations(&results));
        assert_eq!(96, results[0].matched_count());
        assert!((results[0].coverage_ratio() - 96.0 / 101.0).abs() < 1e-9);
        assert_eq!(
            CYRL_EXTRAS.to_vec(),
            results[0].missing(&query).collect::<Vec<_>>()
        );

        assert!(matcher.find_matches(&query, 0.96).unwrap().is_empty());
    }

    #[test]
    fn test_empty_query() {
        let registry = cyrillic_registry();
        let matcher = CoverageMatcher::new(&registry);
        let query = CodePointSet::new();

        let results = matcher.find_matches(&query, 0.0).unwrap();
        assert_eq!(1, results.len());
        assert_eq!(0, results[0].matched_count());
        assert_eq!(0.0, results[0].coverage_ratio());

        assert!(matcher.find_matches(&query, 0.01).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_threshold_is_an_error() {
        let registry = cyrillic_registry();
        let matcher = CoverageMatcher::new(&registry);
        assert_eq!(
            Err(CharsetError::InvalidThreshold(1.01)),
            matcher.find_matches(&CodePointSet::new(), 1.01)
        );
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let registry = CharsetRegistry::from_charsets(vec![
            Charset::from_ranges("Zeta", "Zeta", "ZZZ", 0x1000..=0x1013, &[]).unwrap(),
            Charset::from_ranges("Alpha", "Alpha", "AAA", 0x2000..=0x2027, &[]).unwrap(),
            Charset::from_ranges("Full", "Full", "FUL", 0x3000..=0x3001, &[]).unwrap(),
            Charset::from_ranges("Low", "Low", "LOW", 0x4000..=0x4009, &[]).unwrap(),
        ])
        .unwrap();
        // 19 of 20 and 38 of 40 are both exactly 0.95.
        let query: CodePointSet = (0x1000u32..=0x1012)
            .chain(0x2000..=0x2025)
            .chain(0x3000..=0x3001)
            .chain(0x4000..=0x4004)
            .collect();
        let matcher = CoverageMatcher::new(&registry);

        let results = matcher.find_matches(&query, 0.95).unwrap();
        assert_eq!(vec!["FUL", "ZZZ", "AAA"], abbreviations(&results));
        assert_eq!(0.95, results[1].coverage_ratio());
        assert_eq!(0.95, results[2].coverage_ratio());

        let everything = matcher.find_matches(&query, 0.0).unwrap();
        assert_eq!(vec!["FUL", "ZZZ", "AAA", "LOW"], abbreviations(&everything));
        assert_eq!(everything, matcher.find_matches(&query, 0.0).unwrap());
    }

    #[test]
    fn test_zero_threshold_orders_equal_ratios_by_declaration() {
        let registry = CharsetRegistry::from_charsets(vec![
            Charset::from_ranges("B", "B", "B", 0x42..=0x42, &[]).unwrap(),
            Charset::from_ranges("A", "A", "A", 0x41..=0x41, &[]).unwrap(),
        ])
        .unwrap();
        let options = MatchOptions::with_threshold(Threshold::ANY);
        let matcher = CoverageMatcher::with_options(&registry, options);
        assert_eq!(
            vec!["B", "A"],
            abbreviations(&matcher.matches(&CodePointSet::new()))
        );
    }

    #[test]
    fn test_support_levels() {
        let registry = CharsetRegistry::from_charsets(vec![
            Charset::from_ranges("Full", "Full", "FUL", 0x41..=0x44, &[]).unwrap(),
            Charset::from_ranges("Covered", "Covered", "COV", 0x100..=0x109, &[]).unwrap(),
            Charset::from_ranges("Partial", "Partial", "PAR", 0x200..=0x209, &[]).unwrap(),
            Charset::from_ranges("Absent", "Absent", "ABS", 0x300..=0x309, &[]).unwrap(),
        ])
        .unwrap();
        let query: CodePointSet = (0x41u32..=0x44)
            .chain(0x100..=0x108)
            .chain(0x200..=0x202)
            .collect();
        let matcher = CoverageMatcher::new(&registry);
        let levels: Vec<_> = matcher
            .support_levels(&query)
            .into_iter()
            .map(|(charset, level)| (charset.abbreviation(), level))
            .collect();
        assert_eq!(
            vec![
                ("FUL", SupportLevel::Full),
                ("COV", SupportLevel::Covered),
                ("PAR", SupportLevel::Partial),
                ("ABS", SupportLevel::Absent),
            ],
            levels
        );
        assert_eq!(Some("FUL"), matcher.best_match(&query).map(|r| r.abbreviation()));
        let partial = coverage(registry.get("PAR").unwrap(), &query);
        assert_eq!(
            SupportLevel::Covered,
            partial.support_level(Threshold::new(0.3).unwrap())
        );
    }

    #[test]
    fn test_query_larger_than_charset() {
        let registry = cyrillic_registry();
        let query: CodePointSet = (0u32..0x3000).collect();
        let result = coverage(registry.get("CYRL").unwrap(), &query);
        assert_eq!(101, result.matched_count());
        assert_eq!(1.0, result.coverage_ratio());
        assert_eq!(0, result.missing(&query).count());
    }

    fn small_registry() -> CharsetRegistry {
        CharsetRegistry::from_charsets(vec![
            Charset::from_ranges("One", "One", "ONE", 0x00..=0x3F, &[0x100]).unwrap(),
            Charset::from_ranges("Two", "Two", "TWO", 0x20..=0x5F, &[]).unwrap(),
            Charset::from_ranges("Three", "Three", "TRI", 0x80..=0xBF, &[0x10, 0x20]).unwrap(),
        ])
        .unwrap()
    }

    proptest! {
        #[test]
        fn prop_ratio_is_intersection_over_charset(points in prop::collection::vec(0u32..0x120, 0..200)) {
            let registry = small_registry();
            let query: CodePointSet = points.iter().copied().collect();
            for result in CoverageMatcher::new(&registry).coverage_all(&query) {
                let charset = result.charset();
                let expected = charset.code_points().iter().filter(|cp| query.contains(**cp)).count();
                prop_assert_eq!(expected, result.matched_count());
                let ratio = expected as f64 / charset.len() as f64;
                prop_assert!((ratio - result.coverage_ratio()).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_subset_query_never_covers_more(
            points in prop::collection::vec(0u32..0x120, 0..200),
            extra in prop::collection::vec(0u32..0x120, 0..100),
        ) {
            let registry = small_registry();
            let matcher = CoverageMatcher::new(&registry);
            let small: CodePointSet = points.iter().copied().collect();
            let large: CodePointSet = points.iter().chain(extra.iter()).copied().collect();
            prop_assert!(small.is_subset(&large));
            for (a, b) in matcher.coverage_all(&small).iter().zip(matcher.coverage_all(&large).iter()) {
                prop_assert!(a.ratio() <= b.ratio());
            }
        }

        #[test]
        fn prop_matching_is_idempotent(
            points in prop::collection::vec(0u32..0x120, 0..200),
            threshold in 0.0f64..=1.0,
        ) {
            let registry = small_registry();
            let matcher = CoverageMatcher::new(&registry);
            let query: CodePointSet = points.iter().copied().collect();
            let first = matcher.find_matches(&query, threshold).unwrap();
            let second = matcher.find_matches(&query, threshold).unwrap();
            prop_assert_eq!(abbreviations(&first), abbreviations(&second));
            for window in first.windows(2) {
                prop_assert!(window[0].ratio() >= window[1].ratio());
            }
        }
    }
}
