//! Plain-text coverage reports.

use crate::coverage::{CoverageResult, Threshold};
use std::fmt::{self, Write};
use unicode_segmentation::UnicodeSegmentation;

/// Display width of `s` in user-perceived characters.
fn grapheme_width(s: &str) -> usize {
    s.graphemes(true).count()
}

fn pad(out: &mut impl Write, s: &str, width: usize) -> fmt::Result {
    out.write_str(s)?;
    for _ in grapheme_width(s)..width {
        out.write_char(' ')?;
    }
    Ok(())
}

/// Writes one line per result: abbreviation, common name, native name,
/// matched/total, percentage and support level.
///
/// Columns are padded by grapheme cluster, so native names with combining
/// marks stay aligned.
pub fn write_report(
    out: &mut impl Write,
    results: &[CoverageResult<'_>],
    threshold: Threshold,
) -> fmt::Result {
    let abbreviation_width = results
        .iter()
        .map(|r| grapheme_width(r.abbreviation()))
        .max()
        .unwrap_or(0);
    let common_width = results
        .iter()
        .map(|r| grapheme_width(r.common_name()))
        .max()
        .unwrap_or(0);
    let native_width = results
        .iter()
        .map(|r| grapheme_width(r.charset().native_name()))
        .max()
        .unwrap_or(0);

    for result in results {
        pad(out, result.abbreviation(), abbreviation_width)?;
        out.write_str("  ")?;
        pad(out, result.common_name(), common_width)?;
        out.write_str("  ")?;
        pad(out, result.charset().native_name(), native_width)?;
        writeln!(
            out,
            "  {:>11}  {:>6.2}%  {}",
            result.ratio().to_string(),
            result.ratio().percent(),
            result.support_level(threshold)
        )?;
    }
    Ok(())
}

/// [`write_report`] into a new `String`.
pub fn report_string(results: &[CoverageResult<'_>], threshold: Threshold) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, results, threshold);
    out
}
