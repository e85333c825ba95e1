#![deny(unsafe_code)]
#![deny(missing_docs, missing_debug_implementations)]
//! Named Unicode charsets and font coverage matching.
//!
//! A `Charset` is an immutable, named set of code points such as "Basic Cyrillic", keyed by a short
//! abbreviation (`CYRL`). Charsets are declared as ranges plus enumerated extra code points; overlaps
//! collapse into a single deduplicated set at construction.
//!
//! The `CharsetRegistry` owns the catalog. It is built once, keeps declaration order, and rejects
//! duplicate abbreviations. After that it is only read, so it can be shared freely between threads.
//!
//! The `CoverageMatcher` takes a query set, typically the code points a font maps, and computes for every
//! registered charset how much of that charset the query covers:
//!
//! ```text
//! coverage_ratio(C) = |Q ∩ C| / |C|
//! ```
//!
//! Charsets reaching a threshold (0.9 by default) are returned best first. Exact ties keep declaration
//! order. No qualifying charset is an empty result, not an error.
//!
//! # Example
//!
//! ```
//! use charset_coverage::{CharsetRegistry, CodePointSet, CoverageMatcher};
//!
//! let font: CodePointSet = (0x20u32..=0x7E).chain(0x400..=0x45F).collect();
//! let matcher = CoverageMatcher::new(CharsetRegistry::builtin());
//! let found: Vec<_> = matcher
//!     .find_matches(&font, 0.9)
//!     .unwrap()
//!     .iter()
//!     .map(|m| m.abbreviation())
//!     .collect();
//! assert_eq!(found, ["LATN", "CYRL"]);
//! ```
//!
//! # Features
//!
//! * `serde`: a serializable `RegistryDump` with range-compressed code points.

pub(crate) mod error;

pub(crate) mod code_point_set;

pub(crate) mod charset_ty;

pub(crate) mod charset_registry;

pub(crate) mod coverage;

pub mod charsets;

pub mod report;

#[cfg(feature = "serde")]
pub mod dump;

pub use error::{CharsetError, InvalidDefinitionReason, Result};

pub use code_point_set::{CodePointSet, CodePointSpec, GlyphSpec, MAX_CODE_POINT};

pub use charset_ty::Charset;

pub use charset_registry::CharsetRegistry;

pub use coverage::{
    coverage, CoverageMatcher, CoverageRatio, CoverageResult, CoverageSummary, MatchOptions,
    Missing, SupportLevel, Threshold,
};
