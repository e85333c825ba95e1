use thiserror::Error;

/// Result type used throughout this crate.
pub type Result<T, E = CharsetError> = std::result::Result<T, E>;

/// Errors raised while building a charset registry or matching against it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CharsetError {
    /// A charset definition is malformed.
    #[error("invalid charset definition `{abbreviation}`: {reason}")]
    InvalidDefinition {
        /// Abbreviation of the offending charset, as declared.
        abbreviation: String,
        /// What is wrong with it.
        reason: InvalidDefinitionReason,
    },

    /// Two charsets claim the same abbreviation.
    #[error("duplicate charset abbreviation `{0}`")]
    DuplicateAbbreviation(String),

    /// No charset is registered under the abbreviation.
    #[error("unknown charset `{0}`")]
    UnknownCharset(String),

    /// A coverage threshold outside `[0, 1]`.
    #[error("invalid coverage threshold {0} (expected a value in [0, 1])")]
    InvalidThreshold(f64),
}

/// Why a charset definition was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidDefinitionReason {
    /// The abbreviation is empty or whitespace.
    #[error("abbreviation is blank")]
    BlankAbbreviation,
    /// The definition yields no code points.
    #[error("no code points")]
    Empty,
    /// A code point above U+10FFFF.
    #[error("code point {0:#X} is outside the Unicode range")]
    OutOfRange(u32),
    /// A range whose lower bound exceeds its upper bound.
    #[error("range {lo:#06X}..={hi:#06X} is inverted")]
    InvertedRange {
        /// Lower bound as declared.
        lo: u32,
        /// Upper bound as declared.
        hi: u32,
    },
}
