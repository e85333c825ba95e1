//! Built-in charset definitions.

use crate::charset_registry::CharsetRegistry;
use crate::charset_ty::Charset;
use crate::error::Result;
use std::sync::OnceLock;

/// A charset declared as one contiguous range plus enumerated extras.
#[derive(Debug, Clone, Copy)]
pub struct CharsetDef {
    /// Display name.
    pub common_name: &'static str,
    /// Display name in the charset's own script.
    pub native_name: &'static str,
    /// Unique key.
    pub abbreviation: &'static str,
    /// First and last code point of the range, inclusive.
    pub range: (u32, u32),
    /// Code points outside the range.
    pub extras: &'static [u32],
}

impl CharsetDef {
    /// Builds the charset.
    pub fn build(&self) -> Result<Charset> {
        Charset::from_ranges(
            self.common_name,
            self.native_name,
            self.abbreviation,
            self.range.0..=self.range.1,
            self.extras,
        )
    }
}

/// Basic Latin: printable ASCII.
pub const BASIC_LATIN: CharsetDef = CharsetDef {
    common_name: "Basic Latin",
    native_name: "Basic Latin",
    abbreviation: "LATN",
    range: (0x0020, 0x007E),
    extras: &[],
};

/// Basic Cyrillic, including the Ukrainian ghe with upturn, the hryvnia and
/// ruble signs, and the numero sign. U+045F is not part of it.
pub const BASIC_CYRILLIC: CharsetDef = CharsetDef {
    common_name: "Basic Cyrillic",
    native_name: "Кири́ллица",
    abbreviation: "CYRL",
    range: (0x0400, 0x045E),
    extras: &[0x0490, 0x0491, 0x20B4, 0x20BD, 0x2116],
};

/// Every built-in definition, in declaration order.
pub const BUILTIN: &[CharsetDef] = &[BASIC_LATIN, BASIC_CYRILLIC];

impl CharsetRegistry {
    /// A registry of the built-in charsets.
    pub fn from_defs(defs: &[CharsetDef]) -> Result<Self> {
        defs.iter()
            .map(CharsetDef::build)
            .collect::<Result<Vec<_>>>()
            .and_then(CharsetRegistry::from_charsets)
    }

    /// The process-wide registry of built-in charsets, built on first use.
    pub fn builtin() -> &'static CharsetRegistry {
        static BUILTIN_REGISTRY: OnceLock<CharsetRegistry> = OnceLock::new();
        BUILTIN_REGISTRY.get_or_init(|| {
            CharsetRegistry::from_charsets_lossy(BUILTIN.iter().map(CharsetDef::build))
        })
    }
}
