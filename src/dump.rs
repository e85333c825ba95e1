//! Serializable snapshot of a registry.
//!
//! Code points are stored normalized: sorted, deduplicated and folded into
//! inclusive ranges. The declaration shape of each charset is not kept.

use crate::charset_registry::CharsetRegistry;
use crate::charset_ty::Charset;
use crate::code_point_set::CodePointSpec;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One charset in a [`RegistryDump`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharsetRecord {
    /// Unique key.
    pub abbreviation: String,
    /// Display name.
    pub common_name: String,
    /// Display name in the charset's own script.
    pub native_name: String,
    /// Inclusive `[lo, hi]` ranges in ascending order.
    pub ranges: Vec<[u32; 2]>,
}

impl From<&Charset> for CharsetRecord {
    fn from(charset: &Charset) -> Self {
        CharsetRecord {
            abbreviation: charset.abbreviation().to_owned(),
            common_name: charset.common_name().to_owned(),
            native_name: charset.native_name().to_owned(),
            ranges: charset
                .ranges()
                .into_iter()
                .map(|r| [*r.start(), *r.end()])
                .collect(),
        }
    }
}

impl CharsetRecord {
    /// Rebuilds the charset, validating it as a fresh declaration.
    pub fn to_charset(&self) -> Result<Charset> {
        let glyphs: crate::GlyphSpec = self
            .ranges
            .iter()
            .map(|&[lo, hi]| CodePointSpec::Range(lo, hi))
            .collect();
        Charset::new(
            self.common_name.as_str(),
            self.native_name.as_str(),
            self.abbreviation.as_str(),
            &glyphs,
        )
    }
}

/// Every charset of a registry, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryDump {
    /// The charsets.
    pub charsets: Vec<CharsetRecord>,
}

impl CharsetRegistry {
    /// Snapshots the registry.
    pub fn dump(&self) -> RegistryDump {
        RegistryDump {
            charsets: self.iter().map(CharsetRecord::from).collect(),
        }
    }

    /// Rebuilds a registry from a snapshot, with the same validation as
    /// [`from_charsets`](CharsetRegistry::from_charsets).
    pub fn from_dump(dump: &RegistryDump) -> Result<Self> {
        let charsets = dump
            .charsets
            .iter()
            .map(CharsetRecord::to_charset)
            .collect::<Result<Vec<_>>>()?;
        CharsetRegistry::from_charsets(charsets)
    }
}

#[cfg(test)]
mod tests {
    use super::RegistryDump;
    use crate::charset_registry::CharsetRegistry;
    use crate::error::{CharsetError, InvalidDefinitionReason};

    #[test]
    fn test_dump_is_range_compressed() {
        let dump = CharsetRegistry::builtin().dump();
        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(
            serde_json::json!({
                "abbreviation": "CYRL",
                "common_name": "Basic Cyrillic",
                "native_name": "Кири́ллица",
                "ranges": [[0x400, 0x45E], [0x490, 0x491], [0x20B4, 0x20B4], [0x20BD, 0x20BD], [0x2116, 0x2116]],
            }),
            json["charsets"][1]
        );

        let restored = CharsetRegistry::from_dump(&dump).unwrap();
        assert_eq!(dump, restored.dump());
    }

    #[test]
    fn test_from_dump_validates() {
        let json = r#"{"charsets": [
            {"abbreviation": "A", "common_name": "A", "native_name": "A", "ranges": [[65, 70]]},
            {"abbreviation": "A", "common_name": "B", "native_name": "B", "ranges": [[71, 72]]}
        ]}"#;
        let dump: RegistryDump = serde_json::from_str(json).unwrap();
        assert_eq!(
            Err(CharsetError::DuplicateAbbreviation("A".to_owned())),
            CharsetRegistry::from_dump(&dump).map(|r| r.len())
        );

        let json = r#"{"charsets": [
            {"abbreviation": "E", "common_name": "E", "native_name": "E", "ranges": []}
        ]}"#;
        let dump: RegistryDump = serde_json::from_str(json).unwrap();
        assert_eq!(
            Err(CharsetError::InvalidDefinition {
                abbreviation: "E".to_owned(),
                reason: InvalidDefinitionReason::Empty,
            }),
            CharsetRegistry::from_dump(&dump).map(|r| r.len())
        );
    }
}
