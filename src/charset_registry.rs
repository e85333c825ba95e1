use crate::charset_ty::Charset;
use crate::error::{CharsetError, Result};
use std::{collections::HashMap, slice};
use unicode_normalization::UnicodeNormalization;

/// The catalog of known charsets.
///
/// Lookup is keyed by abbreviation; iteration follows declaration order.
/// A registry is built once and then only read, so a shared reference can be
/// handed to any number of concurrent matchers.
#[derive(Debug, Clone, Default)]
pub struct CharsetRegistry {
    charsets: Vec<Charset>,
    index_by_abbreviation: HashMap<String, usize>,
}

impl CharsetRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        CharsetRegistry::default()
    }

    /// Builds a registry from charsets in declaration order, failing on the
    /// first duplicate abbreviation.
    pub fn from_charsets<I>(charsets: I) -> Result<Self>
    where
        I: IntoIterator<Item = Charset>,
    {
        let mut registry = CharsetRegistry::new();
        for charset in charsets {
            registry.register(charset)?;
        }
        Ok(registry)
    }

    /// Builds a registry from fallible definitions, skipping and logging any
    /// that are malformed or duplicated.
    pub fn from_charsets_lossy<I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = Result<Charset>>,
    {
        let mut registry = CharsetRegistry::new();
        for definition in definitions {
            if let Err(err) = definition.and_then(|charset| registry.register(charset)) {
                log::warn!("skipping charset: {}", err);
            }
        }
        registry
    }

    /// Adds a charset at the end of the declaration order.
    pub fn register(&mut self, charset: Charset) -> Result<()> {
        if self.index_by_abbreviation.contains_key(charset.abbreviation()) {
            return Err(CharsetError::DuplicateAbbreviation(
                charset.abbreviation().to_owned(),
            ));
        }
        log::debug!(
            "registered charset {} with {} code points",
            charset.abbreviation(),
            charset.len()
        );
        self.index_by_abbreviation
            .insert(charset.abbreviation().to_owned(), self.charsets.len());
        self.charsets.push(charset);
        Ok(())
    }

    /// Looks up a charset by abbreviation.
    pub fn get(&self, abbreviation: &str) -> Result<&Charset> {
        self.index_by_abbreviation
            .get(abbreviation)
            .map(|&idx| &self.charsets[idx])
            .ok_or_else(|| CharsetError::UnknownCharset(abbreviation.to_owned()))
    }

    /// Whether a charset is registered under the abbreviation.
    pub fn contains(&self, abbreviation: &str) -> bool {
        self.index_by_abbreviation.contains_key(abbreviation)
    }

    /// Finds the first charset whose common or native name matches `name`.
    ///
    /// Names are compared in NFC, so precomposed and decomposed spellings
    /// of the same name are equal.
    pub fn find_by_name(&self, name: &str) -> Option<&Charset> {
        let needle: String = name.nfc().collect();
        self.charsets.iter().find(|charset| {
            charset.common_name().nfc().eq(needle.chars())
                || charset.native_name().nfc().eq(needle.chars())
        })
    }

    /// All charsets in declaration order.
    pub fn all(&self) -> &[Charset] {
        &self.charsets
    }

    /// Iterates charsets in declaration order.
    pub fn iter(&self) -> slice::Iter<'_, Charset> {
        self.charsets.iter()
    }

    /// Number of registered charsets.
    pub fn len(&self) -> usize {
        self.charsets.len()
    }

    /// Whether no charsets are registered.
    pub fn is_empty(&self) -> bool {
        self.charsets.is_empty()
    }
}

impl<'a> IntoIterator for &'a CharsetRegistry {
    type Item = &'a Charset;
    type IntoIter = slice::Iter<'a, Charset>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
