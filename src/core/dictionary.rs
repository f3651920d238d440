//! Replacement dictionary: keyword to replacement table applied to values.
//!
//! Keywords are applied longest first (ties broken lexicographically), so the
//! result never depends on file or hash order. Each keyword runs against the
//! output of the previous ones.

use crate::error::{Error, Result};
use crate::properties::PropertyFile;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub keyword: String,
    pub replacement: String,
}

/// Result of running a value through the dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub value: String,
    /// Number of keyword occurrences replaced.
    pub replacements: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    /// Sorted in substitution order.
    entries: Vec<Replacement>,
}

impl Dictionary {
    /// Build from keyword/replacement pairs. A repeated keyword keeps its
    /// last replacement, as in a loaded file.
    pub fn new<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let file: PropertyFile = pairs
            .into_iter()
            .map(|(keyword, replacement)| (keyword.into(), replacement.into()))
            .collect();
        Self::from_file(&file, "<inline>")
    }

    fn from_file(file: &PropertyFile, origin: &str) -> Result<Self> {
        let mut entries = Vec::with_capacity(file.len());
        for entry in file.iter() {
            if entry.key.is_empty() {
                return Err(Error::dictionary_malformed(
                    origin,
                    None,
                    "keyword must not be empty",
                ));
            }
            entries.push(Replacement {
                keyword: entry.key.clone(),
                replacement: entry.value.clone(),
            });
        }

        entries.sort_by(|a, b| {
            b.keyword
                .len()
                .cmp(&a.keyword.len())
                .then_with(|| a.keyword.cmp(&b.keyword))
        });
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in substitution order.
    pub fn entries(&self) -> &[Replacement] {
        &self.entries
    }

    /// Substitute every keyword occurrence in `value`.
    ///
    /// Returns `None` when no keyword occurs at all. A keyword that maps to
    /// itself still counts as a match.
    pub fn apply(&self, value: &str) -> Option<Substitution> {
        let mut current = value.to_string();
        let mut replacements = 0;

        for entry in &self.entries {
            let count = current.matches(entry.keyword.as_str()).count();
            if count == 0 {
                continue;
            }
            current = current.replace(entry.keyword.as_str(), &entry.replacement);
            replacements += count;
        }

        (replacements > 0).then_some(Substitution {
            value: current,
            replacements,
        })
    }
}

/// Load the dictionary file.
///
/// A missing file is `dictionary.not_found`; parse failures and empty
/// keywords are `dictionary.malformed`.
pub fn load(path: &Path) -> Result<Dictionary> {
    if !path.is_file() {
        return Err(Error::dictionary_not_found(path.display().to_string()));
    }

    let file = PropertyFile::load(path).map_err(Error::into_dictionary_error)?;
    Dictionary::from_file(&file, &path.display().to_string())
}
