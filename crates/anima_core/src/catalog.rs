//! Name registry resolved once at construction.
//!
//! Configuration refers to traits, moods and emotion kinds by name. The models
//! work on dense indices instead, so every cross-reference is resolved (and
//! rejected if unknown) before the engine exists.

use crate::error::ConfigError;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub(crate) struct NameIndex {
    names: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl NameIndex {
    /// Build from names in declaration order, rejecting blanks and duplicates.
    pub(crate) fn build<'a, I>(section: &'static str, names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index = Self::default();
        for name in names {
            if name.trim().is_empty() {
                return Err(ConfigError::MissingName { section });
            }
            if index.lookup.contains_key(name) {
                return Err(ConfigError::DuplicateName {
                    section,
                    name: name.to_string(),
                });
            }
            index.lookup.insert(name.to_string(), index.names.len());
            index.names.push(name.to_string());
        }
        Ok(index)
    }

    pub(crate) fn get(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    /// Resolve a cross-reference made by `owner`.
    pub(crate) fn resolve(
        &self,
        section: &'static str,
        name: &str,
        owner: &str,
    ) -> Result<usize, ConfigError> {
        self.get(name).ok_or_else(|| ConfigError::UnknownName {
            section,
            name: name.to_string(),
            owner: owner.to_string(),
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }
}

/// All resolved name tables.
#[derive(Debug, Clone)]
pub(crate) struct Catalog {
    pub traits: NameIndex,
    pub moods: NameIndex,
    pub emotions: NameIndex,
}
