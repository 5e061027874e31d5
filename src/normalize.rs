use std::collections::HashMap;

use serde::Deserialize;

use crate::{LookupError, ParseError};

/// Maps a localized subdistrict name to its canonical numeric key.
pub trait NameNormalizer {
    fn canonical_key(&self, localized: &str) -> Result<u32, LookupError>;
}

impl<F> NameNormalizer for F
where
    F: Fn(&str) -> Result<u32, LookupError>,
{
    fn canonical_key(&self, localized: &str) -> Result<u32, LookupError> {
        self(localized)
    }
}

#[derive(Deserialize)]
struct TableEntry {
    key: u32,
    names: Vec<String>,
}

/// Alias table loaded from a JSON list of `{"key": n, "names": [..]}` entries.
///
/// Every localized spelling and its translations are listed as aliases of
/// the same key.
#[derive(Debug, Default, Clone)]
pub struct SubdistrictTable {
    aliases: HashMap<String, u32>,
}

impl SubdistrictTable {
    pub fn from_json(json: &[u8]) -> Result<Self, ParseError> {
        let entries: Vec<TableEntry> = serde_json::from_slice(json)?;
        Self::from_pairs(
            entries
                .into_iter()
                .flat_map(|entry| entry.names.into_iter().map(move |name| (name, entry.key))),
        )
    }

    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut aliases = HashMap::new();
        for (name, key) in pairs {
            let alias = normalize_name(name.as_ref());
            if let Some(&existing) = aliases.get(&alias)
                && existing != key
            {
                return Err(ParseError::DuplicateAlias {
                    alias,
                    first: existing,
                    second: key,
                });
            }
            aliases.insert(alias, key);
        }

        Ok(SubdistrictTable { aliases })
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl NameNormalizer for SubdistrictTable {
    fn canonical_key(&self, localized: &str) -> Result<u32, LookupError> {
        self.aliases
            .get(&normalize_name(localized))
            .copied()
            .ok_or_else(|| LookupError::UnknownSubdistrict(localized.to_string()))
    }
}

/// Trim, collapse inner whitespace and lowercase.
fn normalize_name(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
