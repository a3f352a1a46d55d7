//! Attribute dictionary: the name <-> code table packets resolve through.
//!
//! A [`Dictionary`] is immutable once built. Packets hold it behind an
//! [`Arc`](std::sync::Arc) so any number of packets can share one table.
//!
//! Custom dictionaries are loaded from JSON:
//!
//! ```json
//! {
//!   "attributes": [
//!     { "name": "User-Name", "code": 1 },
//!     { "name": "Vendor-Specific", "code": 26 }
//!   ]
//! }
//! ```

use crate::attributes::AttributeType;
use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One name/code pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub name: String,
    pub code: u8,
}

impl DictionaryEntry {
    pub fn new(name: impl Into<String>, code: u8) -> Self {
        DictionaryEntry {
            name: name.into(),
            code,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct DictionaryFile {
    attributes: Vec<DictionaryEntry>,
}

/// Bidirectional attribute name/code lookup
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    by_name: HashMap<String, u8>,
    by_code: HashMap<u8, String>,
}

impl Dictionary {
    /// The RFC 2865/2866/2869/3579 attributes listed in [`AttributeType`]
    pub fn standard() -> Self {
        let mut dictionary = Dictionary::default();
        for attr_type in AttributeType::ALL {
            dictionary
                .by_name
                .insert(attr_type.name().to_string(), attr_type.as_u8());
            dictionary
                .by_code
                .insert(attr_type.as_u8(), attr_type.name().to_string());
        }
        dictionary
    }

    /// Build a dictionary from explicit entries
    ///
    /// Names and codes must both be unique, otherwise the mapping would not
    /// be invertible.
    pub fn from_entries<I>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = DictionaryEntry>,
    {
        let mut dictionary = Dictionary::default();
        for entry in entries {
            if entry.name.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "Dictionary entry for code {} has an empty name",
                    entry.code
                )));
            }
            if dictionary.by_name.contains_key(&entry.name) {
                return Err(ConfigError::Invalid(format!(
                    "Duplicate dictionary name: {}",
                    entry.name
                )));
            }
            if let Some(existing) = dictionary.by_code.get(&entry.code) {
                return Err(ConfigError::Invalid(format!(
                    "Duplicate dictionary code {}: {} and {}",
                    entry.code, existing, entry.name
                )));
            }
            dictionary.by_name.insert(entry.name.clone(), entry.code);
            dictionary.by_code.insert(entry.code, entry.name);
        }
        Ok(dictionary)
    }

    /// Parse a dictionary from its JSON representation
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let file: DictionaryFile = serde_json::from_str(contents)?;
        Self::from_entries(file.attributes)
    }

    /// Load a dictionary from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Save the dictionary as JSON, entries ordered by code
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let file = DictionaryFile {
            attributes: self.entries(),
        };
        let contents = serde_json::to_string_pretty(&file)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Resolve an attribute name to its code
    pub fn code(&self, name: &str) -> Option<u8> {
        self.by_name.get(name).copied()
    }

    /// Resolve an attribute code to its name
    pub fn name(&self, code: u8) -> Option<&str> {
        self.by_code.get(&code).map(String::as_str)
    }

    /// Human-readable name for `code`, falling back to `Attribute-<code>`
    pub fn display_name(&self, code: u8) -> Cow<'_, str> {
        match self.name(code) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(format!("Attribute-{}", code)),
        }
    }

    /// All entries, ordered by code
    pub fn entries(&self) -> Vec<DictionaryEntry> {
        let mut entries: Vec<DictionaryEntry> = self
            .by_code
            .iter()
            .map(|(code, name)| DictionaryEntry::new(name.clone(), *code))
            .collect();
        entries.sort_by_key(|entry| entry.code);
        entries
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_standard_lookups() {
        let dict = Dictionary::standard();
        assert_eq!(dict.code("User-Name"), Some(1));
        assert_eq!(dict.code("User-Password"), Some(2));
        assert_eq!(dict.code("Vendor-Specific"), Some(26));
        assert_eq!(dict.name(31), Some("Calling-Station-Id"));
        assert_eq!(dict.len(), AttributeType::ALL.len());
    }

    #[test]
    fn test_unknown_lookups() {
        let dict = Dictionary::standard();
        assert_eq!(dict.code("NotARealAttribute"), None);
        assert_eq!(dict.code("user-name"), None);
        assert_eq!(dict.name(0), None);
        assert_eq!(dict.display_name(0), "Attribute-0");
        assert_eq!(dict.display_name(1), "User-Name");
    }

    #[test]
    fn test_from_entries_rejects_duplicates() {
        let dup_name = Dictionary::from_entries(vec![
            DictionaryEntry::new("A", 1),
            DictionaryEntry::new("A", 2),
        ]);
        assert!(matches!(dup_name, Err(ConfigError::Invalid(_))));

        let dup_code = Dictionary::from_entries(vec![
            DictionaryEntry::new("A", 1),
            DictionaryEntry::new("B", 1),
        ]);
        assert!(matches!(dup_code, Err(ConfigError::Invalid(_))));

        let empty = Dictionary::from_entries(vec![DictionaryEntry::new("", 1)]);
        assert!(matches!(empty, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_from_json() {
        let dict = Dictionary::from_json_str(
            r#"{"attributes": [{"name": "Venue-Id", "code": 26}, {"name": "Login", "code": 1}]}"#,
        )
        .unwrap();
        assert_eq!(dict.code("Venue-Id"), Some(26));
        assert_eq!(dict.name(1), Some("Login"));
        assert_eq!(dict.code("User-Name"), None);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            Dictionary::from_json_str("{\"attributes\": [{\"name\": \"X\"}]}"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Dictionary::from_json_str(r#"{"attributes": [{"name": "X", "code": 300}]}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let file = NamedTempFile::new().unwrap();
        let dict = Dictionary::standard();
        dict.to_file(file.path()).unwrap();

        let loaded = Dictionary::from_file(file.path()).unwrap();
        assert_eq!(loaded.entries(), dict.entries());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Dictionary::from_file("/nonexistent/dictionary.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
