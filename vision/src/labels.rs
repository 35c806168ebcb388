use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;

/// Class index to display name, e.g. `{"0": "Taylor Swift"}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelDictionary {
    names: HashMap<String, String>,
}

impl LabelDictionary {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self {
            names: serde_json::from_str(json)?,
        })
    }

    /// Name registered for `class`, keyed by its decimal string.
    pub fn lookup(&self, class: i64) -> Option<&str> {
        self.names.get(&class.to_string()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(i64, String)> for LabelDictionary {
    fn from_iter<I: IntoIterator<Item = (i64, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }
}
