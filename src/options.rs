use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Free-form options passed alongside the input of a transformation
/// (e.g. `intensity=high` for zalgo or `width=40` for word wrapping).
///
/// Values are kept as strings and parsed by the tool that reads them, so
/// unknown keys are ignored instead of rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options {
    values: HashMap<String, String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl ToString) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    pub fn get_str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_str(key).unwrap_or(default)
    }

    /// Reads a non-negative integer option, falling back to `default` when
    /// the key is missing or not a number.
    pub fn get_usize(&self, key: &str, default: usize) -> usize {
        self.get_str(key)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(default)
    }

    pub fn get_i64(&self, key: &str, default: i64) -> i64 {
        self.get_str(key)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(default)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get_str(key).map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "true" || v == "1" || v == "yes" => true,
            Some(v) if v == "false" || v == "0" || v == "no" => false,
            _ => default,
        }
    }

    /// Adds every entry of `other` that is not already set.
    pub fn merge_defaults(&mut self, other: &Options) {
        for (k, v) in &other.values {
            self.values.entry(k.clone()).or_insert_with(|| v.clone());
        }
    }

    /// Parses a `key=value` pair as supplied on the command line.
    pub fn parse_pair(&mut self, pair: &str) -> Result<()> {
        match pair.split_once('=') {
            Some((k, v)) if !k.trim().is_empty() => {
                self.insert(k.trim(), v);
                Ok(())
            }
            _ => Err(Error::ArgsProcessingError(format!(
                "Invalid option supplied \"{}\" (Must be in key=value format)",
                pair
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, String>> for Options {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let options = Options::new()
            .with("width", 40)
            .with("shift", "-3")
            .with("flag", "yes")
            .with("broken", "abc");

        assert_eq!(options.get_usize("width", 80), 40);
        assert_eq!(options.get_usize("missing", 80), 80);
        assert_eq!(options.get_usize("broken", 7), 7);
        assert_eq!(options.get_i64("shift", 3), -3);
        assert!(options.get_bool("flag", false));
        assert!(!options.get_bool("missing", false));
    }

    #[test]
    fn test_parse_pair() {
        let mut options = Options::new();
        options.parse_pair("intensity=high").unwrap();
        options.parse_pair("suffix=a=b").unwrap();
        assert_eq!(options.get_str("intensity"), Some("high"));
        assert_eq!(options.get_str("suffix"), Some("a=b"));
        assert!(matches!(
            options.parse_pair("novalue"),
            Err(Error::ArgsProcessingError(_))
        ));
    }

    #[test]
    fn test_merge_defaults_keeps_explicit_values() {
        let mut options = Options::new().with("width", 20);
        options.merge_defaults(&Options::new().with("width", 80).with("order", "desc"));
        assert_eq!(options.get_usize("width", 0), 20);
        assert_eq!(options.get_str("order"), Some("desc"));
    }
}
