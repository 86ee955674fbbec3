use std::{fmt, sync::{Arc, LazyLock}};

use regex::Regex;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Normalized county key shared by every table in a run.
/// Keeps the lowercased name text (e.g. "adams county") behind an `Arc` so rows can be cloned cheaply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountyName(Arc<str>);

impl CountyName {
    /// Normalize a raw name: trim, collapse inner whitespace, lowercase.
    pub fn new(raw: &str) -> Self {
        let collapsed = WHITESPACE.replace_all(raw.trim(), " ");
        Self(Arc::from(collapsed.to_lowercase()))
    }

    #[inline] pub fn as_str(&self) -> &str { &self.0 }

    #[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl fmt::Display for CountyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for CountyName {
    fn from(raw: &str) -> Self { Self::new(raw) }
}

impl From<String> for CountyName {
    fn from(raw: String) -> Self { Self::new(&raw) }
}

impl AsRef<str> for CountyName {
    fn as_ref(&self) -> &str { &self.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(CountyName::new("  Adams   County ").as_str(), "adams county");
        assert_eq!(CountyName::new("VAN WERT\tCounty"), CountyName::new("van wert county"));
    }

    #[test]
    fn blank_names_are_empty() {
        assert!(CountyName::new(" \t ").is_empty());
        assert!(!CountyName::new("Ross County").is_empty());
    }
}
