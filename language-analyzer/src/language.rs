//! Closed set of language identifiers recognized by the analyzer.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Language categories the analyzer can report.
///
/// Variants are declared in the lexicographic order of their identifiers, so the
/// derived `Ord` sorts `BTreeMap`/`BTreeSet` keys the same way the identifiers sort
/// as strings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    JavaScript,
    Php,
    Python,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Java,
        Language::JavaScript,
        Language::Php,
        Language::Python,
    ];

    /// Wire identifier (`"javascript"`, `"python"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::JavaScript => "javascript",
            Language::Php => "php",
            Language::Python => "python",
        }
    }

    /// Exact, case-sensitive lookup by identifier. Returns `None` for anything
    /// outside the closed set.
    pub fn from_identifier(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == id)
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
