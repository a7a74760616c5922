use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Per-language aggregate inside an [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDetail {
    /// Number of files classified into this language.
    #[serde(rename = "files")]
    pub file_count: usize,
    /// Distinct extensions actually observed, sorted ascending.
    pub extensions: Vec<String>,
}

/// Summary of one classification run over one directory.
///
/// Built fresh on every call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub directory: String,
    pub languages_detected: Vec<Language>,
    pub language_details: BTreeMap<Language, LanguageDetail>,
    /// Always equal to the sum of every `file_count`.
    pub total_files: usize,
    /// `true` iff at least one language was detected.
    pub supported: bool,
}

impl AnalysisResult {
    pub(crate) fn from_tally(directory: String, tally: BTreeMap<Language, Tally>) -> Self {
        let language_details: BTreeMap<Language, LanguageDetail> = tally
            .into_iter()
            .map(|(language, t)| {
                (
                    language,
                    LanguageDetail {
                        file_count: t.files,
                        extensions: t.extensions.into_iter().collect(),
                    },
                )
            })
            .collect();

        let languages_detected: Vec<Language> = language_details.keys().copied().collect();
        let total_files = language_details.values().map(|d| d.file_count).sum();

        Self {
            directory,
            supported: !languages_detected.is_empty(),
            languages_detected,
            language_details,
            total_files,
        }
    }
}

/// Full file listing grouped by detected language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesByLanguage {
    pub directory: String,
    pub files_by_language: BTreeMap<Language, Vec<String>>,
}

/// Running counters for one language during a walk.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    pub files: usize,
    pub extensions: BTreeSet<String>,
}
