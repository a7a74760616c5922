//! Extension table and ignore set, bundled into an immutable [`AnalyzerConfig`].
//!
//! Nothing here is global: build a config once (usually via `Default`), wrap it in
//! an `Arc` and hand it to every [`crate::LanguageAnalyzer`] that should share it.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::language::Language;

const JAVASCRIPT_EXT: &[&str] = &[".js", ".jsx", ".ts", ".tsx", ".mjs", ".cjs"];
const PYTHON_EXT: &[&str] = &[".py", ".pyw", ".pyi"];
const PHP_EXT: &[&str] = &[
    ".php", ".php3", ".php4", ".php5", ".php7", ".php8", ".phtml", ".phps",
];
const JAVA_EXT: &[&str] = &[".java"];

const IGNORE_DIRS: &[&str] = &[
    ".git",
    ".gitignore",
    "node_modules",
    "venv",
    "__pycache__",
    ".idea",
    ".vscode",
    "dist",
    "build",
    "target",
    ".gradle",
    ".pytest_cache",
    ".tox",
    "vendor",
    "coverage",
    ".egg-info",
    ".venv",
    "env",
    "ENV",
    "venv3",
    ".mypy_cache",
    ".django_cache",
];

/// Language → extensions mapping, plus the reverse index used during a walk.
///
/// Extensions are stored lower-cased with their leading dot. Every extension
/// belongs to at most one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTable {
    by_language: BTreeMap<Language, BTreeSet<String>>,
    by_extension: HashMap<String, Language>,
}

impl LanguageTable {
    pub fn new<I, E, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Language, E)>,
        E: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut by_language = BTreeMap::<Language, BTreeSet<String>>::new();
        let mut by_extension = HashMap::<String, Language>::new();

        for (language, exts) in entries {
            let set = by_language.entry(language).or_default();
            for ext in exts {
                let ext = ext.as_ref().to_lowercase();
                let previous = by_extension.insert(ext.clone(), language);
                debug_assert!(
                    previous.is_none_or(|p| p == language),
                    "extension {ext} mapped to more than one language"
                );
                set.insert(ext);
            }
        }

        Self {
            by_language,
            by_extension,
        }
    }

    /// Language owning a lower-cased extension such as `".py"`.
    pub fn language_for(&self, ext: &str) -> Option<Language> {
        self.by_extension.get(ext).copied()
    }

    pub fn extensions(&self, language: Language) -> Option<&BTreeSet<String>> {
        self.by_language.get(&language)
    }

    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.by_language.keys().copied()
    }
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::new([
            (Language::JavaScript, JAVASCRIPT_EXT),
            (Language::Python, PYTHON_EXT),
            (Language::Php, PHP_EXT),
            (Language::Java, JAVA_EXT),
        ])
    }
}

/// Directory basenames pruned from every walk, at any depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet(BTreeSet<String>);

impl IgnoreSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        Self::new(IGNORE_DIRS.iter().copied())
    }
}

/// Everything a walk needs besides the root path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub languages: LanguageTable,
    pub ignore: IgnoreSet,
}

impl AnalyzerConfig {
    pub fn new(languages: LanguageTable, ignore: IgnoreSet) -> Self {
        Self { languages, ignore }
    }
}
