use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    config::AnalyzerConfig,
    errors::{AnalyzerError, Result},
    language::Language,
    types::{AnalysisResult, FilesByLanguage, Tally},
    util::fs_scan::walk_files,
};

/// Classifier bound to one directory.
///
/// The directory is validated once, in the constructor. Every operation walks
/// the tree again from scratch; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct LanguageAnalyzer {
    directory: PathBuf,
    config: Arc<AnalyzerConfig>,
}

impl LanguageAnalyzer {
    /// Binds the analyzer to `directory` using the default extension table and
    /// ignore set.
    ///
    /// # Errors
    /// [`AnalyzerError::InvalidDirectory`] if the path does not exist or is not
    /// a directory.
    pub fn new(directory: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(directory, Arc::new(AnalyzerConfig::default()))
    }

    /// Same as [`LanguageAnalyzer::new`] with an explicit, shared config.
    ///
    /// # Errors
    /// [`AnalyzerError::InvalidDirectory`] if the path does not exist or is not
    /// a directory, [`AnalyzerError::Io`] if it cannot be inspected.
    pub fn with_config(directory: impl AsRef<Path>, config: Arc<AnalyzerConfig>) -> Result<Self> {
        let raw = directory.as_ref();

        let meta = fs::metadata(raw).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => {
                AnalyzerError::InvalidDirectory {
                    path: raw.display().to_string(),
                    reason: "directory does not exist",
                }
            }
            _ => AnalyzerError::Io {
                path: raw.to_path_buf(),
                source: err,
            },
        })?;
        if !meta.is_dir() {
            return Err(AnalyzerError::InvalidDirectory {
                path: raw.display().to_string(),
                reason: "path is not a directory",
            });
        }

        Ok(Self {
            directory: normalize(raw),
            config,
        })
    }

    /// The bound directory, lexically normalized (no trailing separator, no
    /// `.` segments after the first component).
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Walks the tree and aggregates file counts and observed extensions per
    /// language.
    ///
    /// # Errors
    /// [`AnalyzerError::Traversal`] on the first filesystem error met mid-walk.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        let table = &self.config.languages;
        let mut tally = BTreeMap::<Language, Tally>::new();

        walk_files(&self.directory, &self.config.ignore, |_, ext| {
            if let Some(language) = table.language_for(ext) {
                let t = tally.entry(language).or_default();
                t.files += 1;
                t.extensions.insert(ext.to_string());
            }
        })?;

        Ok(AnalysisResult::from_tally(self.directory_string(), tally))
    }

    /// Full paths of every file of `language`, sorted ascending.
    ///
    /// An identifier outside the table yields an empty list, not an error.
    ///
    /// # Errors
    /// [`AnalyzerError::Traversal`] on the first filesystem error met mid-walk.
    pub fn files_by_language(&self, language: &str) -> Result<Vec<String>> {
        let Some(language) = Language::from_identifier(language) else {
            return Ok(Vec::new());
        };
        let Some(extensions) = self.config.languages.extensions(language) else {
            return Ok(Vec::new());
        };

        let mut files = Vec::new();
        walk_files(&self.directory, &self.config.ignore, |path, ext| {
            if extensions.contains(ext) {
                files.push(path.to_string_lossy().into_owned());
            }
        })?;
        files.sort();
        Ok(files)
    }

    /// Number of files of `language`; `0` for unknown identifiers.
    ///
    /// # Errors
    /// [`AnalyzerError::Traversal`] on the first filesystem error met mid-walk.
    pub fn file_count(&self, language: &str) -> Result<usize> {
        let Some(language) = Language::from_identifier(language) else {
            return Ok(0);
        };
        let analysis = self.analyze()?;
        Ok(analysis
            .language_details
            .get(&language)
            .map_or(0, |d| d.file_count))
    }

    /// Listing of every detected language in a single walk.
    ///
    /// Equivalent to calling [`LanguageAnalyzer::files_by_language`] for each
    /// entry of `analyze().languages_detected`, without re-walking per language.
    ///
    /// # Errors
    /// [`AnalyzerError::Traversal`] on the first filesystem error met mid-walk.
    pub fn files_by_detected_language(&self) -> Result<FilesByLanguage> {
        let table = &self.config.languages;
        let mut files_by_language = BTreeMap::<Language, Vec<String>>::new();

        walk_files(&self.directory, &self.config.ignore, |path, ext| {
            if let Some(language) = table.language_for(ext) {
                files_by_language
                    .entry(language)
                    .or_default()
                    .push(path.to_string_lossy().into_owned());
            }
        })?;

        for files in files_by_language.values_mut() {
            files.sort();
        }

        Ok(FilesByLanguage {
            directory: self.directory_string(),
            files_by_language,
        })
    }

    fn directory_string(&self) -> String {
        self.directory.to_string_lossy().into_owned()
    }
}

/// Drops trailing separators and interior `.` segments without touching the
/// filesystem.
fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_trailing_separator() {
        assert_eq!(normalize(Path::new("/srv/app/")), PathBuf::from("/srv/app"));
        assert_eq!(normalize(Path::new("/srv/./app")), PathBuf::from("/srv/app"));
    }

    #[test]
    fn rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = LanguageAnalyzer::new(dir.path().join("nope")).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::InvalidDirectory {
                reason: "directory does not exist",
                ..
            }
        ));
    }

    #[test]
    fn rejects_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.py");
        fs::write(&file, "print()").unwrap();
        let err = LanguageAnalyzer::new(&file).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::InvalidDirectory {
                reason: "path is not a directory",
                ..
            }
        ));
    }

    #[test]
    fn missing_parent_component_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("file.txt"), "").unwrap();
        let err = LanguageAnalyzer::new(dir.path().join("file.txt/sub")).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidDirectory { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_parent_is_io_error_not_missing() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir_all(locked.join("sub")).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users bypass the mode bits; nothing to observe then.
        let bypassed = fs::read_dir(&locked).is_ok();
        let result = LanguageAnalyzer::new(locked.join("sub"));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if bypassed {
            return;
        }

        match result {
            Err(AnalyzerError::Io { path, source }) => {
                assert_eq!(path, locked.join("sub"));
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn file_count_for_known_and_unknown() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.php"), "").unwrap();
        fs::write(dir.path().join("b.phtml"), "").unwrap();
        let analyzer = LanguageAnalyzer::new(dir.path()).unwrap();
        assert_eq!(analyzer.file_count("php").unwrap(), 2);
        assert_eq!(analyzer.file_count("java").unwrap(), 0);
        assert_eq!(analyzer.file_count("cobol").unwrap(), 0);
    }
}
