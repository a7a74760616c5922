//! End-to-end behaviour of `LanguageAnalyzer` against real temporary trees.

use std::{fs, path::Path, sync::Arc};

use language_analyzer::{
    AnalyzerConfig, AnalyzerError, IgnoreSet, Language, LanguageAnalyzer, LanguageDetail,
    LanguageTable,
};
use tempfile::TempDir;

/// Creates `files` (relative paths) under a fresh temp dir, making parents as needed.
fn tree(files: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for rel in files {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "").unwrap();
    }
    dir
}

fn path_str(root: &Path, rel: &str) -> String {
    root.join(rel).to_string_lossy().into_owned()
}

#[test]
fn scenario_a_mixed_project_with_node_modules() {
    let dir = tree(&["app.js", "main.ts", "setup.py", "node_modules/lib.js"]);
    let result = LanguageAnalyzer::new(dir.path()).unwrap().analyze().unwrap();

    assert_eq!(
        result.languages_detected,
        vec![Language::JavaScript, Language::Python]
    );
    assert_eq!(
        result.language_details[&Language::JavaScript],
        LanguageDetail {
            file_count: 2,
            extensions: vec![".js".into(), ".ts".into()],
        }
    );
    assert_eq!(
        result.language_details[&Language::Python],
        LanguageDetail {
            file_count: 1,
            extensions: vec![".py".into()],
        }
    );
    assert_eq!(result.total_files, 3);
    assert!(result.supported);
}

#[test]
fn scenario_b_empty_directory() {
    let dir = TempDir::new().unwrap();
    let result = LanguageAnalyzer::new(dir.path()).unwrap().analyze().unwrap();

    assert!(result.languages_detected.is_empty());
    assert!(result.language_details.is_empty());
    assert_eq!(result.total_files, 0);
    assert!(!result.supported);
}

#[test]
fn scenario_c_missing_directory() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does/not/exist");
    let err = LanguageAnalyzer::new(&missing).unwrap_err();
    assert!(matches!(err, AnalyzerError::InvalidDirectory { .. }));
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn scenario_d_only_unsupported_files() {
    let dir = tree(&["README.md", "data.json"]);
    let result = LanguageAnalyzer::new(dir.path()).unwrap().analyze().unwrap();
    assert!(!result.supported);
    assert_eq!(result.total_files, 0);
}

#[test]
fn every_matching_file_is_counted_once() {
    let dir = tree(&[
        "a/b/c/Deep.java",
        "a/Top.java",
        "web/index.php",
        "web/legacy.PHP5",
        "web/view.phtml",
        "scripts/tool.pyw",
        "scripts/stubs.pyi",
        "ui/App.jsx",
        "ui/App.tsx",
        "ui/cfg.mjs",
        "ui/cfg.cjs",
        "notes.txt",
        "Makefile",
    ]);
    let result = LanguageAnalyzer::new(dir.path()).unwrap().analyze().unwrap();

    assert_eq!(result.language_details[&Language::Java].file_count, 2);
    assert_eq!(result.language_details[&Language::Php].file_count, 3);
    assert_eq!(
        result.language_details[&Language::Php].extensions,
        vec![".php", ".php5", ".phtml"]
    );
    assert_eq!(result.language_details[&Language::Python].file_count, 2);
    assert_eq!(result.language_details[&Language::JavaScript].file_count, 4);
    assert_eq!(result.total_files, 11);
}

#[test]
fn ignored_directories_are_pruned_at_any_depth() {
    let dir = tree(&[
        "src/main.py",
        "src/__pycache__/main.py",
        "pkg/vendor/lib/dep.php",
        ".git/hooks/pre-commit.py",
        "deep/a/b/node_modules/x/y/z.js",
        "target/classes/App.java",
        ".venv/lib/site.py",
    ]);
    let analyzer = LanguageAnalyzer::new(dir.path()).unwrap();
    let result = analyzer.analyze().unwrap();

    assert_eq!(result.languages_detected, vec![Language::Python]);
    assert_eq!(result.total_files, 1);
    assert!(analyzer.files_by_language("javascript").unwrap().is_empty());
    assert!(analyzer.files_by_language("php").unwrap().is_empty());
}

#[test]
fn totals_and_ordering_invariants() {
    let dir = tree(&[
        "z.py", "y.ts", "x.js", "w.java", "v.php", "u.tsx", "t.jsx", "s.PY",
    ]);
    let result = LanguageAnalyzer::new(dir.path()).unwrap().analyze().unwrap();

    let sum: usize = result.language_details.values().map(|d| d.file_count).sum();
    assert_eq!(result.total_files, sum);

    assert!(result.languages_detected.windows(2).all(|w| w[0] < w[1]));
    let ids: Vec<&str> = result.languages_detected.iter().map(|l| l.as_str()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    for detail in result.language_details.values() {
        assert!(detail.extensions.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn repeated_analysis_is_identical() {
    let dir = tree(&["a.py", "b/c.js", "b/d.ts", "e/f/g.java"]);
    let analyzer = LanguageAnalyzer::new(dir.path()).unwrap();
    assert_eq!(analyzer.analyze().unwrap(), analyzer.analyze().unwrap());
    assert_eq!(
        analyzer.files_by_detected_language().unwrap(),
        analyzer.files_by_detected_language().unwrap()
    );
}

#[test]
fn analysis_sees_changes_between_calls() {
    let dir = tree(&["a.py"]);
    let analyzer = LanguageAnalyzer::new(dir.path()).unwrap();
    assert_eq!(analyzer.analyze().unwrap().total_files, 1);

    fs::write(dir.path().join("b.py"), "").unwrap();
    assert_eq!(analyzer.analyze().unwrap().total_files, 2);
}

#[test]
fn unknown_language_listing_is_empty() {
    let dir = tree(&["a.py", "b.cob"]);
    let analyzer = LanguageAnalyzer::new(dir.path()).unwrap();
    assert!(analyzer.files_by_language("cobol").unwrap().is_empty());
    assert!(analyzer.files_by_language("").unwrap().is_empty());
    assert!(analyzer.files_by_language("PYTHON").unwrap().is_empty());
}

#[test]
fn files_by_language_returns_sorted_full_paths() {
    let dir = tree(&["src/b.py", "src/a.py", "main.py", "lib/node_modules/skip.py", "x.js"]);
    let root = dir.path();
    let files = LanguageAnalyzer::new(root)
        .unwrap()
        .files_by_language("python")
        .unwrap();

    let mut expected = vec![
        path_str(root, "main.py"),
        path_str(root, "src/a.py"),
        path_str(root, "src/b.py"),
    ];
    expected.sort();
    assert_eq!(files, expected);
}

#[test]
fn fused_listing_matches_per_language_listing() {
    let dir = tree(&["a.py", "b/c.js", "b/d.ts", "e/F.JAVA", "build/skip.java", "notes.md"]);
    let analyzer = LanguageAnalyzer::new(dir.path()).unwrap();
    let summary = analyzer.analyze().unwrap();
    let fused = analyzer.files_by_detected_language().unwrap();

    assert_eq!(fused.directory, summary.directory);
    assert_eq!(
        fused.files_by_language.keys().copied().collect::<Vec<_>>(),
        summary.languages_detected
    );
    for (language, files) in &fused.files_by_language {
        assert_eq!(files, &analyzer.files_by_language(language.as_str()).unwrap());
        assert_eq!(files.len(), summary.language_details[language].file_count);
    }
}

#[test]
fn directory_is_echoed_without_trailing_separator() {
    let dir = TempDir::new().unwrap();
    let with_slash = format!("{}/", dir.path().display());
    let result = LanguageAnalyzer::new(&with_slash).unwrap().analyze().unwrap();
    assert_eq!(result.directory, dir.path().to_string_lossy());
}

#[test]
fn custom_config_is_respected() {
    let dir = tree(&["keep/App.java", "skipme/Other.java", "script.py"]);
    let config = AnalyzerConfig::new(
        LanguageTable::new([(Language::Java, [".java"])]),
        IgnoreSet::new(["skipme"]),
    );
    let analyzer = LanguageAnalyzer::with_config(dir.path(), Arc::new(config)).unwrap();
    let result = analyzer.analyze().unwrap();

    assert_eq!(result.languages_detected, vec![Language::Java]);
    assert_eq!(result.total_files, 1);
    // Python is a known identifier but absent from this table.
    assert!(analyzer.files_by_language("python").unwrap().is_empty());
}

#[cfg(unix)]
#[test]
fn directory_symlinks_are_not_followed() {
    use std::os::unix::fs::symlink;

    let dir = tree(&["real/inner.py", "outside/linked.js"]);
    symlink(dir.path().join("outside"), dir.path().join("real/link")).unwrap();
    // A cycle back to the root must not hang the walk.
    symlink(dir.path().join("real"), dir.path().join("real/loop")).unwrap();

    let analyzer = LanguageAnalyzer::new(dir.path().join("real")).unwrap();
    let result = analyzer.analyze().unwrap();
    assert_eq!(result.languages_detected, vec![Language::Python]);
    assert_eq!(result.total_files, 1);
}

#[cfg(unix)]
#[test]
fn file_symlinks_are_counted_and_broken_links_skipped() {
    use std::os::unix::fs::symlink;

    let dir = tree(&["target_file.txt"]);
    symlink(dir.path().join("target_file.txt"), dir.path().join("alias.py")).unwrap();
    symlink(dir.path().join("missing"), dir.path().join("broken.py")).unwrap();

    let result = LanguageAnalyzer::new(dir.path()).unwrap().analyze().unwrap();
    assert_eq!(result.total_files, 1);
}

#[cfg(unix)]
#[test]
fn unreadable_subdirectory_aborts_every_operation() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tree(&["app.py", "locked/hidden.py"]);
    let locked = dir.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can still list the directory; the walk would succeed.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let analyzer = LanguageAnalyzer::new(dir.path()).unwrap();
    let analyze = analyzer.analyze();
    let listing = analyzer.files_by_language("python");
    let fused = analyzer.files_by_detected_language();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(analyze, Err(AnalyzerError::Traversal { .. })));
    assert!(matches!(listing, Err(AnalyzerError::Traversal { .. })));
    assert!(matches!(fused, Err(AnalyzerError::Traversal { .. })));
    if let Err(AnalyzerError::Traversal { path, .. }) = analyze {
        assert_eq!(path, locked);
    }
}
