//! Directory language classifier.
//!
//! Walks a directory tree, prunes well-known dependency/build/cache folders and
//! buckets every remaining file into a language by its extension. No file is ever
//! opened or parsed; classification is purely name based.
//!
//! # Example
//! ```no_run
//! use language_analyzer::LanguageAnalyzer;
//!
//! fn main() -> language_analyzer::Result<()> {
//!     let analyzer = LanguageAnalyzer::new("/srv/project")?;
//!     let summary = analyzer.analyze()?;
//!     println!("{} files, supported = {}", summary.total_files, summary.supported);
//!
//!     for path in analyzer.files_by_language("python")? {
//!         println!("{path}");
//!     }
//!     Ok(())
//! }
//! ```

mod analyzer;
pub mod config;
pub mod errors;
pub mod language;
pub mod types;
mod util;

pub use analyzer::LanguageAnalyzer;
pub use config::{AnalyzerConfig, IgnoreSet, LanguageTable};
pub use errors::{AnalyzerError, Result};
pub use language::Language;
pub use types::{AnalysisResult, FilesByLanguage, LanguageDetail};
