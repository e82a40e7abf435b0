//! Job construction: turns a source location and a language list into the
//! ordered set of (file, language) translation jobs.

use crate::error::JobBuildError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name suffix of translatable resource files
pub const JSON_EXTENSION: &str = ".json";

/// One source file to be translated into one target language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub source_path: PathBuf,
    pub target_path: PathBuf,
    /// Source path relative to the source root, reused under every language directory
    pub relative_path: PathBuf,
    pub language: String,
}

/// Split a comma-separated language list, dropping blank entries
pub fn parse_languages(languages: &str) -> Vec<&str> {
    languages
        .split(',')
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .collect()
}

fn has_json_extension(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(JSON_EXTENSION))
        .unwrap_or(false)
}

/// Build the job list for `source` (a directory tree or a single file).
///
/// Jobs are ordered by file (directory entries sorted by name), then by the
/// order of `languages`, so repeated runs over an unchanged tree produce the
/// same sequence. Nothing is written to disk.
pub fn build_jobs(
    source: &Path,
    target_root: &Path,
    languages: &str,
) -> Result<Vec<Job>, JobBuildError> {
    let metadata = match std::fs::metadata(source) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(JobBuildError::NotFound(source.to_path_buf()))
        }
        Err(e) => {
            return Err(JobBuildError::Io {
                path: source.to_path_buf(),
                source: e,
            })
        }
    };

    let languages = parse_languages(languages);
    let mut jobs = Vec::new();

    if metadata.is_dir() {
        for entry in WalkDir::new(source).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_dir() || !has_json_extension(entry.path()) {
                continue;
            }

            // walkdir yields paths rooted at `source`, so this cannot fail
            let relative_path = entry
                .path()
                .strip_prefix(source)
                .unwrap_or_else(|_| entry.path())
                .to_path_buf();

            for lang in &languages {
                jobs.push(Job {
                    source_path: entry.path().to_path_buf(),
                    target_path: target_root.join(lang).join(&relative_path),
                    relative_path: relative_path.clone(),
                    language: lang.to_string(),
                });
            }
        }
    } else {
        if !has_json_extension(source) {
            return Err(JobBuildError::InvalidInput(source.to_path_buf()));
        }

        let file_name = PathBuf::from(source.file_name().unwrap_or(source.as_os_str()));
        for lang in &languages {
            jobs.push(Job {
                source_path: source.to_path_buf(),
                target_path: target_root.join(lang).join(&file_name),
                relative_path: file_name.clone(),
                language: lang.to_string(),
            });
        }
    }

    Ok(jobs)
}
