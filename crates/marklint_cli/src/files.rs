//! Input file discovery.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSetBuilder};
use marklint_core::LinterError;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Expands command line inputs into the list of files to lint.
///
/// Each input is one of:
/// - an existing file, taken as is regardless of extension
/// - an existing directory, walked for files with one of `extensions`
/// - a glob pattern, matched against every file under `base_dir`
///
/// The result is sorted and deduplicated. A pattern that matches nothing
/// is not an error.
pub fn discover_files(
    inputs: &[String],
    extensions: &[&str],
    base_dir: &Path,
) -> Result<Vec<PathBuf>, LinterError> {
    let mut files = Vec::new();
    let mut glob_builder = GlobSetBuilder::new();
    let mut has_globs = false;

    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            debug!("Walking {}", path.display());
            files.extend(
                WalkDir::new(path)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file())
                    .map(|e| e.into_path())
                    .filter(|p| has_extension(p, extensions)),
            );
        } else {
            let glob = Glob::new(input).map_err(|e| {
                LinterError::config(format!("Invalid pattern '{}': {}", input, e))
            })?;
            glob_builder.add(glob);
            has_globs = true;
        }
    }

    if has_globs {
        let glob_set = glob_builder
            .build()
            .map_err(|e| LinterError::config(format!("Failed to build globset: {}", e)))?;

        for entry in WalkDir::new(base_dir).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let relative = path.strip_prefix(base_dir).unwrap_or(path);
            if glob_set.is_match(relative) || glob_set.is_match(path) {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();

    info!("Discovered {} files to lint", files.len());
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
}
