//! Input discovery

use crate::error::CliError;
use hl_engine::log_info;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand the command-line paths into the files to tokenize.
///
/// Files named explicitly are always kept. Directories are walked
/// recursively and, when `extension` is given, filtered by it. The files
/// found under each directory are sorted; the command-line order of the
/// arguments is preserved.
pub fn collect_inputs(paths: &[PathBuf], extension: Option<&str>) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let mut found = walk_directory(path, extension)?;
            found.sort();

            log_info!("Directory walked",
                "directory" => path.display(),
                "files_found" => found.len()
            );

            files.extend(found);
        } else {
            return Err(CliError::MissingInput { path: path.clone() });
        }
    }

    Ok(files)
}

fn walk_directory(dir_path: &Path, extension: Option<&str>) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir_path).follow_links(false) {
        let entry = entry.map_err(|e| CliError::Walk {
            path: dir_path.to_path_buf(),
            message: e.to_string(),
        })?;

        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn has_extension(path: &Path, extension: Option<&str>) -> bool {
    match extension {
        None => true,
        Some(wanted) => path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(wanted))
            .unwrap_or(false),
    }
}
