//! Parallel tokenization of input files

use crate::error::CliError;
use hl_engine::logging::codes;
use hl_engine::{log_error, log_info, TokenStream};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

/// Outcome for one input
#[derive(Debug)]
pub struct FileReport {
    /// Path, or `<stdin>`
    pub label: String,
    pub result: Result<TokenStream, CliError>,
}

impl FileReport {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Tokenize text that did not come from a file
pub fn tokenize_text(label: &str, text: &str, grammar: &str) -> FileReport {
    FileReport {
        label: label.to_string(),
        result: hl_engine::tokenize(text, grammar).map_err(CliError::from),
    }
}

fn tokenize_file(path: &Path, grammar: &str) -> FileReport {
    let result = fs::read_to_string(path)
        .map_err(|e| CliError::io(path, e))
        .and_then(|text| hl_engine::tokenize(&text, grammar).map_err(CliError::from));

    if let Err(err) = &result {
        log_error!(err.error_code(), "Failed to tokenize input",
            "path" => path.display(),
            "error" => err
        );
    }

    FileReport {
        label: path.display().to_string(),
        result,
    }
}

/// Tokenize `files` on up to `max_threads` scoped workers.
///
/// Reports come back in the order of `files`.
pub fn tokenize_files(files: &[PathBuf], grammar: &str, max_threads: usize) -> Vec<FileReport> {
    if files.is_empty() {
        return Vec::new();
    }

    let start = Instant::now();
    let chunk_size = calculate_chunk_size(files.len(), max_threads);

    let reports: Vec<FileReport> = thread::scope(|scope| {
        let handles: Vec<_> = files
            .chunks(chunk_size)
            .map(|chunk| {
                let handle = scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|path| tokenize_file(path, grammar))
                        .collect::<Vec<_>>()
                });
                (chunk, handle)
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|(chunk, handle)| {
                handle.join().unwrap_or_else(|_| {
                    log_error!(codes::system::INTERNAL_ERROR, "Worker thread panicked",
                        "files" => chunk.len()
                    );
                    chunk
                        .iter()
                        .map(|path| FileReport {
                            label: path.display().to_string(),
                            result: Err(CliError::WorkerFailed { path: path.clone() }),
                        })
                        .collect()
                })
            })
            .collect()
    });

    let failures = reports.iter().filter(|report| !report.is_success()).count();
    log_info!("Batch tokenization finished",
        "files" => reports.len(),
        "failures" => failures,
        "workers" => (files.len() + chunk_size - 1) / chunk_size,
        "duration_ms" => start.elapsed().as_millis()
    );

    reports
}

fn calculate_chunk_size(file_count: usize, max_threads: usize) -> usize {
    let threads = max_threads.clamp(1, file_count.max(1));
    ((file_count + threads - 1) / threads).max(1)
}
