//! # hl
//!
//! Tokenize files, directories or stdin with a registered grammar and dump
//! the token stream.

use clap::Parser;
use hl_cli::render::render;
use hl_cli::{collect_inputs, tokenize_files, tokenize_text, Cli, CliError, FileReport};
use hl_engine::{log_error, log_info, logging};
use std::io::{self, Read, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_global_logging() {
        eprintln!("Logging initialization failed: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            eprintln!("{} input(s) failed", failures);
            ExitCode::FAILURE
        }
        Err(err) => {
            log_error!(err.error_code(), "hl failed", "error" => &err);
            eprintln!("Error: {}", err);
            ExitCode::from(2)
        }
    }
}

/// Returns the number of inputs that failed
fn run(cli: &Cli) -> Result<usize, CliError> {
    if cli.list_grammars {
        for name in hl_engine::grammar_names() {
            println!("{}", name);
        }
        return Ok(0);
    }

    log_info!("hl starting",
        "grammar" => &cli.grammar,
        "inputs" => cli.inputs.len()
    );

    let reports = if cli.inputs.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| CliError::io("<stdin>", e))?;
        vec![tokenize_text("<stdin>", &text, &cli.grammar)]
    } else {
        let files = collect_inputs(&cli.inputs, cli.extension())?;
        tokenize_files(&files, &cli.grammar, cli.worker_threads())
    };

    print_reports(cli, &reports)
}

fn print_reports(cli: &Cli, reports: &[FileReport]) -> Result<usize, CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let show_headers = reports.len() > 1;
    let mut failures = 0;

    for report in reports {
        let stream = match &report.result {
            Ok(stream) => stream,
            Err(err) => {
                eprintln!("{}: {}", report.label, err);
                failures += 1;
                continue;
            }
        };

        let merged;
        let stream = if cli.merge_plain {
            merged = stream.merge_plain();
            &merged
        } else {
            stream
        };

        let rendered = render(cli.format, &report.label, &cli.grammar, stream)?;
        let written = if show_headers && cli.format != hl_cli::OutputFormat::Json {
            writeln!(out, "==> {} <==", report.label).and_then(|_| write!(out, "{}", rendered))
        } else {
            writeln!(out, "{}", rendered.trim_end_matches('\n'))
        };
        written.map_err(|e| CliError::io("<stdout>", e))?;
    }

    Ok(failures)
}
