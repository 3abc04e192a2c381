//! Token stream output formats

use crate::args::OutputFormat;
use crate::error::CliError;
use hl_engine::{Token, TokenStream};
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize)]
struct JsonDocument<'a> {
    input: &'a str,
    grammar: &'a str,
    tokens: &'a TokenStream,
}

/// Render one input's stream in `format`
pub fn render(
    format: OutputFormat,
    label: &str,
    grammar: &str,
    stream: &TokenStream,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(render_text(stream)),
        OutputFormat::Tree => Ok(render_tree(stream)),
        OutputFormat::Json => {
            let document = JsonDocument {
                input: label,
                grammar,
                tokens: stream,
            };
            Ok(serde_json::to_string_pretty(&document)?)
        }
    }
}

/// `start..end  category  "lexeme"`, one top-level token per line
pub fn render_text(stream: &TokenStream) -> String {
    let mut out = String::new();
    for token in stream {
        push_line(&mut out, 0, token);
    }
    out
}

/// Every token, children indented under their parent
pub fn render_tree(stream: &TokenStream) -> String {
    let mut out = String::new();
    for (depth, token) in stream.walk() {
        push_line(&mut out, depth, token);
    }
    out
}

fn push_line(out: &mut String, depth: usize, token: &Token) {
    let span = token.span().to_string();
    let label = match token.alias() {
        Some(alias) => format!("{} ({})", token.category_name(), alias),
        None => token.category_name().to_string(),
    };

    // writing to a String cannot fail
    let _ = writeln!(
        out,
        "{:indent$}{:<12} {:<16} {:?}",
        "",
        span,
        label,
        token.lexeme(),
        indent = depth * 2
    );
}
