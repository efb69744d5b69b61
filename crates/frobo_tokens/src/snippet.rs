//! Renders diagnostics against the source text they were found in

use crate::Diagnostic;
use itertools::Itertools;
use std::fmt::Write;

/// How severe a rendered diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single line of source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub line: usize,
    pub src: String,
}

/// Reads lines surrounding some base line
#[derive(Debug, Clone, Copy)]
pub struct LineReader {
    before: usize,
    after: usize,
}

impl LineReader {
    /// Creates a new line reader that gets `before` number of lines before a line and `after`
    /// number of lines after.
    pub fn new(before: usize, after: usize) -> Self {
        Self { before, after }
    }

    /// Gets the lines around the 1-based `base_line`. Lines outside the source are skipped.
    pub fn lines(&self, source: &str, base_line: usize) -> Vec<Line> {
        let first = base_line.saturating_sub(self.before).max(1);
        let last = base_line + self.after;
        source
            .split('\n')
            .enumerate()
            .map(|(idx, src)| Line {
                line: idx + 1,
                src: src.trim_end_matches('\r').to_string(),
            })
            .filter(|line| line.line >= first && line.line <= last)
            .collect()
    }
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new(2, 2)
    }
}

/// Renders a diagnostic, pointing at its location within `source`. `origin` names where the source
/// came from, usually a path.
pub fn render_diagnostic(
    source: &str,
    origin: &str,
    severity: Severity,
    diagnostic: &dyn Diagnostic,
) -> String {
    let mut buffer = String::new();
    // writing into a String can not fail
    let _ = render_into(&mut buffer, source, origin, severity, diagnostic);
    buffer
}

fn render_into(
    f: &mut String,
    source: &str,
    origin: &str,
    severity: Severity,
    diagnostic: &dyn Diagnostic,
) -> std::fmt::Result {
    let location = diagnostic.location();
    writeln!(f, "{severity}: {}", diagnostic.message())?;
    writeln!(
        f,
        "  -> {origin}:{}:{}",
        location.line(),
        location.column()
    )?;
    let lines = LineReader::default().lines(source, location.line());
    let width = lines
        .iter()
        .map(|line| line.line.to_string().len())
        .max()
        .unwrap_or(1);
    for line in &lines {
        writeln!(f, "{:>width$} | {}", line.line, line.src.trim_end())?;
        if line.line == location.line() {
            let col = location.column().saturating_sub(1);
            let available = line.src.chars().count().saturating_sub(col);
            let len = location.len().min(available).max(1);
            writeln!(
                f,
                "{}{}{}",
                " ".repeat(width + 3),
                " ".repeat(col),
                "~".repeat(len)
            )?;
        }
    }
    if let Some(suggestion) = diagnostic.suggestion() {
        writeln!(f, "  help: {suggestion}")?;
    }
    Ok(())
}

/// Renders every diagnostic, separated by blank lines
pub fn render_all<'a, D: Diagnostic + 'a>(
    source: &str,
    origin: &str,
    severity: Severity,
    diagnostics: impl IntoIterator<Item = &'a D>,
) -> String {
    diagnostics
        .into_iter()
        .map(|d| render_diagnostic(source, origin, severity, d))
        .join("\n")
}
