use firebot_variables::language::{Finding, LoadingError, Severity};
use owo_colors::OwoColorize;
use std::path::Path;

fn label(severity: Severity) -> String {
    match severity {
        Severity::Error => "error"
            .bright_red()
            .to_string(),
        Severity::Warning => "warning"
            .bright_yellow()
            .to_string(),
        Severity::Info => "info"
            .bright_blue()
            .to_string(),
    }
}

/// Format a finding with the offending line of source and a marker under
/// the span.
pub fn full_finding<'i>(finding: &Finding, filename: &'i Path, source: &'i str) -> String {
    let offset = finding.offset();

    let i = calculate_line_number(source, offset);
    let j = calculate_column_number(source, offset);

    let code = source
        .lines()
        .nth(i)
        .unwrap_or("?");
    let line = i + 1;
    let column = j + 1;
    let width = 3.max(
        line.to_string()
            .len(),
    );

    // keep the marker on the line even when the span runs past its end
    let remaining = code
        .chars()
        .count()
        .saturating_sub(j);
    let underline = "^".repeat(
        finding
            .width()
            .clamp(1, remaining.max(1)),
    );
    let (first, rest) = underline.split_at(1);

    format!(
        r#"
{}: {}:{}:{} {}

{:width$} {}
{:width$} {} {}
{:width$} {} {:>column$}{}
        "#,
        label(finding.severity()),
        filename.to_string_lossy(),
        line,
        column,
        finding
            .message()
            .bold(),
        ' ',
        '|'.bright_blue(),
        line.bright_blue(),
        '|'.bright_blue(),
        code,
        ' ',
        '|'.bright_blue(),
        first.bright_red(),
        rest.bright_red(),
    )
    .trim_ascii()
    .to_string()
}

/// Format a finding with concise single-line output
pub fn concise_finding<'i>(finding: &Finding, filename: &'i Path, source: &'i str) -> String {
    let offset = finding.offset();
    let line = calculate_line_number(source, offset) + 1;
    let column = calculate_column_number(source, offset) + 1;

    format!(
        "{}: {}:{}:{} {}",
        label(finding.severity()),
        filename.to_string_lossy(),
        line,
        column,
        finding
            .message()
            .bold(),
    )
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    format!(
        "{}: {}:{}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .problem
            .bold()
    )
}

fn clamp(content: &str, offset: usize) -> usize {
    let mut offset = offset.min(content.len());
    while !content.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Zero-origin line containing the given byte offset.
pub fn calculate_line_number(content: &str, offset: usize) -> usize {
    let offset = clamp(content, offset);
    content[..offset]
        .bytes()
        .filter(|&b| b == b'\n')
        .count()
}

/// Zero-origin column, in characters, of the given byte offset.
pub fn calculate_column_number(content: &str, offset: usize) -> usize {
    let offset = clamp(content, offset);
    let before = &content[..offset];
    match before.rfind('\n') {
        Some(start) => content[start + 1..offset]
            .chars()
            .count(),
        None => before
            .chars()
            .count(),
    }
}
