use std::ops::Range;

use crate::language::{bracketed_length, is_sigil, variable_token, Finding};

const UNITS: [&str; 3] = ["px", "em", "%"];

/// Warn about CSS declarations whose value mixes a variable with a unit but
/// never puts the unit directly after a variable's argument list, as in
/// `width: $arg[1] px;`.
pub fn check_style(text: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    for declaration in crate::regex!(r"[a-zA-Z-]+:\s*\$[^;]+;").find_iter(text) {
        let value = declaration.as_str();

        if UNITS
            .iter()
            .any(|unit| value.contains(unit))
            && !has_attached_unit(value)
        {
            findings.push(Finding::MissingCssUnit(declaration.start(), value.len()));
        }
    }

    findings
}

/// Whether some `$name[...]` in `value`, its argument list nested to any
/// depth, is immediately followed by a unit.
fn has_attached_unit(value: &str) -> bool {
    let mut i = 0;

    while let Some(c) = value[i..]
        .chars()
        .next()
    {
        if is_sigil(c) {
            if let Some(token) = variable_token(&value[i..]) {
                i += token.len();

                let mut bracketed = false;
                while value[i..].starts_with('[') {
                    i += bracketed_length(&value[i..]);
                    bracketed = true;
                }

                if bracketed
                    && UNITS
                        .iter()
                        .any(|unit| value[i..].starts_with(unit))
                {
                    return true;
                }
                continue;
            }
        }

        i += c.len_utf8();
    }

    false
}

/// Spans of `<style>` elements in a markup document, from the opening tag up
/// to the closing tag (or the end of the text if it is never closed).
pub(crate) fn style_regions(text: &str) -> Vec<Range<usize>> {
    let mut regions = Vec::new();
    let mut from = 0;

    while let Some(i) = text[from..].find("<style") {
        let start = from + i;
        let end = match text[start..].find("</style>") {
            Some(j) => start + j,
            None => text.len(),
        };

        regions.push(start..end);

        if end >= text.len() {
            break;
        }
        from = end + 1;
    }

    regions
}
