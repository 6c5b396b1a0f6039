use tracing::debug;

use crate::checking::arithmetic;
use crate::language::{replace_references, Finding};

fn is_time_format(text: &str) -> bool {
    text == "HH:mm:ss"
        || (!text.is_empty()
            && text
                .chars()
                .all(|c| matches!(c, 'H' | 'h' | 'm' | 's' | ':') || c.is_whitespace()))
}

fn has_operator(text: &str) -> bool {
    text.contains(['+', '-', '*', '/', '%'])
}

/// Decide whether the body of a `$math[...]` is a legitimate arithmetic
/// expression. Offsets in the returned findings are relative to the start of
/// `content`; the findings always span all of it.
pub fn validate_math_expression(content: &str) -> Vec<Finding> {
    let width = content.len();

    let unquoted: String = content
        .chars()
        .filter(|c| *c != '"' && *c != '\'')
        .collect();
    let normalized = unquoted.trim();

    if is_time_format(normalized) {
        return vec![Finding::TimeFormatInMath(0, width)];
    }

    let sanitized = replace_references(normalized, "0");
    let sanitized = sanitized.trim();

    if !has_operator(sanitized) {
        if sanitized
            .chars()
            .any(|c| c.is_ascii_alphabetic())
        {
            return vec![Finding::NonMathematicalContent(0, width)];
        }

        if !sanitized.is_empty() && sanitized
            .parse::<f64>()
            .is_ok()
        {
            return vec![Finding::NoMathematicalOperations(0, width)];
        }

        return vec![Finding::InvalidMathExpression(0, width)];
    }

    let expression: String = sanitized
        .chars()
        .filter(|c| c.is_ascii_digit() || "+-*/%.()".contains(*c) || c.is_whitespace())
        .collect();

    match arithmetic::evaluate(&expression) {
        Ok(_) => vec![],
        Err(error) => {
            debug!("Rejected math expression {:?}: {}", expression, error);
            vec![Finding::InvalidMathExpression(0, width)]
        }
    }
}
