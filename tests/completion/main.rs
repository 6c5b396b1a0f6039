use std::iter::Peekable;
use std::str::Chars;

use firebot_variables::catalog::Catalog;
use firebot_variables::checking::scan;
use firebot_variables::completion::{suggest, Suggestion, SuggestionKind};
use firebot_variables::context::classify;
use firebot_variables::language::{DocumentKind, Finding};

/// Expand a snippet as an editor would if the user accepted every default:
/// `${n:text}` becomes its text, bare tab stops become `1`, and `$0` vanishes.
fn fill(template: &str) -> String {
    let mut result = String::new();
    let mut chars = template
        .chars()
        .peekable();
    fill_into(&mut chars, &mut result, false);
    result
}

fn fill_into(chars: &mut Peekable<Chars>, result: &mut String, nested: bool) {
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    result.push(next);
                }
            }
            '$' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    while chars
                        .peek()
                        .map_or(false, |d| d.is_ascii_digit())
                    {
                        chars.next();
                    }
                    if chars.peek() == Some(&':') {
                        chars.next();
                    }
                    fill_into(chars, result, true);
                } else {
                    let mut digits = String::new();
                    while let Some(&d) = chars.peek() {
                        if !d.is_ascii_digit() {
                            break;
                        }
                        digits.push(d);
                        chars.next();
                    }
                    match digits.as_str() {
                        "" => result.push('$'),
                        "0" => {}
                        _ => result.push('1'),
                    }
                }
            }
            '}' if nested => return,
            _ => result.push(c),
        }
    }
}

fn structural(findings: &[Finding]) -> Vec<&Finding> {
    findings
        .iter()
        .filter(|finding| {
            matches!(
                finding,
                Finding::UnmatchedClosingBracket(_) | Finding::UnclosedBracket(_)
            )
        })
        .collect()
}

fn labels(suggestions: &[Suggestion]) -> Vec<&str> {
    suggestions
        .iter()
        .map(|s| s.label.as_str())
        .collect()
}

#[test]
fn filling_templates() {
    assert_eq!(fill("\\$arg${1:[$2]}$0"), "$arg[1]");
    assert_eq!(
        fill("\\$ensureNumber[${1:value}, ${2:default}]"),
        "$ensureNumber[value, default]"
    );
    assert_eq!(fill("\\$user"), "$user");
}

#[test]
fn every_catalog_template_is_balanced() {
    let catalog = Catalog::embedded();
    let context = classify("<style>a { width: ", 18, DocumentKind::Markup);
    assert!(context.in_style_context);

    let suggestions = suggest(&context, &catalog);
    assert!(suggestions.len() > catalog.len());

    for suggestion in &suggestions {
        let text = fill(&suggestion.insert_template);
        let findings = scan(&text, &catalog);
        assert_eq!(
            structural(&findings),
            Vec::<&Finding>::new(),
            "{} expanded to {:?}",
            suggestion.label,
            text
        );
    }
}

#[test]
fn nested_templates_are_balanced() {
    let catalog = Catalog::embedded();

    for parent in ["$math", "$customVariable", "$presetListArg"] {
        let prefix = format!("Value: {}[", parent);
        let context = classify(&prefix, prefix.len(), DocumentKind::Script);
        let suggestions = suggest(&context, &catalog);

        let nested: Vec<_> = suggestions
            .iter()
            .filter(|s| s.rank == 0)
            .collect();
        assert!(!nested.is_empty(), "no templates for {}", parent);

        for suggestion in nested {
            let text = format!("{}{}]", prefix, fill(&suggestion.insert_template));
            let findings = scan(&text, &catalog);
            assert_eq!(structural(&findings), Vec::<&Finding>::new(), "{:?}", text);
        }
    }
}

#[test]
fn math_templates_are_arithmetic() {
    let catalog = Catalog::embedded();
    let prefix = "$math[";
    let context = classify(prefix, prefix.len(), DocumentKind::Script);

    for suggestion in suggest(&context, &catalog)
        .iter()
        .filter(|s| s.rank == 0)
    {
        let body = fill(&suggestion.insert_template).replace("value", "");
        let text = format!("$math[{}]", body);
        assert_eq!(scan(&text, &catalog), vec![], "{:?}", text);
    }
}

#[test]
fn top_level_suggestions() {
    let catalog = Catalog::embedded();
    let text = "Hello $";
    let context = classify(text, text.len(), DocumentKind::Script);
    assert!(!context.is_nested);

    let suggestions = suggest(&context, &catalog);
    let variables = suggestions
        .iter()
        .filter(|s| s.kind == SuggestionKind::Variable)
        .count();
    assert_eq!(variables, catalog.len());

    let user = suggestions
        .iter()
        .find(|s| s.label == "$user")
        .expect("$user offered");
    assert_eq!(user.insert_template, "\\$user");
    assert!(user
        .documentation
        .starts_with("**$user**"));

    let deprecated = suggestions
        .iter()
        .find(|s| s.label == "$rawArgArray")
        .expect("$rawArgArray offered");
    assert!(deprecated.deprecated);
}

#[test]
fn inside_math() {
    let catalog = Catalog::embedded();
    let text = "Points: $math[";
    let context = classify(text, text.len(), DocumentKind::Script);

    assert!(context.is_nested);
    assert!(context.in_math);
    assert_eq!(context.parent_variable.as_deref(), Some("$math"));

    let suggestions = suggest(&context, &catalog);
    assert_eq!(
        labels(&suggestions),
        vec!["Basic Math", "Complex Math", "Math Addition", "Date-based Filename"]
    );
}

#[test]
fn ordering_by_sort_text() {
    let catalog = Catalog::embedded();
    let text = "$customVariable[";
    let context = classify(text, text.len(), DocumentKind::Script);

    let mut suggestions = suggest(&context, &catalog);
    suggestions.sort_by_key(|s| s.sort_text());
    assert_eq!(
        labels(&suggestions),
        vec!["Array Index", "Object Path", "Date-based Filename", "Math Addition"]
    );
}
