use firebot_variables::catalog::Catalog;
use firebot_variables::checking::scan;
use firebot_variables::language::{Finding, Severity};

const BALANCED: [&str; 8] = [
    "",
    "Hello $user!",
    "Hello $user, you have $currency[points, $user] points",
    "$math[$arg[1] * 2]",
    "$ensureNumber[$math[$arg[1] + $arg[2]], 0]",
    "$arrayElement[[1, 2, 3], 0]",
    "$if[$arg[1] == yes, $customVariable[greeting], $customVariable[farewell]]",
    "Followers: $$followers and output $&lastResult",
];

#[test]
fn balanced_text_has_no_findings() {
    let catalog = Catalog::embedded();

    for text in BALANCED {
        assert_eq!(scan(text, &catalog), vec![], "text {:?}", text);
    }
}

#[test]
fn one_excess_closing_bracket() {
    let catalog = Catalog::embedded();

    for text in BALANCED {
        for extra in [0, text.len()] {
            if !text.is_char_boundary(extra) {
                continue;
            }
            let mut broken = text.to_string();
            broken.insert(extra, ']');

            let findings = scan(&broken, &catalog);
            assert_eq!(findings.len(), 1, "text {:?}", broken);

            let finding = &findings[0];
            assert_eq!(finding.severity(), Severity::Error);
            assert_eq!(finding.width(), 1);
            assert_eq!(finding.offset(), extra);
            assert_eq!(finding.message(), "Unmatched closing bracket");
        }
    }
}

#[test]
fn every_excess_bracket_reported() {
    let catalog = Catalog::embedded();
    let findings = scan("] $user ]]", &catalog);
    assert_eq!(
        findings,
        vec![
            Finding::UnmatchedClosingBracket(0),
            Finding::UnmatchedClosingBracket(8),
            Finding::UnmatchedClosingBracket(9),
        ]
    );
}

#[test]
fn unclosed_brackets_reported_at_opening() {
    let catalog = Catalog::embedded();
    let findings = scan("Total: $math[$arg[1] + 2", &catalog);
    assert_eq!(findings, vec![Finding::UnclosedBracket(12)]);
    assert_eq!(findings[0].severity(), Severity::Error);
}

#[test]
fn scanning_is_repeatable() {
    let catalog = Catalog::embedded();
    let text = "] $math[hello] $ensureNumber[5] $readFile[../secret.txt] $rawArgArray";

    let first = scan(text, &catalog);
    let second = scan(text, &catalog);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn multibyte_text_is_handled() {
    let catalog = Catalog::embedded();
    assert_eq!(scan("Grüße $user 🎉 $math[1 + 1]", &catalog), vec![]);

    let findings = scan("🎉]", &catalog);
    assert_eq!(findings, vec![Finding::UnmatchedClosingBracket(4)]);
}

#[test]
fn deprecated_variables_warned() {
    let catalog = Catalog::embedded();
    let findings = scan("Args: $rawArgArray", &catalog);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity(), Severity::Warning);
    assert_eq!(findings[0].offset(), 6);
    assert_eq!(findings[0].width(), "$rawArgArray".len());
    assert_eq!(
        findings[0].message(),
        "$rawArgArray is deprecated, use $argArray instead"
    );
}

#[test]
fn deep_bracket_nesting() {
    let catalog = Catalog::embedded();

    let balanced = format!("{}{}", "[".repeat(200_000), "]".repeat(200_000));
    assert_eq!(scan(&balanced, &catalog), vec![]);

    let unclosed = "[".repeat(100_000);
    let findings = scan(&unclosed, &catalog);
    assert_eq!(findings.len(), 100_000);
    assert_eq!(findings[0], Finding::UnclosedBracket(0));
    assert_eq!(findings[99_999], Finding::UnclosedBracket(99_999));

    let nested = format!("{}1 + 1{}", "$math[".repeat(1_000), "]".repeat(1_000));
    let findings = scan(&nested, &catalog);
    assert_eq!(findings.len(), 999);
    assert!(findings
        .iter()
        .all(|finding| matches!(finding, Finding::NoMathematicalOperations(..))));
}

#[test]
fn adjacent_references_split_at_sigil() {
    let catalog = Catalog::embedded();
    assert_eq!(scan("$user$math[1 + 1]", &catalog), vec![]);
    assert_eq!(
        scan("$user$math[hello]", &catalog),
        vec![Finding::NonMathematicalContent(11, 5)]
    );
}
