use firebot_variables::catalog::Catalog;
use firebot_variables::checking::{scan, validate_math_expression};
use firebot_variables::language::{Finding, Severity};

fn only(content: &str) -> Finding {
    let mut findings = validate_math_expression(content);
    assert_eq!(findings.len(), 1, "content {:?}", content);
    findings.remove(0)
}

#[test]
fn arithmetic_passes() {
    assert_eq!(validate_math_expression("2 + 2"), vec![]);
    assert_eq!(validate_math_expression("(1 + 2) * 3 / 4 - 5 % 2"), vec![]);
    assert_eq!(validate_math_expression("2 ** 3"), vec![]);
    assert_eq!(validate_math_expression("-4 + +2"), vec![]);
    assert_eq!(validate_math_expression("1 / 0"), vec![]);
}

#[test]
fn references_are_substituted() {
    assert_eq!(validate_math_expression("$arg[1] * 2"), vec![]);
    assert_eq!(validate_math_expression("$currency[points, $user] + $count"), vec![]);
    assert_eq!(validate_math_expression("\"$arg[1]\" + 1"), vec![]);
}

#[test]
fn time_format() {
    let finding = only("HH:mm:ss");
    assert_eq!(finding.severity(), Severity::Error);
    assert_eq!(
        finding.message(),
        "Time format string should not be wrapped in $math[]"
    );
}

#[test]
fn words() {
    let finding = only("hello");
    assert_eq!(finding.severity(), Severity::Error);
    assert!(finding
        .message()
        .contains("non-mathematical characters"));
}

#[test]
fn lone_number() {
    let finding = only("42");
    assert_eq!(finding.severity(), Severity::Warning);
    assert_eq!(finding.message(), "No mathematical operations found in $math[]");

    let finding = only("$arg[1]");
    assert_eq!(finding.severity(), Severity::Warning);
}

#[test]
fn malformed() {
    for content in ["5 * (3 + 2", "2 +", "* 3", "1 ++ 2", "", "()"] {
        let finding = only(content);
        assert_eq!(finding.severity(), Severity::Error, "content {:?}", content);
        assert_eq!(finding.message(), "Invalid mathematical expression");
    }
}

#[test]
fn findings_span_the_frame_content() {
    let catalog = Catalog::embedded();
    let text = "Points: $math[hello]";
    assert_eq!(scan(text, &catalog), vec![Finding::NonMathematicalContent(14, 5)]);

    let text = "$math[$math[2]]";
    assert_eq!(scan(text, &catalog), vec![
        Finding::NoMathematicalOperations(6, 8),
        Finding::NoMathematicalOperations(12, 1),
    ]);
}

#[test]
fn deeply_nested_expressions_are_rejected() {
    let catalog = Catalog::embedded();

    let parentheses = format!("{}1{} + 1", "(".repeat(200_000), ")".repeat(200_000));
    let finding = only(&parentheses);
    assert_eq!(finding.message(), "Invalid mathematical expression");

    let text = format!("$math[{}]", parentheses);
    assert_eq!(
        scan(&text, &catalog),
        vec![Finding::InvalidMathExpression(6, parentheses.len())]
    );

    let signs = format!("{}1 + 1", "- ".repeat(200_000));
    let finding = only(&signs);
    assert_eq!(finding.severity(), Severity::Error);
}

#[test]
fn moderate_nesting_is_fine() {
    let expression = format!("{}1 + 2{} * 3", "(".repeat(50), ")".repeat(50));
    assert_eq!(validate_math_expression(&expression), vec![]);
}
