use firebot_variables::catalog::Catalog;
use firebot_variables::checking::scan;
use firebot_variables::language::{Finding, Severity};

#[test]
fn missing_default_warned_once() {
    let catalog = Catalog::embedded();

    for content in ["5", "$arg[1]", "$currency[points, $user]", "", "$math[1 + 2]"] {
        let text = format!("$ensureNumber[{}]", content);
        let findings: Vec<Finding> = scan(&text, &catalog)
            .into_iter()
            .filter(|finding| matches!(finding, Finding::MissingDefault(..)))
            .collect();

        assert_eq!(findings.len(), 1, "text {:?}", text);
        assert_eq!(findings[0].severity(), Severity::Warning);
        assert_eq!(findings[0].offset(), 14);
        assert_eq!(findings[0].width(), content.len());
        assert_eq!(
            findings[0].message(),
            "$ensureNumber requires a default value"
        );
    }
}

#[test]
fn default_present() {
    let catalog = Catalog::embedded();

    for text in [
        "$ensureNumber[5, 0]",
        "$ensureNumber[$arg[1], 10]",
        "$ensureNumber[$currency[points, $user], 0]",
        "width: $ensureNumber[$arg[2], 50]px;",
    ] {
        assert_eq!(scan(text, &catalog), vec![], "text {:?}", text);
    }
}

#[test]
fn other_variables_need_no_default() {
    let catalog = Catalog::embedded();
    assert_eq!(scan("$arg[1] $customVariable[name]", &catalog), vec![]);
}
