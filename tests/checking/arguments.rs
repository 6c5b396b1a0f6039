use firebot_variables::catalog::Catalog;
use firebot_variables::checking::scan;
use firebot_variables::language::{Finding, Severity};

#[test]
fn safe_paths() {
    let catalog = Catalog::embedded();

    for text in [
        "$readFile[data/quotes.txt]",
        "$readFile[C:\\Firebot\\quotes.txt]",
        "$fileExists[\"D:/sounds/$arg[1].mp3\"]",
        "$readFile[https://example.com/list.txt?raw=1]",
        "$fileLineCount[$customVariable[path]]",
    ] {
        assert_eq!(scan(text, &catalog), vec![], "text {:?}", text);
    }
}

#[test]
fn parent_directory() {
    let catalog = Catalog::embedded();
    let findings = scan("$readFile[../secret.txt]", &catalog);
    assert_eq!(findings, vec![Finding::ParentDirectoryPath(10, 13)]);
    assert_eq!(findings[0].severity(), Severity::Warning);
}

#[test]
fn invalid_path_characters() {
    let catalog = Catalog::embedded();

    let findings = scan("$fileExists[data|file.txt]", &catalog);
    assert_eq!(findings, vec![Finding::InvalidPathCharacters(12, 13)]);
    assert_eq!(findings[0].severity(), Severity::Error);

    let findings = scan("$audioDuration[sounds/a:b.mp3]", &catalog);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].message(), "Path contains invalid characters");
}

#[test]
fn valid_patterns() {
    let catalog = Catalog::embedded();

    for text in [
        "$regexTest[$user, ^[a-z]+$]",
        "$regexTest[$user, (?<=a)b]",
        "$regexExec[$chatMessage, (\\w+)\\s\\1, gi]",
        "$regexMatches[$chatMessage, $arg[1], g]",
        "$replace[$chatMessage, (abc, x]",
        "$replace[$chatMessage, (abc, x, false]",
        "$replace[$chatMessage, a+, b, true, gi]",
    ] {
        assert_eq!(scan(text, &catalog), vec![], "text {:?}", text);
    }
}

#[test]
fn invalid_pattern() {
    let catalog = Catalog::embedded();

    let findings = scan("$regexTest[$user, (abc]", &catalog);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].offset(), 18);
    assert_eq!(findings[0].width(), 4);
    assert!(findings[0]
        .message()
        .starts_with("Invalid regex pattern: "));

    let findings = scan("$replace[$user, (abc, x, true]", &catalog);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].offset(), 16);
}

#[test]
fn unclosed_lookahead() {
    let catalog = Catalog::embedded();
    let findings = scan("$regexTest[$user, a(?=b]", &catalog);
    assert_eq!(findings, vec![Finding::UnclosedLookahead(18, 5)]);
    assert_eq!(findings[0].message(), "Unclosed look-ahead");
}

#[test]
fn invalid_flags() {
    let catalog = Catalog::embedded();

    let findings = scan("$regexMatches[$user, a+, gg]", &catalog);
    assert_eq!(findings, vec![Finding::InvalidRegexFlags(25, 2, "gg".to_string())]);

    let findings = scan("$regexTest[$user, a+, x]", &catalog);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].message(), "Invalid regex flags 'x'");
}
