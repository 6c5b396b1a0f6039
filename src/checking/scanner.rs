use tracing::debug;

use crate::catalog::Catalog;
use crate::checking::arguments::check_arguments;
use crate::checking::frame::{Frame, Frames};
use crate::checking::math::validate_math_expression;
use crate::language::{is_sigil, variable_token, Finding};

/// Scan text once, left to right, tracking bracket nesting and validating
/// each variable's arguments as its closing bracket is reached. Never fails:
/// malformed input simply produces more findings.
pub fn scan(text: &str, catalog: &Catalog) -> Vec<Finding> {
    let mut scanner = Scanner::new(text, catalog);
    scanner.run();

    let mut findings = scanner.findings;
    findings.sort_by_key(|finding| finding.offset());

    debug!(
        "Scan found {} problem{}",
        findings.len(),
        if findings.len() == 1 { "" } else { "s" }
    );
    findings
}

struct Scanner<'i, 'c> {
    source: &'i str,
    catalog: &'c Catalog,
    frames: Frames<'i>,
    /// A variable token which, if the next character is `[`, will own the
    /// frame that bracket opens.
    pending: Option<&'i str>,
    findings: Vec<Finding>,
}

impl<'i, 'c> Scanner<'i, 'c> {
    fn new(source: &'i str, catalog: &'c Catalog) -> Scanner<'i, 'c> {
        Scanner {
            source,
            catalog,
            frames: Frames::new(),
            pending: None,
            findings: Vec::new(),
        }
    }

    fn run(&mut self) {
        let source = self.source;
        let mut i = 0;

        while let Some(c) = source[i..]
            .chars()
            .next()
        {
            if is_sigil(c) {
                if let Some(token) = variable_token(&source[i..]) {
                    self.read_reference(i, token);
                    i += token.len();
                    continue;
                }
            }

            match c {
                '[' => {
                    let owner = self
                        .pending
                        .take();
                    self.frames
                        .push(owner, i);
                }
                ']' => {
                    self.pending = None;
                    match self
                        .frames
                        .pop()
                    {
                        Some(frame) => self.close(frame, i),
                        None => {
                            self.findings
                                .push(Finding::UnmatchedClosingBracket(i));
                        }
                    }
                }
                _ => {
                    self.pending = None;
                    self.frames
                        .append(&source[i..i + c.len_utf8()]);
                }
            }

            i += c.len_utf8();
        }

        let frames = std::mem::replace(&mut self.frames, Frames::new());
        for frame in frames.unclosed() {
            self.findings
                .push(Finding::UnclosedBracket(frame.open));
        }
    }

    fn read_reference(&mut self, offset: usize, token: &'i str) {
        self.frames
            .append(token);

        let after = offset + token.len();
        self.pending = if self.source[after..].starts_with('[') {
            Some(token)
        } else {
            None
        };

        if let Some(definition) = self
            .catalog
            .resolve(token)
        {
            if definition.deprecated {
                self.findings
                    .push(Finding::DeprecatedVariable(
                        offset,
                        token.len(),
                        token.to_string(),
                        definition
                            .replaced_by
                            .clone(),
                    ));
            }
        }
    }

    /// Apply the checks belonging to the variable owning a frame, now that its
    /// closing bracket at `close` has been reached.
    fn close(&mut self, frame: Frame<'i>, close: usize) {
        let owner = match frame.owner {
            Some(owner) => owner,
            None => return,
        };

        let raw = &self.source[frame.start..close];
        let width = raw.len();

        if owner == "$math" {
            for finding in validate_math_expression(raw) {
                self.findings
                    .push(finding.shifted(frame.start));
            }
        }

        if let Some(definition) = self
            .catalog
            .resolve(owner)
        {
            if definition.requires_default
                && !frame
                    .content
                    .contains(',')
            {
                self.findings
                    .push(Finding::MissingDefault(
                        frame.start,
                        width,
                        owner.to_string(),
                    ));
            }
        }

        for finding in check_arguments(owner, raw) {
            self.findings
                .push(finding.shifted(frame.start));
        }
    }
}
