//! Validation of variable expressions embedded in a document

use std::path::Path;
use tracing::debug;

use crate::catalog::Catalog;
use crate::language::{DocumentKind, Finding, LoadingError};

mod arguments;
mod arithmetic;
pub(crate) mod frame;
mod math;
mod scanner;
mod style;

pub use math::validate_math_expression;
pub use scanner::scan;
pub use style::check_style;
pub(crate) use style::style_regions;

/// Read a document into an owned String.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    std::fs::read_to_string(filename).map_err(|error| {
        debug!(?error);
        LoadingError::from_io(filename, &error)
    })
}

/// Produce every finding for a whole document: the structural and semantic
/// scan, plus the style checks which apply to stylesheets and to the
/// `<style>` elements of markup.
pub fn check(text: &str, kind: DocumentKind, catalog: &Catalog) -> Vec<Finding> {
    let mut findings = scan(text, catalog);

    match kind {
        DocumentKind::Stylesheet => {
            findings.extend(check_style(text));
        }
        DocumentKind::Markup => {
            for region in style_regions(text) {
                let start = region.start;
                for finding in check_style(&text[region]) {
                    findings.push(finding.shifted(start));
                }
            }
        }
        DocumentKind::Script => {}
    }

    findings.sort_by_key(|finding| finding.offset());
    findings
}
