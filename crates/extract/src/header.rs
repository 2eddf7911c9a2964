//! Page number extraction and running-header removal.

use crate::consts;
use crate::models::PageNumber;
use crate::numerals::parse_digits;

/// A page block with its running header removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub page_number: PageNumber,
    /// The block with the whole running header (title, page-number label and
    /// decorative rule) cut out.
    pub body: String,
}

/// Extracts the page number from a page block and strips the running header.
///
/// Returns `None` for metadata blocks: blocks with no page-number label, or a
/// label without a digit run. Those are counted as skipped by the caller.
pub fn extract_header(block: &str) -> Option<Header> {
    let label = consts::PAGE_NUMBER_LABEL.captures(block)?;
    let digits = consts::DIGIT_RUN.find(label.get(1)?.as_str())?.as_str();
    let Some(value) = parse_digits(digits) else {
        tracing::debug!(digits, "page number does not fit an integer; treating block as metadata");
        return None;
    };
    let page_number = PageNumber { text: digits.to_string(), value };
    let body = match consts::PAGE_HEAD.find(block) {
        Some(head) => [&block[..head.start()], &block[head.end()..]].concat(),
        // A label outside any header block: drop just the label.
        None => {
            let label = label.get(0)?;
            [&block[..label.start()], &block[label.end()..]].concat()
        },
    };
    Some(Header { page_number, body })
}
