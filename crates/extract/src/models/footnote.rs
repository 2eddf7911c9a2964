use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use super::sanitize;
use crate::error::{Error, ErrorKind};

/// One numbered footnote on one page.
///
/// Entries are never merged across pages, even when the text obviously
/// continues from the previous page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FootnoteEntry {
    /// Footnote number as printed (always positive)
    pub number: u32,
    /// Footnote text with markup stripped and whitespace normalised
    pub text: String,
}
impl FootnoteEntry {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self { number, text: text.into() }
    }
}
impl<T: Into<String>> From<(u32, T)> for FootnoteEntry {
    fn from((number, text): (u32, T)) -> Self {
        Self::new(number, text)
    }
}

/// How the footnote region of a page is numbered.
///
/// Only [`NumberedParens`](Self::NumberedParens) is split into entries. The
/// other non-empty formats are syntactically ambiguous and the whole region is
/// kept as the preamble for a later stage to resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FootnoteFormat {
    /// `(1) …` entries at the start of a line
    NumberedParens,
    /// Leading bare digits, indistinguishable from ordinary numerals
    BareNumber,
    /// Text with no leading numeral at all
    Unnumbered,
    /// No footnote region on the page
    #[default]
    None,
}
impl FootnoteFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NumberedParens => "numbered_parens",
            Self::BareNumber => "bare_number",
            Self::Unnumbered => "unnumbered",
            Self::None => "none",
        }
    }

    /// Returns `true` for a non-empty region that was not split into entries.
    pub fn is_unparsed(&self) -> bool {
        matches!(self, Self::BareNumber | Self::Unnumbered)
    }
}
impl FromStr for FootnoteFormat {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match sanitize(s).as_str() {
            "numberedparens" | "parens" => Self::NumberedParens,
            "barenumber" | "bare" => Self::BareNumber,
            "unnumbered" => Self::Unnumbered,
            "none" | "" => Self::None,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "footnote_section_format",
                value: s.to_string(),
            }),
        })
    }
}
impl Display for FootnoteFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// The parsed footnote region of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Footnotes {
    /// Entries in region order. Duplicate numbers are kept as they are.
    pub entries: Vec<FootnoteEntry>,
    /// Text before the first entry, or the whole region when it was not split.
    pub preamble: String,
    pub format: FootnoteFormat,
}
impl Footnotes {
    /// The set of footnote numbers present on this page.
    pub fn known_numbers(&self) -> BTreeSet<u32> {
        self.entries.iter().map(|entry| entry.number).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.preamble.is_empty()
    }

    /// Characters of footnote text across all entries.
    pub fn char_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.text.chars().count()).sum()
    }
}
