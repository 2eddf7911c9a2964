use super::sanitize;
use crate::error::{Error, ErrorKind};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// A non-fatal anomaly recorded on a page.
///
/// Serialized as a short tag; number-carrying warnings use `tag:number`
/// (e.g. `orphan_footnote:2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageWarning {
    /// Page content is a single embedded image; matn and footnotes were dropped.
    ImageOnly,
    /// A textual page also embeds an image.
    EmbeddedImage,
    /// Another page of the same volume already used this page number.
    DuplicatePageNumber,
    /// A reference was stripped from the matn without a matching footnote.
    OrphanReference(u32),
    /// A footnote has no matching reference on this page (usually continuation).
    OrphanFootnote(u32),
    /// The footnote region is non-empty but was not split into entries.
    UnparsedFootnoteSection,
    /// Text precedes the first numbered footnote.
    FootnotePreamble,
    /// The matn joins an original-text and a commentary sub-layer.
    CommentaryLayer,
}
impl PageWarning {
    /// Returns the tag without any number.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ImageOnly => "image_only",
            Self::EmbeddedImage => "embedded_image",
            Self::DuplicatePageNumber => "duplicate_page_number",
            Self::OrphanReference(_) => "orphan_reference",
            Self::OrphanFootnote(_) => "orphan_footnote",
            Self::UnparsedFootnoteSection => "unparsed_footnote_section",
            Self::FootnotePreamble => "footnote_preamble",
            Self::CommentaryLayer => "commentary_layer",
        }
    }
}
impl Display for PageWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::OrphanReference(n) | Self::OrphanFootnote(n) => write!(f, "{}:{n}", self.tag()),
            _ => write!(f, "{}", self.tag()),
        }
    }
}
impl FromStr for PageWarning {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ErrorKind::ParseError { field: "warning", value: s.to_string() };
        let (tag, number) = match s.split_once(':') {
            Some((tag, number)) => (tag, Some(number.trim().parse::<u32>().map_err(|_| invalid())?)),
            None => (s, None),
        };
        Ok(match (sanitize(tag).as_str(), number) {
            ("imageonly", None) => Self::ImageOnly,
            ("embeddedimage", None) => Self::EmbeddedImage,
            ("duplicatepagenumber", None) => Self::DuplicatePageNumber,
            ("orphanreference", Some(n)) => Self::OrphanReference(n),
            ("orphanfootnote", Some(n)) => Self::OrphanFootnote(n),
            ("unparsedfootnotesection", None) => Self::UnparsedFootnoteSection,
            ("footnotepreamble", None) => Self::FootnotePreamble,
            ("commentarylayer", None) => Self::CommentaryLayer,
            _ => exn::bail!(invalid()),
        })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PageWarning {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PageWarning {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e: Error| serde::de::Error::custom(&*e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PageWarning::ImageOnly, "image_only")]
    #[case(PageWarning::DuplicatePageNumber, "duplicate_page_number")]
    #[case(PageWarning::OrphanReference(4), "orphan_reference:4")]
    #[case(PageWarning::OrphanFootnote(12), "orphan_footnote:12")]
    #[case(PageWarning::CommentaryLayer, "commentary_layer")]
    fn test_display(#[case] warning: PageWarning, #[case] expected: &str) {
        assert_eq!(warning.to_string(), expected);
        assert_eq!(expected.parse::<PageWarning>().unwrap(), warning);
    }

    #[rstest]
    #[case("orphan_footnote")]
    #[case("orphan_footnote:x")]
    #[case("image_only:3")]
    #[case("nonsense")]
    fn test_parse_invalid(#[case] input: &str) {
        assert!(input.parse::<PageWarning>().is_err());
    }
}
