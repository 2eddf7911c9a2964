mod footnote;
mod page;
mod warning;

pub use self::footnote::{FootnoteEntry, FootnoteFormat, Footnotes};
pub use self::page::{ContentType, PageNumber, PageOutcome, ParsedPage, RawLayers};
pub use self::warning::PageWarning;

fn sanitize(s: impl AsRef<str>) -> String {
    s.as_ref().trim().to_lowercase().replace('-', "").replace('_', "").replace(' ', "")
}
