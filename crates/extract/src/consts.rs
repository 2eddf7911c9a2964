use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

/// One digit of any accepted family: ASCII, Arabic-Indic, Extended Arabic-Indic.
pub(crate) const DIGIT: &str = "[0-9\u{0660}-\u{0669}\u{06F0}-\u{06F9}]";
/// Invisible formatting characters tolerated inside reference parentheses when
/// lenient reference boundaries are enabled.
const INVISIBLE: &str = "\u{200C}\u{200D}\u{200E}\u{200F}\u{061C}\u{FEFF}";
/// `class='Name'`, `class="Name"` or `class=Name`.
macro_rules! class_attr {
    ($name:literal) => {
        concat!(r#"class\s*=\s*["']?"#, $name, r#"["']?"#)
    };
}

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Page wrapper. Segmentation only ever uses the *start* offsets of this marker.
regex!(PAGE_MARKER, concat!(r"(?i)<div\s+", class_attr!("PageText"), r"\s*>"));
pub(crate) static PAGE_MARKER_BYTES: LazyLock<regex::bytes::Regex> =
    LazyLock::new(|| regex::bytes::Regex::new(PAGE_MARKER.as_str()).unwrap());

// Running header. The header never nests another `div`, so a lazy match is safe here.
regex!(PAGE_HEAD, concat!(r"(?is)<div\s+", class_attr!("PageHead"), r"\s*>.*?</div\s*>"));
regex!(PAGE_NUMBER_LABEL, concat!(r"(?is)<span\s+", class_attr!("PageNumber"), r"\s*>(.*?)</span\s*>"));
regex!(DIGIT_RUN, format!("{DIGIT}+").as_str());

// Layer boundaries. The separator is told apart from the header rule (no
// attributes) and the title-page rule (no `align`) by its attributes.
regex!(
    FOOTNOTE_SEPARATOR,
    r#"(?i)<hr\s+(?:width\s*=\s*["']?95["']?\s+align\s*=\s*["']?right["']?|align\s*=\s*["']?right["']?\s+width\s*=\s*["']?95["']?)\s*/?>"#
);
regex!(COMMENTARY_BOUNDARY, concat!(r"(?i)<hr\s*/?>\s*<span\s+", class_attr!("sharh"), r"\s*>"));

// Markup
regex!(DECORATIVE_TAG, r"(?i)</?font(?:\s[^>]*)?>");
regex!(LINE_BREAK_TAG, r"(?i)<br\s*/?>|</p\s*>");
regex!(ANY_TAG, r"(?s)<[^>]*>");
regex!(IMAGE_TAG, r"(?i)<img\b[^>]*>");
regex!(TABLE, r"(?is)<table\b.*?</table\s*>");
regex!(ENTITY, r"&(?:#([0-9]{1,7})|#[xX]([0-9A-Fa-f]{1,6})|([A-Za-z][A-Za-z0-9]{1,31}));");

// Footnotes
// A parenthesised footnote number plus one optional dash-like separator.
// Whether it opens an entry depends on its position (see `footnotes.rs`).
regex!(
    FOOTNOTE_NUMBER,
    format!(r"\(({DIGIT}+)\)[ \t]*(?:[-\u{{0640}}\u{{2013}}][ \t]*)?").as_str()
);
regex!(BARE_NUMBER, format!(r"^{DIGIT}+").as_str());

// References in matn
regex!(REFERENCE, format!(r"\(({DIGIT}+)\)").as_str());
regex!(REFERENCE_LENIENT, format!(r"\([{INVISIBLE}]*({DIGIT}+)[{INVISIBLE}]*\)").as_str());

// Verse
regex!(ASTERISK_SPAN, r"\*[^*\n]+\*");

// Whitespace
regex!(HORIZONTAL_SPACE, r"[ \t\x0B\x0C]+");
regex!(BLANK_RUN, r"\n{3,}");

// Tables
selector!(ROW_SELECTOR, "tr");
selector!(CELL_SELECTOR, "td, th");
