//! Footnote region parsing.
//!
//! A parenthesised number opens a new entry at the start of the region or of
//! a line. After an entry has been opened, the next number in sequence also
//! opens one mid-line, when preceded by whitespace: `(1) أ (2) ب` is two
//! entries, while `(1) انظر الآية (255)` stays one. Regions without any such
//! boundary are classified and kept whole as the preamble: bare leading digits
//! can't be told apart from ordinary numerals without more context than one
//! page gives us.

use crate::consts;
use crate::models::{FootnoteEntry, FootnoteFormat, Footnotes};
use crate::numerals::parse_digits;
use crate::text::{decode_entities, line_breaks_to_newlines, normalize_whitespace, strip_tags, unwrap_decorative};

/// Parses a footnote region (markup, possibly empty) into entries.
///
/// ```
/// use kitab_extract::{FootnoteFormat, parse_footnotes};
/// let footnotes = parse_footnotes("(1) ـ أول حاشية<br><font color=#be0000>(2)</font> ثانية");
/// assert_eq!(footnotes.format, FootnoteFormat::NumberedParens);
/// assert_eq!(footnotes.entries[0].text, "أول حاشية");
/// assert_eq!(footnotes.entries[1].number, 2);
/// ```
pub fn parse_footnotes(region: &str) -> Footnotes {
    let text = unwrap_decorative(region);
    let text = line_breaks_to_newlines(&text);
    let text = strip_tags(&text);
    let text = decode_entities(&text).replace("\r\n", "\n").replace('\r', "\n");
    if text.trim().is_empty() {
        return Footnotes::default();
    }

    let mut boundaries: Vec<(u32, usize, usize)> = Vec::new();
    for caps in consts::FOOTNOTE_NUMBER.captures_iter(&text) {
        let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(number) = parse_digits(digits.as_str()).filter(|n| *n > 0) else {
            continue;
        };
        let before = &text[..whole.start()];
        let line = before.rsplit('\n').next().unwrap_or_default();
        let at_line_start = line.chars().all(|c| c == ' ' || c == '\t');
        let next_in_sequence = before.ends_with(char::is_whitespace)
            && boundaries.last().is_some_and(|&(previous, _, _)| previous.checked_add(1) == Some(number));
        if at_line_start || next_in_sequence {
            boundaries.push((number, whole.start(), whole.end()));
        }
    }

    let Some(&(_, first_start, _)) = boundaries.first() else {
        let preamble = normalize_whitespace(&text);
        let format = match consts::BARE_NUMBER.is_match(&preamble) {
            true => FootnoteFormat::BareNumber,
            false => FootnoteFormat::Unnumbered,
        };
        return Footnotes { entries: Vec::new(), preamble, format };
    };

    let entries = boundaries
        .iter()
        .enumerate()
        .map(|(i, &(number, _, text_start))| {
            let text_end = boundaries.get(i + 1).map(|&(_, next_start, _)| next_start).unwrap_or(text.len());
            FootnoteEntry::new(number, normalize_whitespace(&text[text_start..text_end]))
        })
        .collect();
    Footnotes {
        entries,
        preamble: normalize_whitespace(&text[..first_start]),
        format: FootnoteFormat::NumberedParens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn entries(footnotes: &Footnotes) -> Vec<(u32, &str)> {
        footnotes.entries.iter().map(|e| (e.number, e.text.as_str())).collect()
    }

    #[test]
    fn empty_region() {
        for region in ["", "   ", "</div></div>", "<div class='footnote'> </div>"] {
            let footnotes = parse_footnotes(region);
            assert_eq!(footnotes.format, FootnoteFormat::None);
            assert!(footnotes.is_empty());
        }
    }

    #[test]
    fn numbered_entries_with_dash_separators() {
        let footnotes = parse_footnotes("(1) ـ أول حاشية<br>(2) ثانية");
        assert_eq!(footnotes.format, FootnoteFormat::NumberedParens);
        assert_eq!(entries(&footnotes), vec![(1, "أول حاشية"), (2, "ثانية")]);
        assert_eq!(footnotes.preamble, "");
    }

    #[rstest]
    #[case("(1) - نص")]
    #[case("(1)ـنص")]
    #[case("(1) – نص")]
    #[case("(1) نص")]
    #[case("(١) نص")]
    fn single_dash_is_stripped(#[case] region: &str) {
        assert_eq!(entries(&parse_footnotes(region)), vec![(1, "نص")]);
    }

    #[test]
    fn only_one_dash_is_stripped() {
        assert_eq!(entries(&parse_footnotes("(1) -- نص")), vec![(1, "- نص")]);
    }

    #[test]
    fn decorated_numbers_are_unwrapped() {
        let region = "<div class='footnote'>(١) الأولى<br><font color=#be0000>(٢)</font> الثانية<br><font color=#be0000>(٣)</font> الثالثة</div></div>";
        let footnotes = parse_footnotes(region);
        assert_eq!(entries(&footnotes), vec![(1, "الأولى"), (2, "الثانية"), (3, "الثالثة")]);
    }

    #[test]
    fn entries_on_one_line() {
        let footnotes = parse_footnotes("(1) ـ أول حاشية (2) ثانية");
        assert_eq!(footnotes.format, FootnoteFormat::NumberedParens);
        assert_eq!(entries(&footnotes), vec![(1, "أول حاشية"), (2, "ثانية")]);
        assert_eq!(footnotes.known_numbers().into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[rstest]
    #[case("(1) أ (2) ب (3) ج", vec![(1, "أ"), (2, "ب"), (3, "ج")])]
    #[case("(1) انظر الآية (255) من السورة", vec![(1, "انظر الآية (255) من السورة")])]
    #[case("(1) أ (3) ب", vec![(1, "أ (3) ب")])]
    #[case("(1) أ(2) ب", vec![(1, "أ(2) ب")])]
    #[case("(٤) أ (٥) ب", vec![(4, "أ"), (5, "ب")])]
    fn mid_line_numbers_split_only_in_sequence(#[case] region: &str, #[case] expected: Vec<(u32, &str)>) {
        assert_eq!(entries(&parse_footnotes(region)), expected);
    }

    #[test]
    fn first_entry_needs_a_line_start() {
        let footnotes = parse_footnotes("تتمة (1) ليست حاشية");
        assert_eq!(footnotes.format, FootnoteFormat::Unnumbered);
        assert!(footnotes.entries.is_empty());
    }

    #[test]
    fn preamble_before_first_entry() {
        let footnotes = parse_footnotes("تتمة من الصفحة السابقة<br>(3) حاشية");
        assert_eq!(footnotes.preamble, "تتمة من الصفحة السابقة");
        assert_eq!(entries(&footnotes), vec![(3, "حاشية")]);
    }

    #[test]
    fn multi_line_entries_are_kept_together() {
        let footnotes = parse_footnotes("(1) سطر أول<br>سطر ثان<br>(2) آخر");
        assert_eq!(entries(&footnotes), vec![(1, "سطر أول\nسطر ثان"), (2, "آخر")]);
    }

    #[test]
    fn duplicate_numbers_are_retained() {
        let footnotes = parse_footnotes("(1) أ<br>(1) ب");
        assert_eq!(entries(&footnotes), vec![(1, "أ"), (1, "ب")]);
        assert_eq!(footnotes.known_numbers().len(), 1);
    }

    #[test]
    fn zero_is_not_a_footnote_number() {
        let footnotes = parse_footnotes("(0) ليس حاشية");
        assert_eq!(footnotes.format, FootnoteFormat::Unnumbered);
        assert!(footnotes.entries.is_empty());
    }

    #[test]
    fn bare_number_is_deferred() {
        let footnotes = parse_footnotes("1 نص بلا قوس");
        assert_eq!(footnotes.format, FootnoteFormat::BareNumber);
        assert!(footnotes.entries.is_empty());
        assert_eq!(footnotes.preamble, "1 نص بلا قوس");
    }

    #[test]
    fn unnumbered_is_deferred() {
        let footnotes = parse_footnotes("<div class='footnote'>حاشية بلا رقم<br>وسطر آخر</div>");
        assert_eq!(footnotes.format, FootnoteFormat::Unnumbered);
        assert!(footnotes.entries.is_empty());
        assert_eq!(footnotes.preamble, "حاشية بلا رقم\nوسطر آخر");
    }

    #[test]
    fn entities_are_decoded() {
        let footnotes = parse_footnotes("(1) أ &amp; ب&nbsp;ج");
        assert_eq!(entries(&footnotes), vec![(1, "أ & ب ج")]);
    }
}
