//! Verse detection heuristic.

use crate::consts;
use crate::text::{strip_tags, visible_len};

/// The hemistich separator.
const HEMISTICH: char = '…';
/// Minimum non-whitespace characters on each side of the separator.
const MIN_HEMISTICH_LEN: usize = 5;
/// "etc." idioms. A separator followed by one of these truncates prose.
const ETC_IDIOMS: &[&str] = &["إلخ", "الخ", "إلى آخره", "الى آخره", "إلى آخر", "الى آخر"];

/// Returns `true` if the (not yet stripped) matn markup looks like it contains verse.
///
/// Either an asterisk-delimited span, or the hemistich separator with at
/// least five visible characters on both sides, where the right side does not
/// open with an "etc." idiom. Both must sit on a single line: `<br>` ends one.
pub(crate) fn has_verse(markup: &str) -> bool {
    consts::LINE_BREAK_TAG
        .split(markup)
        .flat_map(|chunk| chunk.split('\n'))
        .any(|line| consts::ASTERISK_SPAN.is_match(line) || is_verse_line(line))
}

fn is_verse_line(line: &str) -> bool {
    let line = strip_tags(line);
    line.match_indices(HEMISTICH).any(|(at, separator)| {
        let (left, right) = (&line[..at], &line[at + separator.len()..]);
        visible_len(left) >= MIN_HEMISTICH_LEN
            && visible_len(right) >= MIN_HEMISTICH_LEN
            && !ETC_IDIOMS.iter().any(|idiom| right.trim_start().starts_with(idiom))
    })
}
