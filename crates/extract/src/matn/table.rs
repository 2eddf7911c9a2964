//! Rendering embedded tables as pipe-separated text.

use std::borrow::Cow;

use regex::Captures;
use scraper::Html;

use crate::consts;
use crate::text::escape_markup;

/// Replaces every `<table>` in place with its text rendering.
///
/// Rows become lines and cells are joined with ` | ` in right-to-left reading
/// order, i.e. the rightmost (last in source order) cell comes first. The
/// rendering is re-escaped so the later tag-stripping pass can't mistake cell
/// text for markup. Returns the rewritten markup and whether any table was
/// found.
pub(crate) fn render_tables(markup: &str) -> (Cow<'_, str>, bool) {
    if !consts::TABLE.is_match(markup) {
        return (Cow::Borrowed(markup), false);
    }
    let rendered =
        consts::TABLE.replace_all(markup, |caps: &Captures| format!("\n{}\n", escape_markup(&render_table(&caps[0]))));
    (rendered, true)
}

fn render_table(table: &str) -> String {
    let fragment = Html::parse_fragment(table);
    fragment
        .select(&consts::ROW_SELECTOR)
        .map(|row| {
            let mut cells: Vec<String> = row
                .select(&consts::CELL_SELECTOR)
                .map(|cell| cell.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" "))
                .collect();
            cells.reverse();
            cells.join(" | ")
        })
        .filter(|row| !row.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
