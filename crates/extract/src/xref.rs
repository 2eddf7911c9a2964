//! Cross-checking matn references against footnote numbers.

use std::collections::BTreeSet;

use crate::models::PageWarning;

/// Mismatches between the references stripped from a page's matn and the
/// footnotes found on the same page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossReference {
    /// Stripped references with no footnote entry. The stripping guard makes
    /// these impossible in practice; they are still checked.
    pub orphan_references: Vec<u32>,
    /// Footnotes with no reference on this page. Common: the reference is on
    /// the previous page and the note continues here. Never auto-joined.
    pub orphan_footnotes: Vec<u32>,
}
impl CrossReference {
    pub fn is_clean(&self) -> bool {
        self.orphan_references.is_empty() && self.orphan_footnotes.is_empty()
    }

    pub fn warnings(&self) -> impl Iterator<Item = PageWarning> + '_ {
        let references = self.orphan_references.iter().map(|n| PageWarning::OrphanReference(*n));
        let footnotes = self.orphan_footnotes.iter().map(|n| PageWarning::OrphanFootnote(*n));
        references.chain(footnotes)
    }
}

/// Compares stripped reference numbers with the known footnote numbers.
///
/// ```
/// use std::collections::BTreeSet;
/// use kitab_extract::cross_reference;
/// let check = cross_reference(&[1], &BTreeSet::from([1, 2]));
/// assert!(check.orphan_references.is_empty());
/// assert_eq!(check.orphan_footnotes, vec![2]);
/// ```
pub fn cross_reference(references: &[u32], known_footnotes: &BTreeSet<u32>) -> CrossReference {
    let references: BTreeSet<u32> = references.iter().copied().collect();
    CrossReference {
        orphan_references: references.difference(known_footnotes).copied().collect(),
        orphan_footnotes: known_footnotes.difference(&references).copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_sets_are_clean() {
        let check = cross_reference(&[1, 2], &BTreeSet::from([1, 2]));
        assert!(check.is_clean());
        assert_eq!(check.warnings().count(), 0);
    }

    #[test]
    fn both_directions_are_reported_in_order() {
        let check = cross_reference(&[4, 1], &BTreeSet::from([1, 2, 3]));
        assert_eq!(check.orphan_references, vec![4]);
        assert_eq!(check.orphan_footnotes, vec![2, 3]);
        let warnings: Vec<String> = check.warnings().map(|w| w.to_string()).collect();
        assert_eq!(warnings, vec!["orphan_reference:4", "orphan_footnote:2", "orphan_footnote:3"]);
    }

    #[test]
    fn empty_page() {
        assert!(cross_reference(&[], &BTreeSet::new()).is_clean());
    }
}
