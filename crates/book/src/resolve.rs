//! Volume resolution.
//!
//! A book is either one document, or a directory of documents named after
//! their volume number (`1.htm`, `2.htm`, ...). Files in that directory whose
//! stem is not a volume number are reported, never silently ignored: their
//! page markers still have to be accounted for.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::fs;
use std::path::{Path, PathBuf};

use exn::ResultExt;
use kitab_extract::parse_digits;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// One input document and its volume number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeFile {
    pub number: u32,
    pub path: PathBuf,
}
impl VolumeFile {
    pub fn file_name(&self) -> String {
        file_name(&self.path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The file stem is not a positive integer.
    NonNumericStem,
}
impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonNumericStem => "non_numeric_stem",
        }
    }
}
impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// A file next to the volumes that is not itself a volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}
impl SkippedFile {
    pub fn file_name(&self) -> String {
        file_name(&self.path)
    }
}

/// The ordered volumes of a book, plus everything that was passed over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Ascending by volume number (then by file name, for equal numbers).
    pub volumes: Vec<VolumeFile>,
    /// Ascending by path.
    pub skipped: Vec<SkippedFile>,
}

/// Resolves the input path into an ordered list of volume files.
///
/// - A file is a single-volume book: volume 1, whatever its name.
/// - A directory's files are volumes when their stem is a positive integer
///   (`007.htm` is volume 7). Subdirectories, and links to directories, are
///   not descended into. Other links are classified by their own name, even
///   when their target is missing.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn resolve_volumes(path: impl AsRef<Path>) -> Result<Resolution> {
    let path = path.as_ref();
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
        Err(err) => return Err(err).or_raise(|| ErrorKind::Unreadable(path.to_path_buf())),
    };
    if metadata.is_file() {
        let volumes = vec![VolumeFile { number: 1, path: path.to_path_buf() }];
        return Ok(Resolution { volumes, skipped: Vec::new() });
    }

    let mut resolution = Resolution::default();
    let entries = fs::read_dir(path).or_raise(|| ErrorKind::Unreadable(path.to_path_buf()))?;
    for entry in entries {
        let entry = entry.or_raise(|| ErrorKind::Unreadable(path.to_path_buf()))?;
        let file_type = entry.file_type().or_raise(|| ErrorKind::Unreadable(entry.path()))?;
        // Directories, linked or not, are not volumes. A dangling link is kept
        // so that reading it fails loudly instead of losing a volume.
        if file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir()) {
            continue;
        }
        let entry_path = entry.path();
        match volume_number(&entry_path) {
            Some(number) => resolution.volumes.push(VolumeFile { number, path: entry_path }),
            None => {
                let skipped = SkippedFile { path: entry_path, reason: SkipReason::NonNumericStem };
                tracing::warn!(
                    file = %skipped.file_name(),
                    reason = %skipped.reason,
                    "Skipping file that is not a volume"
                );
                resolution.skipped.push(skipped);
            },
        }
    }
    if resolution.volumes.is_empty() {
        exn::bail!(ErrorKind::NoVolumes(path.to_path_buf()));
    }
    // Directory listing order is platform dependent.
    resolution.volumes.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.path.cmp(&b.path)));
    resolution.skipped.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!(volumes = resolution.volumes.len(), skipped = resolution.skipped.len(), "Resolved volumes");
    Ok(resolution)
}

fn volume_number(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    parse_digits(stem).filter(|number| *number > 0)
}

fn file_name(path: &Path) -> String {
    path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[rstest]
    #[case("1.htm", Some(1))]
    #[case("007.htm", Some(7))]
    #[case("12", Some(12))]
    #[case("٣.htm", Some(3))]
    #[case("0.htm", None)]
    #[case("index.htm", None)]
    #[case("1a.htm", None)]
    #[case(".hidden", None)]
    fn test_volume_number(#[case] name: &str, #[case] expected: Option<u32>) {
        assert_eq!(volume_number(Path::new(name)), expected);
    }

    #[test]
    fn single_file_is_volume_one() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "book.htm");
        let resolution = resolve_volumes(dir.path().join("book.htm")).unwrap();
        assert_eq!(resolution.volumes, vec![VolumeFile { number: 1, path: dir.path().join("book.htm") }]);
        assert!(resolution.skipped.is_empty());
    }

    #[test]
    fn directory_volumes_sort_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["10.htm", "2.htm", "1.htm", "notes.txt"] {
            touch(dir.path(), name);
        }
        fs::create_dir(dir.path().join("3")).unwrap();
        let resolution = resolve_volumes(dir.path()).unwrap();
        let numbers: Vec<u32> = resolution.volumes.iter().map(|v| v.number).collect();
        assert_eq!(numbers, vec![1, 2, 10]);
        assert_eq!(resolution.skipped.len(), 1);
        assert_eq!(resolution.skipped[0].file_name(), "notes.txt");
        assert_eq!(resolution.skipped[0].reason, SkipReason::NonNumericStem);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_link_is_still_a_volume() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "1.htm");
        std::os::unix::fs::symlink(dir.path().join("gone.htm"), dir.path().join("2.htm")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.htm"), dir.path().join("notes.htm")).unwrap();
        let resolution = resolve_volumes(dir.path()).unwrap();
        let numbers: Vec<u32> = resolution.volumes.iter().map(|v| v.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(resolution.skipped.len(), 1);
        assert_eq!(resolution.skipped[0].file_name(), "notes.htm");
    }

    #[cfg(unix)]
    #[test]
    fn links_are_followed() {
        let dir = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        touch(elsewhere.path(), "vol.htm");
        fs::create_dir(elsewhere.path().join("sub")).unwrap();
        std::os::unix::fs::symlink(elsewhere.path().join("vol.htm"), dir.path().join("1.htm")).unwrap();
        std::os::unix::fs::symlink(elsewhere.path().join("sub"), dir.path().join("2")).unwrap();
        let resolution = resolve_volumes(dir.path()).unwrap();
        assert_eq!(resolution.volumes, vec![VolumeFile { number: 1, path: dir.path().join("1.htm") }]);
        assert!(resolution.skipped.is_empty());
    }

    #[test]
    fn missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let error = resolve_volumes(dir.path().join("nope")).unwrap_err();
        assert!(matches!(&*error, ErrorKind::NotFound(_)));
    }

    #[test]
    fn directory_without_volumes() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "readme.md");
        let error = resolve_volumes(dir.path()).unwrap_err();
        assert!(matches!(&*error, ErrorKind::NoVolumes(_)));
    }
}
