//! Upload set construction
//!
//! Turns the raw comma-delimited `--upload-files` argument into a
//! deduplicated, existence-checked list of local files. The first
//! missing file aborts the whole build before any upload begins;
//! duplicates are warned about and skipped.

use crate::error::{Result, ScputError};
use std::path::{Path, PathBuf};

/// A single accepted upload candidate
#[derive(Debug, Clone)]
pub struct UploadEntry {
    /// Local file path as given on the command line
    pub path: PathBuf,
    /// Transfer progress accumulator, 0-100
    pub progress: u8,
}

/// Deduplicated, existence-checked set of files to transfer.
///
/// Entries keep the order they were accepted in; paths are compared by
/// exact string equality, case-sensitive.
#[derive(Debug, Default)]
pub struct UploadSet {
    entries: Vec<UploadEntry>,
    /// Duplicate filenames that were skipped during the build
    pub skipped: Vec<String>,
}

impl UploadSet {
    /// Build an upload set from the raw `--upload-files` argument.
    ///
    /// A token must name an existing regular file; directories fail the
    /// build the same way a missing path does.
    pub fn build(raw: Option<&str>) -> Result<Self> {
        Self::build_with(raw, |path| path.is_file())
    }

    /// Build with an injectable existence check (for tests).
    pub fn build_with(raw: Option<&str>, exists: impl Fn(&Path) -> bool) -> Result<Self> {
        let raw = raw.ok_or(ScputError::NoFilesSpecified)?;

        let mut set = Self::default();
        for token in raw.split(',') {
            if token.is_empty() || !exists(Path::new(token)) {
                return Err(ScputError::LocalFileNotFound(token.to_string()));
            }
            if set
                .entries
                .iter()
                .any(|e| e.path.as_os_str() == std::ffi::OsStr::new(token))
            {
                // The warning goes straight to the console; it must be
                // visible regardless of the log filter
                eprintln!("{}", duplicate_warning(token));
                set.skipped.push(token.to_string());
                continue;
            }
            set.entries.push(UploadEntry {
                path: PathBuf::from(token),
                progress: 0,
            });
        }

        if set.entries.is_empty() {
            return Err(ScputError::EmptyUploadSet);
        }

        Ok(set)
    }

    /// Accepted entries in insertion order
    pub fn entries(&self) -> &[UploadEntry] {
        &self.entries
    }

    /// Number of distinct files to upload
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no files
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Console warning line for a skipped duplicate
fn duplicate_warning(token: &str) -> String {
    format!("Warning: Skipping duplicate filename: {}", token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_exist(_: &Path) -> bool {
        true
    }

    #[test]
    fn test_no_argument_at_all() {
        let err = UploadSet::build_with(None, all_exist).unwrap_err();
        assert!(matches!(err, ScputError::NoFilesSpecified));
    }

    #[test]
    fn test_duplicates_skipped_with_warning_not_error() {
        let set = UploadSet::build_with(Some("a.txt,a.txt,b.txt"), all_exist).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.entries()[0].path, PathBuf::from("a.txt"));
        assert_eq!(set.entries()[1].path, PathBuf::from("b.txt"));
        assert_eq!(set.skipped, vec!["a.txt".to_string()]);
    }

    #[test]
    fn test_missing_file_fails_fast() {
        let err = UploadSet::build_with(Some("a.txt,missing.txt"), |p| {
            p.as_os_str() != "missing.txt"
        })
        .unwrap_err();
        match err {
            ScputError::LocalFileNotFound(name) => assert_eq!(name, "missing.txt"),
            other => panic!("expected LocalFileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_token_is_a_missing_file() {
        // "a.txt,,b.txt" contains an empty token, which aborts the build
        let err = UploadSet::build_with(Some("a.txt,,b.txt"), all_exist).unwrap_err();
        assert!(matches!(err, ScputError::LocalFileNotFound(name) if name.is_empty()));
    }

    #[test]
    fn test_dedup_size_property() {
        let set = UploadSet::build_with(Some("a,b,a,c,b,a"), all_exist).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.skipped.len(), 3);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let set = UploadSet::build_with(Some("z.txt,a.txt,m.txt"), all_exist).unwrap();
        let names: Vec<_> = set.entries().iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("z.txt"),
                PathBuf::from("a.txt"),
                PathBuf::from("m.txt")
            ]
        );
    }

    #[test]
    fn test_duplicate_warning_goes_to_console_verbatim() {
        assert_eq!(
            duplicate_warning("a.txt"),
            "Warning: Skipping duplicate filename: a.txt"
        );
    }

    #[test]
    fn test_directory_token_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ok.txt");
        std::fs::write(&file, b"data").unwrap();

        // A directory is not an uploadable file; the whole build aborts
        // before any connection, same as a missing path
        let raw = format!("{},{}", file.display(), dir.path().display());
        match UploadSet::build(Some(&raw)).unwrap_err() {
            ScputError::LocalFileNotFound(name) => {
                assert_eq!(name, dir.path().display().to_string())
            }
            other => panic!("expected LocalFileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_real_filesystem_check() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.txt");
        std::fs::write(&present, b"data").unwrap();

        let raw = format!("{}", present.display());
        let set = UploadSet::build(Some(&raw)).unwrap();
        assert_eq!(set.len(), 1);

        let raw = format!("{},{}", present.display(), dir.path().join("gone").display());
        assert!(matches!(
            UploadSet::build(Some(&raw)),
            Err(ScputError::LocalFileNotFound(_))
        ));
    }
}
