//! Per-file stamping and validation.
//!
//! Paths are relative to the repository root, as git reports them. Batches
//! stop at the first error so a broken file rejects the whole commit.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Error;
use crate::footer::{replace_footer, PLACEHOLDER_STAMP};
use crate::vcs::Vcs;

/// Suffix appended to the path of a backup copy.
pub const BACKUP_SUFFIX: &str = ".bkup";

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StampOutcome {
    /// Footer already current; nothing written or staged.
    Unchanged,
    /// File rewritten and staged.
    Stamped { backup: Option<PathBuf> },
}

/// Modification time of a candidate file.
#[derive(Debug, Clone, Serialize)]
pub struct FileAge {
    pub path: String,
    pub modified: DateTime<Utc>,
}

/// Stamp one file, writing and staging it only if its footer changed.
pub fn stamp_file(
    vcs: &dyn Vcs,
    root: &Path,
    path: &str,
    stamp: &str,
    backup: bool,
) -> Result<StampOutcome, Error> {
    let full_path = root.join(path);
    let original = fs::read_to_string(&full_path)?;
    let updated = replace_footer(&original, stamp, path)?;

    if updated == original {
        debug!(file = path, "Footer already current");
        return Ok(StampOutcome::Unchanged);
    }

    info!(file = path, "Adding today's date (in footer) to an updated file");
    fs::write(&full_path, &updated)?;

    let backup_path = if backup {
        let backup_path = backup_path_for(&full_path);
        info!(file = %backup_path.display(), "Saving original");
        fs::write(&backup_path, &original)?;
        Some(backup_path)
    } else {
        None
    };

    vcs.stage(path)?;

    Ok(StampOutcome::Stamped {
        backup: backup_path,
    })
}

/// Stamp every path in order, stopping at the first failure.
pub fn stamp_all(
    vcs: &dyn Vcs,
    root: &Path,
    paths: &[String],
    stamp: &str,
    backup: bool,
) -> Result<Vec<(String, StampOutcome)>, Error> {
    paths
        .iter()
        .map(|path| -> Result<(String, StampOutcome), Error> {
            let outcome = stamp_file(vcs, root, path, stamp, backup)?;
            Ok((path.clone(), outcome))
        })
        .collect()
}

/// Validate every path, then stamp them all.
///
/// Nothing is written or staged unless every file passes validation.
pub fn check_then_stamp(
    vcs: &dyn Vcs,
    root: &Path,
    paths: &[String],
    stamp: &str,
    backup: bool,
) -> Result<Vec<(String, StampOutcome)>, Error> {
    validate_all(root, paths)?;
    stamp_all(vcs, root, paths, stamp, backup)
}

/// Check that a file can be stamped, without touching it.
pub fn validate_file(root: &Path, path: &str) -> Result<(), Error> {
    let html = fs::read_to_string(root.join(path))?;
    replace_footer(&html, PLACEHOLDER_STAMP, path)?;
    Ok(())
}

pub fn validate_all(root: &Path, paths: &[String]) -> Result<(), Error> {
    for path in paths {
        validate_file(root, path)?;
        debug!(file = %path, "Structure ok");
    }
    Ok(())
}

/// Filesystem modification times of `paths`.
pub fn file_ages(root: &Path, paths: &[String]) -> Result<Vec<FileAge>, Error> {
    paths
        .iter()
        .map(|path| -> Result<FileAge, Error> {
            let modified = fs::metadata(root.join(path))?.modified()?;
            Ok(FileAge {
                path: path.clone(),
                modified: DateTime::<Utc>::from(modified),
            })
        })
        .collect()
}

fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcs::tests::FakeVcs;
    use tempfile::TempDir;

    const DATE: &str = "31/Dec/2021";
    const STAMPED: &str =
        "<body>hi<footer>\n<hr>\n<small>updated 31/Dec/2021</small>\n</footer>\n</body>\n";

    fn write(dir: &TempDir, name: &str, content: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn read(dir: &TempDir, name: &str) -> String {
        fs::read_to_string(dir.path().join(name)).unwrap()
    }

    #[test]
    fn test_stamp_file_writes_and_stages() {
        let dir = TempDir::new().unwrap();
        write(&dir, "site/index.html", "<body>hi</body>\n");
        let vcs = FakeVcs::default();

        let outcome = stamp_file(&vcs, dir.path(), "site/index.html", DATE, false).unwrap();

        assert_eq!(outcome, StampOutcome::Stamped { backup: None });
        assert_eq!(read(&dir, "site/index.html"), STAMPED);
        assert_eq!(*vcs.staged.borrow(), vec!["site/index.html"]);
        assert!(!dir.path().join("site/index.html.bkup").exists());
    }

    #[test]
    fn test_stamp_file_with_backup() {
        let dir = TempDir::new().unwrap();
        write(&dir, "page.htm", "<body>hi</body>\n");
        let vcs = FakeVcs::default();

        let outcome = stamp_file(&vcs, dir.path(), "page.htm", DATE, true).unwrap();

        let expected_backup = dir.path().join("page.htm.bkup");
        assert_eq!(
            outcome,
            StampOutcome::Stamped {
                backup: Some(expected_backup.clone())
            }
        );
        assert_eq!(fs::read_to_string(expected_backup).unwrap(), "<body>hi</body>\n");
        assert_eq!(read(&dir, "page.htm"), STAMPED);
    }

    #[test]
    fn test_stamp_file_unchanged_skips_write_and_stage() {
        let dir = TempDir::new().unwrap();
        write(&dir, "index.html", STAMPED);
        let vcs = FakeVcs::default();

        let outcome = stamp_file(&vcs, dir.path(), "index.html", DATE, true).unwrap();

        assert_eq!(outcome, StampOutcome::Unchanged);
        assert!(vcs.staged.borrow().is_empty());
        assert!(!dir.path().join("index.html.bkup").exists());
    }

    #[test]
    fn test_stamp_file_stage_failure_propagates() {
        let dir = TempDir::new().unwrap();
        write(&dir, "index.html", "<body>hi</body>\n");
        let vcs = FakeVcs::failing("index locked");

        let err = stamp_file(&vcs, dir.path(), "index.html", DATE, false).unwrap_err();
        assert!(matches!(err, Error::Git(ref msg) if msg == "index locked"));
    }

    #[test]
    fn test_stamp_all_aborts_on_first_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.html", "<body>a</body>");
        write(&dir, "b.html", "<em>no body</em>");
        write(&dir, "c.html", "<body>c</body>");
        let vcs = FakeVcs::default();
        let paths: Vec<String> = ["a.html", "b.html", "c.html"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let err = stamp_all(&vcs, dir.path(), &paths, DATE, false).unwrap_err();

        assert!(matches!(err, Error::MalformedHtml { ref source_name, .. } if source_name == "b.html"));
        assert_eq!(*vcs.staged.borrow(), vec!["a.html"]);
        assert_eq!(read(&dir, "c.html"), "<body>c</body>");
    }

    #[test]
    fn test_check_then_stamp_broken_file_blocks_everything() {
        let dir = TempDir::new().unwrap();
        write(&dir, "good.html", "<body>good</body>");
        write(&dir, "broken.html", "<em>no body</em>");
        let vcs = FakeVcs::default();
        let paths = vec!["good.html".to_string(), "broken.html".to_string()];

        let err = check_then_stamp(&vcs, dir.path(), &paths, DATE, true).unwrap_err();

        assert!(matches!(err, Error::MalformedHtml { ref source_name, .. } if source_name == "broken.html"));
        assert_eq!(read(&dir, "good.html"), "<body>good</body>");
        assert!(!dir.path().join("good.html.bkup").exists());
        assert!(vcs.staged.borrow().is_empty());
    }

    #[test]
    fn test_check_then_stamp_all_valid() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.html", "<body>hi</body>\n");
        write(&dir, "b.html", STAMPED);
        let vcs = FakeVcs::default();
        let paths = vec!["a.html".to_string(), "b.html".to_string()];

        let results = check_then_stamp(&vcs, dir.path(), &paths, DATE, false).unwrap();

        assert_eq!(results[0].1, StampOutcome::Stamped { backup: None });
        assert_eq!(results[1].1, StampOutcome::Unchanged);
        assert_eq!(read(&dir, "a.html"), STAMPED);
        assert_eq!(*vcs.staged.borrow(), vec!["a.html"]);
    }

    #[test]
    fn test_validate_all_does_not_write() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.html", "<body>a</body>");
        let paths = vec!["a.html".to_string()];

        validate_all(dir.path(), &paths).unwrap();
        assert_eq!(read(&dir, "a.html"), "<body>a</body>");
    }

    #[test]
    fn test_validate_reports_bad_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "bad.html", "<em>Glorified text</em>\n");

        let err = validate_file(dir.path(), "bad.html").unwrap_err();
        assert!(matches!(err, Error::MalformedHtml { .. }));
    }

    #[test]
    fn test_validate_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = validate_file(dir.path(), "missing.html").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_file_ages() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.html", "<body>a</body>");
        let ages = file_ages(dir.path(), &["a.html".to_string()]).unwrap();

        assert_eq!(ages.len(), 1);
        assert_eq!(ages[0].path, "a.html");
        assert!(ages[0].modified <= Utc::now());
    }
}
