use crate::error::LookupError;
use crate::previous::clock::archive_file_name;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// How the dataset file was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The file named after the target date.
    Primary(PathBuf),
    /// The latest-named archive file, used when the target date has none.
    Fallback(PathBuf),
}

impl Selection {
    pub fn path(&self) -> &Path {
        match self {
            Self::Primary(path) | Self::Fallback(path) => path,
        }
    }
}

pub fn select_archive_file(
    root: &Path,
    target: NaiveDate,
    extension: &str,
) -> Result<Selection, LookupError> {
    let primary = root.join(archive_file_name(target, extension));
    if primary.exists() {
        return Ok(Selection::Primary(primary));
    }

    latest_archive_file(root, extension)?
        .map(Selection::Fallback)
        .ok_or_else(|| LookupError::NoArchiveFiles {
            path: root.to_path_buf(),
            extension: extension.to_string(),
        })
}

/// Latest archive entry by name. Names are `YYYY-MM-DD.<ext>`, so descending
/// byte order is descending date order. Entries are chosen by name alone; one
/// that is not a readable file fails later, when it is read.
pub fn latest_archive_file(root: &Path, extension: &str) -> Result<Option<PathBuf>, LookupError> {
    let list_err = |source| LookupError::ListArchive {
        path: root.to_path_buf(),
        source,
    };
    let suffix = format!(".{extension}");

    let mut latest: Option<String> = None;
    for entry in fs::read_dir(root).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !name.ends_with(&suffix) {
            continue;
        }
        match &latest {
            Some(best) if name <= *best => {}
            _ => latest = Some(name),
        }
    }

    Ok(latest.map(|name| root.join(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn primary_file_wins_when_present() {
        let tmp = tempdir().expect("tempdir");
        fs::write(tmp.path().join("2024-06-01.csv"), "student_id,file_size\n").expect("write");
        fs::write(tmp.path().join("2024-06-05.csv"), "student_id,file_size\n").expect("write");

        let got = select_archive_file(tmp.path(), date(2024, 6, 1), "csv").expect("select");
        assert_eq!(got, Selection::Primary(tmp.path().join("2024-06-01.csv")));
    }

    #[test]
    fn fallback_picks_latest_name() {
        let tmp = tempdir().expect("tempdir");
        fs::write(tmp.path().join("2024-05-30.csv"), "").expect("write");
        fs::write(tmp.path().join("2024-05-31.csv"), "").expect("write");
        fs::write(tmp.path().join("2024-12-31.txt"), "").expect("write");

        let got = select_archive_file(tmp.path(), date(2024, 6, 1), "csv").expect("select");
        assert_eq!(got, Selection::Fallback(tmp.path().join("2024-05-31.csv")));
    }

    #[test]
    fn directory_named_for_target_date_is_selected() {
        let tmp = tempdir().expect("tempdir");
        fs::create_dir(tmp.path().join("2024-06-01.csv")).expect("mkdir");
        fs::write(tmp.path().join("2024-05-01.csv"), "").expect("write");

        let got = select_archive_file(tmp.path(), date(2024, 6, 1), "csv").expect("select");
        assert_eq!(got, Selection::Primary(tmp.path().join("2024-06-01.csv")));
    }

    #[test]
    fn latest_named_directory_is_selected_as_fallback() {
        let tmp = tempdir().expect("tempdir");
        fs::create_dir(tmp.path().join("2099-01-01.csv")).expect("mkdir");
        fs::write(tmp.path().join("2024-05-01.csv"), "").expect("write");

        let got = select_archive_file(tmp.path(), date(2024, 6, 1), "csv").expect("select");
        assert_eq!(got, Selection::Fallback(tmp.path().join("2099-01-01.csv")));
    }

    #[test]
    fn empty_root_has_no_selection() {
        let tmp = tempdir().expect("tempdir");
        let err = select_archive_file(tmp.path(), date(2024, 6, 1), "csv").expect_err("none");
        assert!(matches!(err, LookupError::NoArchiveFiles { .. }));
    }
}
