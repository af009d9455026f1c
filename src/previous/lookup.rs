//! Previous-day file size lookup.
//!
//! Resolution order: archive root → yesterday's date → dated file (or the
//! latest-named one) → first matching row → `file_size`. Every failure along
//! the way yields an empty [`PreviousData`]; callers cannot tell a broken
//! archive from a student with no prior data.

use crate::error::LookupError;
use crate::previous::clock::{ReferenceClock, yesterday_of};
use crate::previous::config::LookupConfig;
use crate::previous::resolve::select_archive_file;
use crate::previous::scan::{Columns, find_file_size};
use crate::previous::warn;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PreviousData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
}

impl PreviousData {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn to_json_line(&self) -> String {
        // Serializing an Option<i64> field cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Archive layout the lookup reads; borrowed from a [`LookupConfig`].
#[derive(Debug, Clone, Copy)]
pub struct ArchiveLayout<'a> {
    pub root: &'a Path,
    pub extension: &'a str,
    pub columns: Columns<'a>,
}

impl<'a> ArchiveLayout<'a> {
    pub fn from_config(cfg: &'a LookupConfig) -> Self {
        Self {
            root: &cfg.archive.dir,
            extension: &cfg.archive.extension,
            columns: Columns {
                id: &cfg.archive.id_column,
                size: &cfg.archive.size_column,
            },
        }
    }
}

pub fn try_lookup(
    student_id: &str,
    layout: ArchiveLayout<'_>,
    today: NaiveDate,
) -> Result<i64, LookupError> {
    if !layout.root.is_dir() {
        return Err(LookupError::RootMissing(layout.root.to_path_buf()));
    }
    let target = yesterday_of(today).ok_or(LookupError::DateOutOfRange(today))?;
    let selection = select_archive_file(layout.root, target, layout.extension)?;
    find_file_size(selection.path(), layout.columns, student_id)
}

/// Look up as of `today`, folding every error into the empty result.
pub fn lookup_on(
    student_id: &str,
    layout: ArchiveLayout<'_>,
    today: NaiveDate,
    warn_enabled: bool,
) -> PreviousData {
    match try_lookup(student_id, layout, today) {
        Ok(size) => PreviousData {
            file_size: Some(size),
        },
        Err(err) => {
            if warn_enabled {
                warn::emit_lookup_error(&err);
            }
            PreviousData::empty()
        }
    }
}

/// Previous-day `file_size` for `student_id` under the configured archive
/// root, as of today on `clock`.
pub fn lookup_previous_file_size(
    student_id: &str,
    cfg: &LookupConfig,
    clock: ReferenceClock,
) -> PreviousData {
    lookup_on(
        student_id,
        ArchiveLayout::from_config(cfg),
        clock.today(),
        cfg.warn.enabled,
    )
}
