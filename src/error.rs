use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every reason a previous-day lookup can come back empty.
///
/// None of these reach the caller: `lookup::lookup_previous_file_size`
/// folds them all into an empty result.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("archive root missing or not a directory: {0}")]
    RootMissing(PathBuf),
    #[error("cannot step back one day from {0}")]
    DateOutOfRange(chrono::NaiveDate),
    #[error("failed to list archive root {path}: {source}")]
    ListArchive {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no archive files with extension .{extension} in {path}")]
    NoArchiveFiles { path: PathBuf, extension: String },
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("row {row} in {path} has no {column} field")]
    MalformedRow {
        path: PathBuf,
        row: u64,
        column: String,
    },
    #[error("no record for student in {0}")]
    NoMatch(PathBuf),
    #[error("matched record in {0} has no size")]
    SizeMissing(PathBuf),
    #[error("matched record in {path} has non-integer size {raw:?}")]
    SizeNotInteger { path: PathBuf, raw: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorCode {
    E001RootMissing,
    E002DateOutOfRange,
    E003ListFailed,
    E004NoArchiveFiles,
    E005OpenFailed,
    E006CsvInvalid,
    E007RowMalformed,
    E008NoMatch,
    E009SizeMissing,
    E010SizeNotInteger,
}

impl LookupErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::E001RootMissing => "E001_ROOT_MISSING",
            Self::E002DateOutOfRange => "E002_DATE_OUT_OF_RANGE",
            Self::E003ListFailed => "E003_LIST_FAILED",
            Self::E004NoArchiveFiles => "E004_NO_ARCHIVE_FILES",
            Self::E005OpenFailed => "E005_OPEN_FAILED",
            Self::E006CsvInvalid => "E006_CSV_INVALID",
            Self::E007RowMalformed => "E007_ROW_MALFORMED",
            Self::E008NoMatch => "E008_NO_MATCH",
            Self::E009SizeMissing => "E009_SIZE_MISSING",
            Self::E010SizeNotInteger => "E010_SIZE_NOT_INTEGER",
        }
    }
}

impl LookupError {
    pub fn code(&self) -> LookupErrorCode {
        match self {
            Self::RootMissing(_) => LookupErrorCode::E001RootMissing,
            Self::DateOutOfRange(_) => LookupErrorCode::E002DateOutOfRange,
            Self::ListArchive { .. } => LookupErrorCode::E003ListFailed,
            Self::NoArchiveFiles { .. } => LookupErrorCode::E004NoArchiveFiles,
            Self::Open { .. } => LookupErrorCode::E005OpenFailed,
            Self::Csv { .. } => LookupErrorCode::E006CsvInvalid,
            Self::MalformedRow { .. } => LookupErrorCode::E007RowMalformed,
            Self::NoMatch(_) => LookupErrorCode::E008NoMatch,
            Self::SizeMissing(_) => LookupErrorCode::E009SizeMissing,
            Self::SizeNotInteger { .. } => LookupErrorCode::E010SizeNotInteger,
        }
    }

    /// Pipeline step that produced the error.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::RootMissing(_) => "root",
            Self::DateOutOfRange(_) => "date",
            Self::ListArchive { .. } | Self::NoArchiveFiles { .. } => "resolve",
            Self::Open { .. } | Self::Csv { .. } | Self::MalformedRow { .. } => "read",
            Self::NoMatch(_) => "scan",
            Self::SizeMissing(_) | Self::SizeNotInteger { .. } => "extract",
        }
    }

    /// File or directory the error concerns.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::RootMissing(path)
            | Self::NoMatch(path)
            | Self::SizeMissing(path)
            | Self::ListArchive { path, .. }
            | Self::NoArchiveFiles { path, .. }
            | Self::Open { path, .. }
            | Self::Csv { path, .. }
            | Self::MalformedRow { path, .. }
            | Self::SizeNotInteger { path, .. } => Some(path.as_path()),
            Self::DateOutOfRange(_) => None,
        }
    }
}
