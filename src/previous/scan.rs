use crate::error::LookupError;
use csv::StringRecord;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns<'a> {
    pub id: &'a str,
    pub size: &'a str,
}

/// Scan `path` in file order and return the size field of the first record
/// whose id matches `student_id` case-insensitively.
pub fn find_file_size(
    path: &Path,
    columns: Columns<'_>,
    student_id: &str,
) -> Result<i64, LookupError> {
    let file = File::open(path).map_err(|source| LookupError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let csv_err = |source| LookupError::Csv {
        path: path.to_path_buf(),
        source,
    };

    // Rows may be ragged; only the id and size positions matter.
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = rdr.headers().map_err(csv_err)?.clone();
    let Some(id_idx) = column_index(&headers, columns.id) else {
        return Err(LookupError::NoMatch(path.to_path_buf()));
    };
    let size_idx = column_index(&headers, columns.size);

    let wanted = student_id.to_lowercase();
    let mut record = StringRecord::new();
    let mut row = 0u64;
    while rdr.read_record(&mut record).map_err(csv_err)? {
        row += 1;
        let Some(id) = record.get(id_idx) else {
            return Err(LookupError::MalformedRow {
                path: path.to_path_buf(),
                row,
                column: columns.id.to_string(),
            });
        };
        if id.to_lowercase() == wanted {
            let raw = size_idx.and_then(|idx| record.get(idx));
            return parse_file_size(path, raw);
        }
    }

    Err(LookupError::NoMatch(path.to_path_buf()))
}

// A repeated header name resolves to its last occurrence.
fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| *h == name)
        .map(|(i, _)| i)
        .last()
}

// Single underscores between digits are digit separators (`1_000`).
fn strip_digit_separators(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    for (i, ch) in raw.char_indices() {
        if ch != '_' {
            out.push(ch);
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| bytes.get(j));
        let after = bytes.get(i + 1);
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }
    Some(out)
}

fn parse_file_size(path: &Path, raw: Option<&str>) -> Result<i64, LookupError> {
    let raw = raw.unwrap_or_default();
    if raw.is_empty() {
        return Err(LookupError::SizeMissing(path.to_path_buf()));
    }
    strip_digit_separators(raw.trim())
        .and_then(|digits| digits.parse::<i64>().ok())
        .ok_or_else(|| LookupError::SizeNotInteger {
            path: path.to_path_buf(),
            raw: raw.to_string(),
        })
}
