//! CSV writing.

use crate::error::{CleaningError, Result};
use crate::table::Table;
use polars::prelude::*;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Write `table` to `path` as comma-delimited text with a header row.
///
/// No index column is written. An existing file is overwritten. The data
/// goes to a uniquely named temporary file in the destination directory
/// first and is persisted over `path`, so a failed write never leaves a
/// partial file at `path`.
///
/// # Errors
///
/// [`CleaningError::FileAccess`] if the destination directory does not
/// exist or the file cannot be created, written, or moved into place.
pub fn write_table(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    if !dir.is_dir() {
        return Err(CleaningError::file_access(
            dir,
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "destination directory does not exist",
            ),
        ));
    }

    // Dropping the temp file on any early return deletes it.
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| CleaningError::file_access(path, e))?;

    write_csv(table, temp.as_file_mut(), path)?;
    temp.as_file()
        .sync_all()
        .map_err(|e| CleaningError::file_access(path, e))?;

    temp.persist(path)
        .map_err(|e| CleaningError::file_access(path, e.error))?;

    info!(
        "Wrote {} rows x {} columns to {}",
        table.height(),
        table.width(),
        path.display()
    );
    Ok(())
}

/// Serialize `table` into `writer`, reporting failures against `path`.
fn write_csv<W: Write>(table: &Table, writer: W, path: &Path) -> Result<()> {
    let mut frame = table.frame().clone();
    CsvWriter::new(writer)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(&mut frame)
        .map_err(|e| CleaningError::file_access(path, std::io::Error::other(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::load_table;
    use std::fs;

    fn sample() -> Table {
        Table::new(
            df![
                "product_name" => ["Widget", "Gadget"],
                "price" => [15.0, 20.0],
                "quantity" => [3.0, 2.0],
            ]
            .unwrap(),
        )
    }

    #[test]
    fn test_write_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clean.csv");

        write_table(&sample(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "product_name,price,quantity");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Widget,15"));
        // Only the destination is left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clean.csv");
        fs::write(&path, "old,content\n1,2\n3,4\n5,6\n").unwrap();

        write_table(&sample(), &path).unwrap();

        let reloaded = load_table(&path).unwrap();
        assert_eq!(reloaded.column_names(), vec!["product_name", "price", "quantity"]);
        assert_eq!(reloaded.height(), 2);
    }

    #[test]
    fn test_write_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("clean.csv");

        let err = write_table(&sample(), &path).unwrap_err();

        assert!(matches!(err, CleaningError::FileAccess { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_existing_tmp_sibling_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clean.csv");
        let sibling = dir.path().join("clean.csv.tmp");
        fs::write(&sibling, "user data\n").unwrap();

        write_table(&sample(), &path).unwrap();

        assert_eq!(fs::read_to_string(&sibling).unwrap(), "user data\n");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 2);
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(
                std::io::ErrorKind::StorageFull,
                "no space left on device",
            ))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_serialization_failure_is_file_access() {
        let path = Path::new("out/clean.csv");

        let err = write_csv(&sample(), FullDisk, path).unwrap_err();

        assert_eq!(err.error_code(), "FILE_ACCESS_ERROR");
        assert_eq!(err.path(), Some(path));
    }
}
