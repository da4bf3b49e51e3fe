//! CSV loading.

use crate::error::{CleaningError, Result};
use crate::table::Table;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Load a comma-delimited file with a header row into a [`Table`].
///
/// Column types are inferred from the whole file, so a stray non-numeric
/// cell deep in a numeric column turns that column into text rather than
/// failing the read.
///
/// # Errors
///
/// - [`CleaningError::FileAccess`] if the path is missing, is a directory,
///   or cannot be opened.
/// - [`CleaningError::Parse`] if the content is not valid delimited text.
pub fn load_table(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    info!("Loading table from: {}", path.display());

    if path.is_dir() {
        return Err(CleaningError::file_access(
            path,
            std::io::Error::new(std::io::ErrorKind::IsADirectory, "expected a file"),
        ));
    }

    let file = File::open(path).map_err(|e| CleaningError::file_access(path, e))?;

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|e| CleaningError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    debug!("Loaded table with shape {:?}", frame.shape());
    Ok(Table::new(frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_infers_types() {
        let file = write_temp("Product,Price,Quantity\nWidget,9.5,2\nGadget,abc,3\n");

        let table = load_table(file.path()).unwrap();

        assert_eq!(table.column_names(), vec!["Product", "Price", "Quantity"]);
        assert_eq!(table.height(), 2);
        assert_eq!(table.series("Price").unwrap().dtype(), &DataType::String);
        assert_eq!(table.series("Quantity").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_load_keeps_header_whitespace() {
        let file = write_temp(" Product Name ,price\nWidget,1\n");

        let table = load_table(file.path()).unwrap();

        assert!(table.has_column(" Product Name "));
    }

    #[test]
    fn test_load_empty_cells_are_null() {
        let file = write_temp("price,quantity\n10,\n,3\n");

        let table = load_table(file.path()).unwrap();

        assert_eq!(table.series("price").unwrap().null_count(), 1);
        assert_eq!(table.series("quantity").unwrap().null_count(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_table("definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, CleaningError::FileAccess { .. }));
        assert_eq!(err.path(), Some(Path::new("definitely/not/here.csv")));
    }

    #[test]
    fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(dir.path()).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ACCESS_ERROR");
    }

    #[test]
    fn test_load_empty_file_is_parse_error() {
        let file = write_temp("");
        let err = load_table(file.path()).unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
    }
}
