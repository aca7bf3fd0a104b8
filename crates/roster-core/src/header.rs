//! Header extraction and subject detection for roster CSV files

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read the header row of a CSV file
///
/// Only the first record is read; the file handle is dropped before
/// returning. Fields are taken verbatim: quoting is disabled and no
/// trimming is applied.
pub fn read_header<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    read_header_from(BufReader::new(file), path)
}

/// Read the header row from any reader (useful for testing)
pub fn read_header_from<R: Read>(reader: R, path: &Path) -> Result<Vec<String>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(|e| Error::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;

    if headers.is_empty() {
        return Err(Error::CsvParse {
            path: path.to_path_buf(),
            message: "no columns found in header".to_string(),
        });
    }

    Ok(headers.iter().map(|name| name.to_string()).collect())
}

/// Extract subject column names from a header
///
/// A subject is any token whose lowercase form contains neither "id" nor
/// "name" as a substring. Retained tokens are trimmed of surrounding
/// whitespace; order is preserved. The substring rule is literal, so a
/// token like "Residential" is excluded because it contains "id".
pub fn extract_subjects(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .filter(|name| {
            let lower = name.to_lowercase();
            !lower.contains("id") && !lower.contains("name")
        })
        .map(|name| name.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn header_of(content: &str) -> Vec<String> {
        read_header_from(content.as_bytes(), &PathBuf::from("test.csv")).unwrap()
    }

    #[test]
    fn test_read_header_basic() {
        let header = header_of("id,college id,college name\n1,10,Foo\n");
        assert_eq!(header, vec!["id", "college id", "college name"]);
    }

    #[test]
    fn test_read_header_no_trimming() {
        let header = header_of(" id , Math\n1,90\n");
        assert_eq!(header, vec![" id ", " Math"]);
    }

    #[test]
    fn test_read_header_quotes_are_literal() {
        // Quoting is disabled for the fixed dialect, so quote characters
        // are part of the token.
        let header = header_of("\"id\",Math\n1,90\n");
        assert_eq!(header, vec!["\"id\"", "Math"]);
    }

    #[test]
    fn test_read_header_only_first_line() {
        let header = header_of("id,Math\n1,90\n2,85\n");
        assert_eq!(header.len(), 2);
    }

    #[test]
    fn test_extract_subjects_basic() {
        let header: Vec<String> = ["id", "college id", "college name", "student id", "student name", "Math", "Physics"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(extract_subjects(&header), vec!["Math", "Physics"]);
    }

    #[test]
    fn test_extract_subjects_case_insensitive_filter() {
        let header: Vec<String> = ["Student ID", "Student Name", "Chemistry"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(extract_subjects(&header), vec!["Chemistry"]);
    }

    #[test]
    fn test_extract_subjects_substring_rule_is_literal() {
        // "Residential" contains "id", so it is not a subject even though
        // it is not an identifier column.
        let header: Vec<String> = ["Residential", "Math"].iter().map(|s| s.to_string()).collect();

        assert_eq!(extract_subjects(&header), vec!["Math"]);
    }

    #[test]
    fn test_extract_subjects_trims_retained_tokens() {
        let header: Vec<String> = [" Math ", "student id"].iter().map(|s| s.to_string()).collect();

        assert_eq!(extract_subjects(&header), vec!["Math"]);
    }

    #[test]
    fn test_extract_subjects_preserves_order() {
        let header: Vec<String> = ["Physics", "id", "Math"].iter().map(|s| s.to_string()).collect();

        assert_eq!(extract_subjects(&header), vec!["Physics", "Math"]);
    }
}
