use crate::error::{ChartError, Result};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Parsed survey data: one header row plus raw string entries.
///
/// Every entry row has exactly `headers.len()` cells; the parser pads or
/// truncates rows that do not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub entries: Vec<Vec<String>>,
}

impl Table {
    /// Position of the header that equals `name` exactly
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Like `column_index`, but reports the available headers on failure
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| ChartError::ColumnNotFound {
                column: name.to_string(),
                available: self.headers.clone(),
            })
    }

    /// Raw cell values of one column, in row order
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn read_table_from_stdin() -> Result<Table> {
    read_table(io::stdin().lock())
}

pub fn read_table_from_path(path: &Path) -> Result<Table> {
    let text = fs::read_to_string(path).map_err(|source| ChartError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(&text)
}

pub fn read_table<R: Read>(mut reader: R) -> Result<Table> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_table(&text)
}

/// Parse CSV text into a `Table`.
///
/// Blank lines are dropped before parsing, the first remaining line is the
/// header, and commas inside double-quoted fields do not split.
pub fn parse_table(text: &str) -> Result<Table> {
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    if lines.is_empty() {
        return Err(ChartError::EmptyInput);
    }
    let joined = lines.join("\n");

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(joined.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut entries = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();

        if row.len() < headers.len() {
            warn!(
                "Row {} has only {} fields, expected {}; padding with empty values",
                row_idx + 1,
                row.len(),
                headers.len()
            );
            row.resize(headers.len(), String::new());
        } else if row.len() > headers.len() {
            warn!(
                "Row {} has {} fields, expected {}; dropping the extra fields",
                row_idx + 1,
                row.len(),
                headers.len()
            );
            row.truncate(headers.len());
        }

        entries.push(row);
    }

    debug!(
        "Parsed CSV: {} columns, {} rows",
        headers.len(),
        entries.len()
    );

    Ok(Table { headers, entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_basic() {
        let table = parse_table("a,b,c\n1,2,3\n4,5,6").unwrap();
        assert_eq!(table.headers, vec!["a", "b", "c"]);
        assert_eq!(table.entries.len(), 2);
        assert_eq!(table.entries[0], vec!["1", "2", "3"]);
        assert_eq!(table.entries[1], vec!["4", "5", "6"]);
    }

    #[test]
    fn test_parse_quoted_comma_stays_in_one_field() {
        let table = parse_table("name,city\n\"a,b\",c").unwrap();
        assert_eq!(table.entries[0], vec!["a,b", "c"]);
    }

    #[test]
    fn test_parse_crlf_and_blank_lines() {
        let table = parse_table("x,y\r\n\r\n1,2\r\n   \r\n3,4\r\n\r\n").unwrap();
        assert_eq!(table.headers, vec!["x", "y"]);
        assert_eq!(table.entries, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn test_parse_leading_blank_lines_before_header() {
        let table = parse_table("\n\n  \ncolor\nred").unwrap();
        assert_eq!(table.headers, vec!["color"]);
        assert_eq!(table.entries, vec![vec!["red"]]);
    }

    #[test]
    fn test_parse_headers_are_trimmed_and_unquoted() {
        let table = parse_table("\"Fachbereich\", Alter \nA,20").unwrap();
        assert_eq!(table.headers, vec!["Fachbereich", "Alter"]);
    }

    #[test]
    fn test_parse_values_stay_raw_strings() {
        let table = parse_table("n\n007\n 1.50").unwrap();
        assert_eq!(table.entries[0], vec!["007"]);
        assert_eq!(table.entries[1], vec![" 1.50"]);
    }

    #[test]
    fn test_parse_short_row_is_padded() {
        let table = parse_table("x,y,z\n1,10,100\n2,20").unwrap();
        assert_eq!(table.entries[1], vec!["2", "20", ""]);
    }

    #[test]
    fn test_parse_long_row_is_truncated() {
        let table = parse_table("x,y\n1,2,3,4").unwrap();
        assert_eq!(table.entries[0], vec!["1", "2"]);
    }

    #[test]
    fn test_parse_header_only_is_empty_table() {
        let table = parse_table("x,y\n").unwrap();
        assert_eq!(table.headers, vec!["x", "y"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(parse_table(""), Err(ChartError::EmptyInput)));
        assert!(matches!(parse_table(" \n\r\n"), Err(ChartError::EmptyInput)));
    }

    #[test]
    fn test_parse_unicode() {
        let table = parse_table("Häufigkeit,température\nKaum,20.5").unwrap();
        assert_eq!(table.headers, vec!["Häufigkeit", "température"]);
        assert_eq!(table.entries[0], vec!["Kaum", "20.5"]);
    }

    #[test]
    fn test_read_table_from_reader() {
        let table = read_table(Cursor::new("a,b\n1,2\n")).unwrap();
        assert_eq!(table.entries, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_read_table_from_missing_path() {
        let result = read_table_from_path(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(ChartError::FileRead { .. })));
    }

    #[test]
    fn test_column_lookup_is_exact() {
        let table = parse_table("Color,size\nred,1").unwrap();
        assert_eq!(table.column_index("Color"), Some(0));
        assert_eq!(table.column_index("color"), None);

        let err = table.require_column("weight").unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("Color, size"));
    }

    #[test]
    fn test_column_values() {
        let table = parse_table("a,b\n1,x\n2,y").unwrap();
        let values: Vec<&str> = table.column(1).collect();
        assert_eq!(values, vec!["x", "y"]);
    }
}
