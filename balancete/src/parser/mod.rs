//! CSV reader for wide-format exports, with encoding and delimiter auto-detection.
//!
//! Produces a [`RawTable`] of trimmed string cells. No knowledge of months or
//! identity columns lives here; that is the validator's job.

pub mod number;

use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::{RawRow, RawTable};

pub use number::{is_blank, parse_amount, zero_amount};

const BOM: char = '\u{feff}';

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed table
    pub table: RawTable,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
}

impl ParseResult {
    pub fn headers(&self) -> &[String] {
        &self.table.headers
    }
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 is taken at face value. Anything else is a single-byte Western
/// export: chardet decides between Latin-1 and Windows-1252, and whatever else
/// it guesses is read as Windows-1252.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        _ => "windows-1252".to_string(),
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8(bytes.to_vec())
            .map_err(|e| CsvError::EncodingError(e.to_string()))?,
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        other => {
            let encoding = encoding_rs::Encoding::for_label(other.as_bytes())
                .ok_or_else(|| CsvError::EncodingError(format!("unknown encoding '{}'", other)))?;
            encoding.decode(bytes).0.into_owned()
        }
    };

    Ok(decoded.trim_start_matches(BOM).to_string())
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text with an explicit delimiter.
///
/// The first record is the header. Cells are trimmed, rows shorter than the
/// header are kept as-is (missing cells read as empty) and blank lines are
/// skipped.
///
/// # Example
/// ```
/// use balancete::parser::parse_csv;
///
/// let table = parse_csv("Tipo,Grupo,Categoria,Jun/23\nEntrada,G,C,10.00", ',').unwrap();
/// assert_eq!(table.headers.len(), 4);
/// assert_eq!(table.rows[0].cell(3), "10.00");
/// ```
pub fn parse_csv(content: &str, delimiter: char) -> CsvResult<RawTable> {
    if !delimiter.is_ascii() {
        return Err(CsvError::InvalidDelimiter(delimiter));
    }

    let content = content.trim_start_matches(BOM);
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let header = records
        .next()
        .ok_or(CsvError::EmptyFile)?
        .map_err(|e| to_parse_error(&e, 1))?;
    let headers: Vec<String> = header.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| to_parse_error(&e, 0))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.iter().all(is_blank) {
            continue;
        }

        rows.push(RawRow::new(line, record.iter().map(str::to_string).collect()));
    }

    Ok(RawTable::new(headers, rows))
}

fn to_parse_error(err: &csv::Error, fallback_line: u64) -> CsvError {
    let line = err
        .position()
        .map(|p| p.line())
        .unwrap_or(fallback_line);
    CsvError::ParseError {
        line,
        message: err.to_string(),
    }
}

/// Parse CSV file with auto-detection of encoding and (unless given) delimiter.
///
/// # Example
/// ```ignore
/// let result = parse_csv_file_auto("balancete.csv", None)?;
/// println!("Encoding: {}, Delimiter: '{}'", result.encoding, result.delimiter);
/// println!("Rows: {}", result.table.row_count());
/// ```
pub fn parse_csv_file_auto<P: AsRef<Path>>(
    path: P,
    delimiter: Option<char>,
) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes, delimiter)
}

/// Parse CSV bytes with auto-detection of encoding and (unless given) delimiter.
pub fn parse_bytes_auto(bytes: &[u8], delimiter: Option<char>) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));

    let table = parse_csv(&content, delimiter)?;

    Ok(ParseResult {
        table,
        encoding,
        delimiter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_csv() {
        let csv = "Tipo,Grupo,Categoria,Jun/23\nEntrada,Vendas,Loja,100.00\nSaída,Custos,Aluguel,50.00";
        let table = parse_csv(csv, ',').unwrap();

        assert_eq!(table.headers, vec!["Tipo", "Grupo", "Categoria", "Jun/23"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0].cell(0), "Entrada");
        assert_eq!(table.rows[1].cell(0), "Saída");
        assert_eq!(table.rows[1].cell(3), "50.00");
    }

    #[test]
    fn test_line_numbers_follow_file() {
        let csv = "a,b\n1,2\n3,4\n";
        let table = parse_csv(csv, ',').unwrap();

        assert_eq!(table.rows[0].line, 2);
        assert_eq!(table.rows[1].line, 3);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let csv = "a,b\n1,2\n\n , \n3,4\n";
        let table = parse_csv(csv, ',').unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1].cells, vec!["3", "4"]);
    }

    #[test]
    fn test_quoted_comma_decimals() {
        let csv = "Tipo,Grupo,Categoria,Jun/23\nEntrada,G,C,\"1.234,56\"";
        let table = parse_csv(csv, ',').unwrap();

        assert_eq!(table.rows[0].cell(3), "1.234,56");
    }

    #[test]
    fn test_cells_are_trimmed() {
        let csv = " Tipo ; Grupo \n  Entrada ;  Vendas  ";
        let table = parse_csv(csv, ';').unwrap();

        assert_eq!(table.headers, vec!["Tipo", "Grupo"]);
        assert_eq!(table.rows[0].cells, vec!["Entrada", "Vendas"]);
    }

    #[test]
    fn test_missing_values() {
        let csv = "a;b;c\n1;;3\n4";
        let table = parse_csv(csv, ';').unwrap();

        assert_eq!(table.rows[0].cell(1), "");
        assert_eq!(table.rows[1].cell(0), "4");
        assert_eq!(table.rows[1].cell(2), "");
    }

    #[test]
    fn test_bom_is_stripped() {
        let csv = "\u{feff}Tipo,Grupo\nA,B";
        let table = parse_csv(csv, ',').unwrap();

        assert_eq!(table.headers[0], "Tipo");
    }

    #[test]
    fn test_empty_csv_error() {
        assert!(matches!(parse_csv("", ','), Err(CsvError::EmptyFile)));
        assert!(matches!(parse_csv("  \n ", ','), Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        assert!(matches!(
            parse_csv("a§b", '§'),
            Err(CsvError::InvalidDelimiter('§'))
        ));
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        assert_eq!(detect_delimiter("Tipo;Grupo;Categoria\n1;2;3"), ';');
    }

    #[test]
    fn test_detect_delimiter_comma() {
        assert_eq!(detect_delimiter("Tipo,Grupo,Categoria\n1,2,3"), ',');
    }

    #[test]
    fn test_detect_delimiter_tab() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
    }

    #[test]
    fn test_auto_parse() {
        let csv = "Tipo;Grupo;Categoria;Jun/23\nEntrada;G;C;\"10,5\"";
        let result = parse_bytes_auto(csv.as_bytes(), None).unwrap();

        assert_eq!(result.delimiter, ';');
        assert_eq!(result.encoding, "utf-8");
        assert_eq!(result.table.row_count(), 1);
        assert_eq!(result.headers(), &["Tipo", "Grupo", "Categoria", "Jun/23"]);
    }

    #[test]
    fn test_explicit_delimiter_wins() {
        let csv = "a;b,c\n1;2,3";
        let result = parse_bytes_auto(csv.as_bytes(), Some(',')).unwrap();

        assert_eq!(result.delimiter, ',');
        assert_eq!(result.headers(), &["a;b", "c"]);
    }

    #[test]
    fn test_non_utf8_is_western() {
        let bytes: &[u8] = b"Tipo;Grupo\nSa\xedda;Cust\xf5es";
        let encoding = detect_encoding(bytes);
        assert!(encoding == "iso-8859-1" || encoding == "windows-1252");

        let decoded = decode_content(bytes, &encoding).unwrap();
        assert!(decoded.contains("Saída"));
    }

    #[test]
    fn test_unknown_encoding_label() {
        assert!(matches!(
            decode_content(b"abc", "no-such-charset"),
            Err(CsvError::EncodingError(_))
        ));
    }

    #[test]
    fn test_latin1_decoding() {
        // "Saída" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x61, 0xED, 0x64, 0x61];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert_eq!(decoded, "Saída");
    }
}
