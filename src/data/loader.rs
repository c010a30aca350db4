use std::path::Path;

use encoding_rs::{Encoding, WINDOWS_1252};

use super::model::{CellValue, Dataset, Record};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the sales table from a delimited text file.
///
/// `encoding` is a WHATWG label (`"windows-1252"`, `"utf-8"`, ...). The file
/// is decoded as a whole before parsing, so a file saved by a spreadsheet in
/// a legacy code page keeps its accented names.
pub fn load_file(path: &Path, encoding: &str) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "txt" | "" => load_csv(path, encoding),
        other => Err(DashboardError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path, encoding: &str) -> Result<Dataset> {
    let bytes = std::fs::read(path).map_err(|e| DashboardError::load(path, e))?;
    let text = decode(&bytes, encoding).map_err(|e| match e {
        DashboardError::Load { reason, .. } => DashboardError::load(path, reason),
        other => other,
    })?;
    let dataset = parse_csv(&text)?;

    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        dataset.len(),
        dataset.column_names,
        path.display()
    );
    Ok(dataset)
}

/// Bytes with no character in the Windows-1252 code page. The WHATWG
/// decoder passes them through as C1 controls.
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Decode raw bytes with the named encoding. BOMs are not sniffed: the
/// label wins.
pub fn decode(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| DashboardError::UnknownEncoding(label.to_string()))?;

    if encoding == WINDOWS_1252 {
        if let Some(pos) = bytes.iter().position(|b| CP1252_UNDEFINED.contains(b)) {
            return Err(DashboardError::load(
                "<input>",
                format!("byte 0x{:02X} at offset {pos} is undefined in windows-1252", bytes[pos]),
            ));
        }
    }

    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| DashboardError::load("<input>", format!("not valid {}", encoding.name())))
}

/// Parse decoded CSV text. Header row required; short rows are padded with
/// `Null`, long rows are truncated to the header width. Fields keep their
/// surrounding spaces.
pub fn parse_csv(text: &str) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let width = headers.len();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let mut cells: Vec<CellValue> = row.iter().take(width).map(CellValue::parse).collect();
        cells.resize(width, CellValue::Null);
        records.push(Record::new(cells));
    }

    Ok(Dataset::from_records(headers, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    const HEADER: &str = "User_ID,Cust_name,Gender,Age,State,Zone,Occupation,Amount";

    fn write_csv(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn loads_rows_and_infers_types() {
        let body = format!(
            "{HEADER}\n\
             1000001,Sanskriti,F,28,Maharashtra,Western,Healthcare,23952\n\
             1000002,Kartik,M,35,Delhi,Central,Lawyer,2049.5\n"
        );
        let file = write_csv(body.as_bytes());

        let ds = load_file(file.path(), "windows-1252").unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.column_names.len(), 8);

        let view = ds.full_view();
        assert_eq!(view.numeric("Age").unwrap(), vec![28.0, 35.0]);
        assert_eq!(view.numeric("Amount").unwrap(), vec![23952.0, 2049.5]);
        let zones: Vec<_> = view.column("Zone").unwrap().map(|v| v.to_string()).collect();
        assert_eq!(zones, vec!["Western", "Central"]);
    }

    #[test]
    fn decodes_windows_1252() {
        // 0xE9 is 'é' in Windows-1252 and invalid on its own in UTF-8.
        let mut body = format!("{HEADER}\n1000003,Ren").into_bytes();
        body.push(0xE9);
        body.extend_from_slice(b",F,41,Kerala,Southern,IT Sector,9999\n");
        let file = write_csv(&body);

        let ds = load_file(file.path(), "windows-1252").unwrap();
        let names: Vec<_> = ds
            .full_view()
            .column("Cust_name")
            .unwrap()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(names, vec!["René"]);
    }

    #[test]
    fn wrong_encoding_is_a_load_error() {
        let mut body = format!("{HEADER}\n1,Ren").into_bytes();
        body.push(0xE9);
        body.extend_from_slice(b",F,41,Kerala,Southern,IT Sector,9999\n");
        let file = write_csv(&body);

        let err = load_file(file.path(), "utf-8").unwrap_err();
        assert!(matches!(err, DashboardError::Load { .. }));
    }

    #[test]
    fn undefined_cp1252_byte_is_a_load_error() {
        let mut body = format!("{HEADER}\n1,Ren").into_bytes();
        body.push(0x81);
        body.extend_from_slice(b",F,41,Kerala,Southern,IT Sector,9999\n");
        let file = write_csv(&body);

        let err = load_file(file.path(), "windows-1252").unwrap_err();
        assert!(matches!(&err, DashboardError::Load { reason, .. } if reason.contains("0x81")));
        for byte in CP1252_UNDEFINED {
            assert!(decode(&[b'a', byte], "cp1252").is_err(), "0x{byte:02X}");
        }
        assert_eq!(decode(&[0x80], "windows-1252").unwrap(), "€");
    }

    #[test]
    fn unknown_encoding_label() {
        let file = write_csv(HEADER.as_bytes());
        let err = load_file(file.path(), "klingon").unwrap_err();
        assert!(matches!(err, DashboardError::UnknownEncoding(_)));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_file(Path::new("/definitely/not/here/data.csv"), "windows-1252").unwrap_err();
        assert!(err.is_load_failure());
        assert!(matches!(err, DashboardError::Load { .. }));
    }

    #[test]
    fn rejects_other_formats() {
        let err = load_file(Path::new("sales.parquet"), "windows-1252").unwrap_err();
        assert!(matches!(err, DashboardError::UnsupportedFormat(ext) if ext == "parquet"));
    }

    #[test]
    fn ragged_rows_are_padded_and_truncated() {
        let ds = parse_csv("State,Gender,Amount\nGoa,F\nBihar,M,10,extra,,\n").unwrap();
        assert_eq!(ds.len(), 2);
        assert!(ds.records[0].get(2).is_null());
        assert_eq!(ds.records[1].cells.len(), 3);
        assert_eq!(ds.records[1].get(2), &CellValue::Integer(10));
    }

    #[test]
    fn surrounding_spaces_are_kept_in_categories() {
        let ds = parse_csv("Gender,Age\nM,30\n M, 41 \n").unwrap();
        let genders = ds.unique_values("Gender").unwrap();
        assert_eq!(genders, &[CellValue::from("M"), CellValue::from(" M")]);
        assert_eq!(ds.full_view().numeric("Age").unwrap(), vec![30.0, 41.0]);
    }

    #[test]
    fn header_only_file_is_empty_dataset() {
        let ds = parse_csv(HEADER).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.column_names.len(), 8);
    }

    #[test]
    fn missing_column_surfaces_later() {
        let ds = parse_csv("State,Gender\nGoa,F\n").unwrap();
        let err = ds.full_view().numeric("Amount").unwrap_err();
        assert!(matches!(err, DashboardError::ColumnNotFound(c) if c == "Amount"));
    }
}
