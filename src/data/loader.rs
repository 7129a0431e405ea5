use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{CellValue, Dataset, Record};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Extensions [`load_file`] knows how to read.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["xlsx", "xls", "ods", "csv", "json", "parquet"];

/// Load a listing export from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xls` / `.ods` – first worksheet, header in the first row
/// * `.csv`     – header row with column names
/// * `.json`    – `[{ "Lokalita": "...", "Cena": 1990000, ... }, ...]`
/// * `.parquet` – one column per export column
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = extension_of(path);

    let (header, records) = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => read_workbook(path)?,
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    Dataset::from_records(header.iter().map(String::as_str), &records)
}

/// Find the newest file in `dir` whose name starts with `prefix` and whose
/// extension is one of `extensions` (case-insensitive).
///
/// Files are ranked by creation time, falling back to modification time on
/// filesystems that do not record it.
pub fn find_latest(dir: &Path, prefix: &str, extensions: &[String]) -> Result<Option<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("listing directory {}", dir.display()))?;

    let mut best: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry.context("reading directory entry")?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let ext = extension_of(&path);
        if !name.starts_with(prefix) || !extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)) {
            continue;
        }
        let meta = entry.metadata().context("reading file metadata")?;
        if !meta.is_file() {
            continue;
        }
        let stamp = file_time(&meta)?;
        match &best {
            Some((newest, _)) if *newest >= stamp => {}
            _ => best = Some((stamp, path)),
        }
    }

    Ok(best.map(|(_, path)| path))
}

/// Creation time of a file, or its modification time when unavailable.
pub fn file_time(meta: &std::fs::Metadata) -> Result<SystemTime> {
    meta.created()
        .or_else(|_| meta.modified())
        .context("file has no creation or modification time")
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

type Table = (Vec<String>, Vec<Record>);

// ---------------------------------------------------------------------------
// Spreadsheet reader
// ---------------------------------------------------------------------------

/// Read the first worksheet; the first row holds the column names.
fn read_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no worksheets")?
        .context("reading first worksheet")?;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .context("worksheet is empty")?
        .iter()
        .map(|c| c.to_string().trim().to_string())
        .collect();

    let records = rows
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|row| {
            header
                .iter()
                .zip(row.iter())
                .map(|(col, cell)| (col.clone(), cell_from_excel(cell)))
                .collect()
        })
        .collect();

    Ok((header, records))
}

fn cell_from_excel(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => guess_cell_type(s),
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let header: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let record: Record = header
            .iter()
            .zip(row.iter())
            .map(|(col, value)| (col.clone(), guess_cell_type(value)))
            .collect();
        records.push(record);
    }

    Ok((header, records))
}

/// Text cells: numbers and booleans are recognised, blanks become null.
fn guess_cell_type(s: &str) -> CellValue {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return CellValue::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return CellValue::Float(f);
    }
    match trimmed {
        "True" | "true" => CellValue::Bool(true),
        "False" | "false" => CellValue::Bool(false),
        _ => CellValue::String(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn read_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<BTreeMap<String, Option<CellValue>>> =
        serde_json::from_str(&text).context("parsing JSON records")?;

    let mut header: Vec<String> = Vec::new();
    let records = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(col, value)| {
                    if !header.contains(&col) {
                        header.push(col.clone());
                    }
                    (col, value.unwrap_or(CellValue::Null))
                })
                .collect()
        })
        .collect();

    Ok((header, records))
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

fn read_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let header: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row in 0..batch.num_rows() {
            let record: Record = schema
                .fields()
                .iter()
                .enumerate()
                .map(|(idx, field)| (field.name().clone(), extract_cell(batch.column(idx), row)))
                .collect();
            records.push(record);
        }
    }

    Ok((header, records))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|a| CellValue::String(a.value(row).to_string())),
        DataType::LargeUtf8 => Some(CellValue::String(
            col.as_string::<i64>().value(row).to_string(),
        )),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| CellValue::Float(a.value(row) as f64)),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| CellValue::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| CellValue::Bool(a.value(row))),
        other => {
            log::debug!("Unsupported parquet column type {other:?}, treating as null");
            None
        }
    };
    value.unwrap_or(CellValue::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::columns;
    use std::io::Write;

    const CSV_HEADER: &str = "Lokalita,Výnos %,Cena,Obrazek,Zdroj,Název,m2,URL";

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_without_optional_columns_gets_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let body = format!(
            "{CSV_HEADER}\nBrno,5.5,2500000,https://a/1.jpg,Sreality,Byt 1+kk,31,https://x/1\n"
        );
        let path = write(dir.path(), "INVESTICNI_HITPARADA_1.csv", &body);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        let l = &ds.listings[0];
        assert_eq!(l.locality, "Brno");
        assert_eq!(l.yield_percent, 5.5);
        assert_eq!(l.price, 2_500_000.0);
        assert!(!l.is_share && !l.is_auction);
        assert_eq!((l.latitude, l.longitude), (0.0, 0.0));
        assert_eq!(l.description, "");
    }

    #[test]
    fn json_records_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let body = r#"[{"Lokalita":"Praha","Výnos %":4.2,"Cena":5990000,"Obrazek":null,
            "Zdroj":"Bezrealitky","Název":"Byt 2+kk","m2":48,"URL":"https://x/2",
            "JePodil":true,"Lat":50.08,"Lon":14.43,"Popis":"Cihlový dům, sklep"}]"#;
        let path = write(dir.path(), "export.json", body);

        let ds = load_file(&path).unwrap();
        let l = &ds.listings[0];
        assert!(l.is_share);
        assert!(!l.has_photo());
        assert!(l.has_location());
        assert_eq!(l.description, "Cihlový dům, sklep");
    }

    #[test]
    fn xlsx_export_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("INVESTICNI_HITPARADA_x.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (c, name) in columns::REQUIRED.iter().enumerate() {
            sheet.write_string(0, c as u16, *name).unwrap();
        }
        sheet.write_string(0, 8, columns::IS_AUCTION).unwrap();
        sheet.write_string(1, 0, "Plzeň").unwrap();
        sheet.write_number(1, 1, 7.25).unwrap();
        sheet.write_number(1, 2, 1_450_000.0).unwrap();
        sheet.write_string(1, 4, "Sreality").unwrap();
        sheet.write_string(1, 5, "Byt 3+1").unwrap();
        sheet.write_number(1, 6, 68.0).unwrap();
        sheet.write_string(1, 7, "https://x/3").unwrap();
        sheet.write_boolean(1, 8, true).unwrap();
        workbook.save(&path).unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        let l = &ds.listings[0];
        assert_eq!(l.locality, "Plzeň");
        assert_eq!(l.yield_percent, 7.25);
        assert!(l.is_auction);
        assert!(!l.has_photo());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "data.txt", "");
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains(".txt"));
    }

    #[test]
    fn latest_matching_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "INVESTICNI_HITPARADA_old.xlsx", "");
        std::thread::sleep(std::time::Duration::from_millis(50));
        write(dir.path(), "OTHER_new.xlsx", "");
        write(dir.path(), "INVESTICNI_HITPARADA_new.csv", "");
        std::thread::sleep(std::time::Duration::from_millis(50));
        let newest = write(dir.path(), "INVESTICNI_HITPARADA_new.XLSX", "");

        let exts = vec!["xlsx".to_string()];
        let found = find_latest(dir.path(), "INVESTICNI_HITPARADA", &exts).unwrap();
        assert_eq!(found, Some(newest));
    }

    #[test]
    fn no_matching_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "notes.xlsx", "");
        let exts = vec!["xlsx".to_string()];
        assert_eq!(
            find_latest(dir.path(), "INVESTICNI_HITPARADA", &exts).unwrap(),
            None
        );
    }

    #[test]
    fn text_cells_are_typed() {
        assert_eq!(guess_cell_type(""), CellValue::Null);
        assert_eq!(guess_cell_type("nan"), CellValue::Null);
        assert_eq!(guess_cell_type("12"), CellValue::Integer(12));
        assert_eq!(guess_cell_type("4.5"), CellValue::Float(4.5));
        assert_eq!(guess_cell_type("False"), CellValue::Bool(false));
        assert_eq!(guess_cell_type("Brno"), CellValue::String("Brno".into()));
    }
}
