use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::ChunkReader;
use serde::Deserialize;

use super::columns;
use super::model::{LaunchDataset, LaunchRecord, Outcome};
use super::DatasetError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the pandas export (`df.to_csv()`), extra columns ignored
/// * `.json`    – `[{ "Launch Site": "...", "class": 1, ... }, ...]`
/// * `.parquet` – same column names, numeric columns may be int or float
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV file")?;
            read_csv(file)?
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)?
        }
        "parquet" | "pq" => {
            let file = std::fs::File::open(path).context("opening parquet file")?;
            read_parquet(file)?
        }
        other => return Err(DatasetError::UnsupportedExtension(other.to_string()).into()),
    };

    log::debug!("parsed {} launches from {}", dataset.len(), path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row schema shared by the CSV and JSON loaders
// ---------------------------------------------------------------------------

/// One row as it appears in the source file, before validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Flight Number", default)]
    flight_number: Option<u32>,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    /// Read as float: pandas may write the column as `1.0`.
    #[serde(rename = "class")]
    class: f64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version", default)]
    booster_version: Option<String>,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

impl TryFrom<RawRecord> for LaunchRecord {
    type Error = DatasetError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        Ok(LaunchRecord {
            flight_number: raw.flight_number,
            launch_site: raw.launch_site,
            outcome: Outcome::try_from(raw.class)?,
            payload_mass_kg: raw.payload_mass_kg,
            booster_version: raw.booster_version,
            booster_version_category: raw.booster_version_category,
        })
    }
}

const REQUIRED_COLUMNS: [&str; 4] = [
    columns::LAUNCH_SITE,
    columns::CLASS,
    columns::PAYLOAD_MASS,
    columns::BOOSTER_VERSION_CATEGORY,
];

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per row.
/// The leading unnamed index column written by pandas is ignored, as is any
/// other column the dashboard does not use.
pub fn read_csv<R: Read>(input: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(DatasetError::MissingColumn(required.to_string()).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        let record =
            LaunchRecord::try_from(raw).with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Flight Number": 1,
///     "Launch Site": "CCAFS LC-40",
///     "class": 0,
///     "Payload Mass (kg)": 0.0,
///     "Booster Version": "F9 v1.0  B0003",
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
pub fn parse_json(text: &str) -> Result<LaunchDataset> {
    let rows: Vec<RawRecord> = serde_json::from_str(text).context("parsing JSON")?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, raw)| LaunchRecord::try_from(raw).with_context(|| format!("JSON row {i}")))
        .collect::<Result<Vec<_>>>()?;

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load launches from Parquet.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`); the pandas index column, if present,
/// is ignored like any other extra column.
pub fn read_parquet<R: ChunkReader + 'static>(input: R) -> Result<LaunchDataset> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(input)
        .context("reading parquet metadata")?;

    // Checked up front so a file without rows still reports a bad schema.
    for required in REQUIRED_COLUMNS {
        if builder.schema().index_of(required).is_err() {
            return Err(DatasetError::MissingColumn(required.to_string()).into());
        }
    }

    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, records.len(), &mut records)?;
    }

    Ok(LaunchDataset::from_records(records))
}

fn read_batch(batch: &RecordBatch, row_offset: usize, out: &mut Vec<LaunchRecord>) -> Result<()> {
    let site_col = required_column(batch, columns::LAUNCH_SITE)?;
    let class_col = required_column(batch, columns::CLASS)?;
    let payload_col = required_column(batch, columns::PAYLOAD_MASS)?;
    let category_col = required_column(batch, columns::BOOSTER_VERSION_CATEGORY)?;
    let flight_col = column(batch, columns::FLIGHT_NUMBER);
    let booster_col = column(batch, columns::BOOSTER_VERSION);

    for row in 0..batch.num_rows() {
        let global_row = row_offset + row;
        let class = extract_f64(class_col, global_row, row, columns::CLASS)?;

        let flight_number = match flight_col {
            Some(col) if !col.is_null(row) => {
                Some(extract_u32(col, global_row, row, columns::FLIGHT_NUMBER)?)
            }
            _ => None,
        };
        let booster_version = match booster_col {
            Some(col) if !col.is_null(row) => {
                Some(extract_string(col, global_row, row, columns::BOOSTER_VERSION)?)
            }
            _ => None,
        };

        out.push(LaunchRecord {
            flight_number,
            launch_site: extract_string(site_col, global_row, row, columns::LAUNCH_SITE)?,
            outcome: Outcome::try_from(class)
                .with_context(|| format!("Row {global_row}: invalid '{}'", columns::CLASS))?,
            payload_mass_kg: extract_f64(payload_col, global_row, row, columns::PAYLOAD_MASS)?,
            booster_version,
            booster_version_category: extract_string(
                category_col,
                global_row,
                row,
                columns::BOOSTER_VERSION_CATEGORY,
            )?,
        });
    }
    Ok(())
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Option<&'a ArrayRef> {
    batch.schema().index_of(name).ok().map(|i| batch.column(i))
}

fn required_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, DatasetError> {
    column(batch, name).ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
}

fn unsupported(col: &ArrayRef, row: usize, column: &str) -> DatasetError {
    DatasetError::UnsupportedType {
        row,
        column: column.to_string(),
        found: format!("{:?}", col.data_type()),
    }
}

/// Extract a string cell (Utf8 or LargeUtf8).
fn extract_string(
    col: &ArrayRef,
    global_row: usize,
    row: usize,
    column: &str,
) -> Result<String, DatasetError> {
    if col.is_null(row) {
        return Err(DatasetError::NullValue {
            row: global_row,
            column: column.to_string(),
        });
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|s| s.value(row).to_string())
            .ok_or_else(|| unsupported(col, global_row, column)),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        _ => Err(unsupported(col, global_row, column)),
    }
}

/// Extract a numeric cell as `f64`, accepting the integer and float widths
/// pandas and polars produce.
fn extract_f64(
    col: &ArrayRef,
    global_row: usize,
    row: usize,
    column: &str,
) -> Result<f64, DatasetError> {
    if col.is_null(row) {
        return Err(DatasetError::NullValue {
            row: global_row,
            column: column.to_string(),
        });
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row) as f64),
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        _ => None,
    };
    value.ok_or_else(|| unsupported(col, global_row, column))
}

/// Extract a non-negative whole number. Float columns are accepted because
/// pandas stores integer columns containing nulls as floats.
fn extract_u32(
    col: &ArrayRef,
    global_row: usize,
    row: usize,
    column: &str,
) -> Result<u32, DatasetError> {
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .and_then(|a| u32::try_from(a.value(row)).ok()),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .and_then(|a| u32::try_from(a.value(row)).ok()),
        DataType::Float32 | DataType::Float64 => {
            let v = extract_f64(col, global_row, row, column)?;
            (v.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&v)).then_some(v as u32)
        }
        _ => None,
    };
    value.ok_or_else(|| unsupported(col, global_row, column))
}
