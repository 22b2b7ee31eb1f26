use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::cell::{parse_amount, parse_integer};
use super::model::{Dataset, Record, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("expected a top-level JSON array of records")]
    NotRecordArray,
    /// `row` is the 1-based data row (the header is not counted).
    #[error("row {row}: {message}")]
    Malformed { row: usize, message: String },
    #[error("reading data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("Arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

fn malformed(row: usize, message: impl ToString) -> LoadError {
    LoadError::Malformed {
        row,
        message: message.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a financial dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`            – comma-delimited with a header row
/// * `.tsv` / `.tab`   – tab-delimited with a header row
/// * `.json`           – `[{ "Product": "...", "Sales": 1.0, ... }, ...]`
/// * `.parquet` / `.pq` – one column per field
///
/// Header names are trimmed before lookup in every format.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let open = || {
        File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
            _ => LoadError::Io(e),
        })
    };

    let dataset = match ext.as_str() {
        "csv" => load_delimited(open()?, b',')?,
        "tsv" | "tab" => load_delimited(open()?, b'\t')?,
        "json" => load_json(open()?)?,
        "parquet" | "pq" => load_parquet(open()?)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} records from {} ({} products, {} segments, {} countries)",
        dataset.len(),
        path.display(),
        dataset.products.len(),
        dataset.segments.len(),
        dataset.countries.len()
    );
    Ok(dataset)
}

fn check_columns(headers: &[&str]) -> Result<(), LoadError> {
    for required in REQUIRED_COLUMNS {
        if !headers.contains(&required) {
            return Err(LoadError::MissingColumn(required));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Delimited (CSV / TSV) loader
// ---------------------------------------------------------------------------

/// Header row with column names; columns beyond the required set are ignored.
fn load_delimited<R: Read>(input: R, delimiter: u8) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    check_columns(&headers.iter().map(String::as_str).collect::<Vec<_>>())?;

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<Record>().enumerate() {
        let record = result.map_err(|e| malformed(i + 1, e))?;
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json<R: Read>(input: R) -> Result<Dataset, LoadError> {
    let root: JsonValue = serde_json::from_reader(BufReader::new(input))?;
    let rows = root.as_array().ok_or(LoadError::NotRecordArray)?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| malformed(i + 1, "not a JSON object"))?;

        let trimmed: serde_json::Map<String, JsonValue> = obj
            .iter()
            .map(|(k, v)| (k.trim().to_string(), v.clone()))
            .collect();
        check_columns(&trimmed.keys().map(String::as_str).collect::<Vec<_>>())?;

        let record: Record =
            serde_json::from_value(JsonValue::Object(trimmed)).map_err(|e| malformed(i + 1, e))?;
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per record field.
///
/// Text columns are read as Utf8; numeric columns may use any Arrow numeric
/// type, or hold currency-formatted text.
fn load_parquet(file: File) -> Result<Dataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    // Checked against the file schema so a file with no row groups still fails.
    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().trim().to_string())
        .collect();
    check_columns(&names.iter().map(String::as_str).collect::<Vec<_>>())?;
    let reader = builder.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let column = |name: &'static str| -> Result<ArrayRef, LoadError> {
            let idx = schema
                .fields()
                .iter()
                .position(|f| f.name().trim() == name)
                .ok_or(LoadError::MissingColumn(name))?;
            Ok(batch.column(idx).clone())
        };

        let product = text_values(&column("Product")?)?;
        let segment = text_values(&column("Segment")?)?;
        let country = text_values(&column("Country")?)?;
        let years = integer_values(&column("Year")?)?;
        let months = integer_values(&column("Month Number")?)?;
        let sales = amount_values(&column("Sales")?)?;
        let profit = amount_values(&column("Profit")?)?;
        let cogs = amount_values(&column("COGS")?)?;

        for i in 0..batch.num_rows() {
            let row = records.len() + 1;
            let null = |col: &str| malformed(row, format!("'{col}' is null or not a number"));

            records.push(Record {
                product: product[i].clone().ok_or_else(|| null("Product"))?,
                segment: segment[i].clone().ok_or_else(|| null("Segment"))?,
                country: country[i].clone().ok_or_else(|| null("Country"))?,
                year: years[i]
                    .and_then(|v| i32::try_from(v).ok())
                    .ok_or_else(|| null("Year"))?,
                month: months[i]
                    .and_then(|v| u32::try_from(v).ok())
                    .ok_or_else(|| null("Month Number"))?,
                sales: sales[i].ok_or_else(|| null("Sales"))?,
                profit: profit[i].ok_or_else(|| null("Profit"))?,
                cogs: cogs[i].ok_or_else(|| null("COGS"))?,
            });
        }
    }

    Ok(Dataset::from_records(records))
}

// -- Arrow helpers --

fn is_text(col: &ArrayRef) -> bool {
    matches!(col.data_type(), DataType::Utf8 | DataType::LargeUtf8)
}

fn text_values(col: &ArrayRef) -> Result<Vec<Option<String>>, LoadError> {
    let utf8 = cast(col, &DataType::Utf8)?;
    Ok(utf8
        .as_string::<i32>()
        .iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

fn integer_values(col: &ArrayRef) -> Result<Vec<Option<i64>>, LoadError> {
    if is_text(col) {
        return Ok(text_values(col)?
            .iter()
            .map(|v| v.as_deref().and_then(parse_integer))
            .collect());
    }
    let ints = cast(col, &DataType::Int64)?;
    Ok(ints.as_primitive::<Int64Type>().iter().collect())
}

fn amount_values(col: &ArrayRef) -> Result<Vec<Option<f64>>, LoadError> {
    if is_text(col) {
        return Ok(text_values(col)?
            .iter()
            .map(|v| v.as_deref().and_then(parse_amount))
            .collect());
    }
    let floats = cast(col, &DataType::Float64)?;
    Ok(floats.as_primitive::<Float64Type>().iter().collect())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    const PADDED_CSV: &str = r#" Segment ,Country,Product ,Discount Band, Year ,Month Number , Sales , Profit ,COGS
Government,Canada,Carretera,None,2014,1," $32,370.00 "," $16,185.00 "," $16,185.00 "
Midmarket,France,Paseo,Low,2013,10," $18,000.00 "," $(1,200.50)"," $19,200.50 "
Government,Canada,Carretera,None,2014,6," $-   "," $-   "," $-   "
"#;

    fn write_temp(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn csv_headers_are_trimmed_and_amounts_parsed() {
        let ds = load_delimited(PADDED_CSV.as_bytes(), b',').unwrap();

        assert_eq!(ds.len(), 3);
        let first = &ds.records[0];
        assert_eq!(first.product, "Carretera");
        assert_eq!(first.segment, "Government");
        assert_eq!(first.year, 2014);
        assert_eq!(first.month, 1);
        assert_eq!(first.sales, 32370.0);

        assert_eq!(ds.records[1].profit, -1200.5);
        assert_eq!(ds.records[2].sales, 0.0);
        assert_eq!(ds.products, vec!["Carretera", "Paseo"]);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let csv = "Product,Segment,Country,Year,Month Number,Sales,Profit\nA,X,US,2020,1,1,1\n";
        let err = load_delimited(csv.as_bytes(), b',').unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("COGS")), "{err}");
    }

    #[test]
    fn malformed_row_reports_data_row_number() {
        let csv = "Product,Segment,Country,Year,Month Number,Sales,Profit,COGS\n\
                   A,X,US,2020,1,100,20,80\n\
                   B,Y,UK,twenty,2,200,50,150\n";
        let err = load_delimited(csv.as_bytes(), b',').unwrap_err();
        match err {
            LoadError::Malformed { row, .. } => assert_eq!(row, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_row_is_malformed() {
        let csv = "Product,Segment,Country,Year,Month Number,Sales,Profit,COGS\nA,X,US,2020\n";
        let err = load_delimited(csv.as_bytes(), b',').unwrap_err();
        assert!(matches!(err, LoadError::Malformed { row: 1, .. }), "{err}");
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_file(Path::new("/definitely/not/here/financials.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)), "{err}");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_temp(".xlsx", b"");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ref e) if e == "xlsx"), "{err}");
    }

    #[test]
    fn tsv_file_loads() {
        let file = write_temp(
            ".tsv",
            b"Product\tSegment\tCountry\tYear\tMonth Number\tSales\tProfit\tCOGS\n\
              A\tX\tUS\t2020\t1\t100\t20\t80\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].cogs, 80.0);
    }

    #[test]
    fn json_records_load_with_trimmed_keys() {
        let file = write_temp(
            ".json",
            br#"[
                {" Product ": "A", "Segment": "X", "Country": "US", "Year": 2020,
                 "Month Number": 1, "Sales": 100, "Profit": " $20.00 ", "COGS": 80.0}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.records[0].product, "A");
        assert_eq!(ds.records[0].profit, 20.0);
    }

    #[test]
    fn json_must_be_an_array() {
        let err = load_json(&br#"{"Product": "A"}"#[..]).unwrap_err();
        assert!(matches!(err, LoadError::NotRecordArray));
    }

    #[test]
    fn parquet_file_loads() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Product", DataType::Utf8, false),
            Field::new("Segment", DataType::Utf8, false),
            Field::new(" Country ", DataType::Utf8, false),
            Field::new("Year", DataType::Int64, false),
            Field::new("Month Number", DataType::Int64, false),
            Field::new("Sales", DataType::Float64, false),
            Field::new("Profit", DataType::Utf8, false),
            Field::new("COGS", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["A", "B"])),
                Arc::new(StringArray::from(vec!["X", "Y"])),
                Arc::new(StringArray::from(vec!["US", "UK"])),
                Arc::new(Int64Array::from(vec![2020, 2021])),
                Arc::new(Int64Array::from(vec![1, 2])),
                Arc::new(Float64Array::from(vec![100.0, 200.0])),
                Arc::new(StringArray::from(vec![" $20.00 ", " $(5.00)"])),
                Arc::new(Float64Array::from(vec![80.0, 150.0])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].country, "UK");
        assert_eq!(ds.records[1].month, 2);
        assert_eq!(ds.records[1].profit, -5.0);
        assert_eq!(ds.year_bounds.map(|b| (b.min, b.max)), Some((2020, 2021)));
    }

    #[test]
    fn parquet_without_rows_still_needs_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Product", DataType::Utf8, false),
            Field::new("Segment", DataType::Utf8, false),
            Field::new("Country", DataType::Utf8, false),
            Field::new("Year", DataType::Int64, false),
            Field::new("Month Number", DataType::Int64, false),
            Field::new("Sales", DataType::Float64, false),
            Field::new("Profit", DataType::Float64, false),
        ]));
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.close().unwrap();

        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("COGS")), "{err}");
    }

    #[test]
    fn empty_json_array_is_an_empty_dataset() {
        let file = write_temp(".json", b"[]");
        assert!(load_file(file.path()).unwrap().is_empty());
    }
}
