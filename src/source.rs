use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};

use crate::directory::EmployeeDirectory;
use crate::error::{DashboardError, Result};
use crate::models::Record;

/// Loads records from a `.csv` export or a `.json` array of rows.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let records = match extension.as_deref() {
        Some("csv") => {
            let file = File::open(path).map_err(|source| DashboardError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            read_csv(file).map_err(|source| DashboardError::Csv {
                path: path.to_path_buf(),
                source,
            })?
        }
        Some("json") => {
            let raw = read_to_string(path)?;
            read_json(&raw).map_err(|source| DashboardError::Json {
                path: path.to_path_buf(),
                source,
            })?
        }
        _ => return Err(DashboardError::UnsupportedFormat(path.to_path_buf())),
    };

    tracing::info!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Parses CSV rows keyed by header. Short rows and unknown columns are tolerated.
pub fn read_csv<R: Read>(reader: R) -> std::result::Result<Vec<Record>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in reader.deserialize::<Record>() {
        records.push(result?);
    }
    Ok(records)
}

/// Parses a JSON array of row objects. Number, boolean and null cells become
/// text first, so a numeric `Cash Collected` reads like its string form.
pub fn read_json(raw: &str) -> serde_json::Result<Vec<Record>> {
    let rows: Vec<Map<String, Value>> = serde_json::from_str(raw)?;
    rows.into_iter()
        .map(|row| {
            let cells: Map<String, Value> = row
                .into_iter()
                .map(|(column, cell)| (column, Value::String(cell_text(cell))))
                .collect();
            serde_json::from_value(Value::Object(cells))
        })
        .collect()
}

fn cell_text(cell: Value) -> String {
    match cell {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn load_directory(path: &Path) -> Result<EmployeeDirectory> {
    let raw = read_to_string(path)?;
    let directory: EmployeeDirectory =
        serde_json::from_str(&raw).map_err(|source| DashboardError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(
        path = %path.display(),
        closers = directory.closers.len(),
        setters = directory.setters.len(),
        coaches = directory.coaches.len(),
        "loaded employee directory"
    );
    Ok(directory)
}

fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })
}
