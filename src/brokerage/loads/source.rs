use serde_json::{Map, Value};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::domain::Load;

const CORE_COLUMNS: [&str; 5] = [
    "load_id",
    "origin",
    "destination",
    "equipment_type",
    "loadboard_rate",
];

/// On-disk encodings accepted for the load dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Csv,
}

impl DatasetFormat {
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(DatasetError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read load dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid load JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid load CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("load CSV is missing the '{0}' column")]
    MissingColumn(&'static str),
    #[error("row {row}: loadboard_rate '{value}' is not a number")]
    InvalidRate { row: usize, value: String },
    #[error("unsupported dataset format for '{0}' (expected .json or .csv)")]
    UnsupportedFormat(String),
}

pub fn read_loads<P: AsRef<Path>>(path: P) -> Result<Vec<Load>, DatasetError> {
    let path = path.as_ref();
    let format = DatasetFormat::from_path(path)?;
    let file = File::open(path)?;
    read_loads_from(file, format)
}

pub(crate) fn read_loads_from<R: Read>(
    reader: R,
    format: DatasetFormat,
) -> Result<Vec<Load>, DatasetError> {
    match format {
        DatasetFormat::Json => Ok(serde_json::from_reader(reader)?),
        DatasetFormat::Csv => read_csv(reader),
    }
}

fn read_csv<R: Read>(reader: R) -> Result<Vec<Load>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut positions = [0usize; CORE_COLUMNS.len()];
    for (slot, column) in positions.iter_mut().zip(CORE_COLUMNS) {
        *slot = headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(column))
            .ok_or(DatasetError::MissingColumn(column))?;
    }
    let [id_at, origin_at, destination_at, equipment_at, rate_at] = positions;

    let mut loads = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let field = |at: usize| row.get(at).unwrap_or_default().to_string();

        let raw_rate = field(rate_at);
        let loadboard_rate = raw_rate
            .replace([',', '$'], "")
            .parse::<f64>()
            .map_err(|_| DatasetError::InvalidRate {
                row: index + 2,
                value: raw_rate.clone(),
            })?;

        let mut attributes = Map::new();
        for (at, header) in headers.iter().enumerate() {
            if positions.contains(&at) {
                continue;
            }
            let value = field(at);
            if !value.is_empty() {
                attributes.insert(header.to_string(), Value::String(value));
            }
        }

        loads.push(Load {
            load_id: field(id_at),
            origin: field(origin_at),
            destination: field(destination_at),
            equipment_type: field(equipment_at),
            loadboard_rate,
            attributes,
        });
    }

    Ok(loads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(
            DatasetFormat::from_path(Path::new("data/loads.JSON")).expect("json"),
            DatasetFormat::Json
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("exports/loads.csv")).expect("csv"),
            DatasetFormat::Csv
        );
        assert!(matches!(
            DatasetFormat::from_path(Path::new("loads.xlsx")),
            Err(DatasetError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn parses_csv_with_extra_columns() {
        let csv = "load_id,origin,destination,equipment_type,loadboard_rate,miles,notes\n\
                   L001,\"Los Angeles, CA\",\"Phoenix, AZ\",Dry Van,\"$1,850\",372,\n";
        let loads = read_loads_from(Cursor::new(csv), DatasetFormat::Csv).expect("csv parses");

        assert_eq!(loads.len(), 1);
        let load = &loads[0];
        assert_eq!(load.origin, "Los Angeles, CA");
        assert_eq!(load.loadboard_rate, 1850.0);
        assert_eq!(load.attributes["miles"], "372");
        assert!(!load.attributes.contains_key("notes"));
    }

    #[test]
    fn csv_without_rate_column_is_rejected() {
        let csv = "load_id,origin,destination,equipment_type\nL001,A,B,Reefer\n";
        let err = read_loads_from(Cursor::new(csv), DatasetFormat::Csv).expect_err("missing");
        assert!(matches!(err, DatasetError::MissingColumn("loadboard_rate")));
    }

    #[test]
    fn csv_rate_must_be_numeric() {
        let csv = "load_id,origin,destination,equipment_type,loadboard_rate\nL001,A,B,Reefer,call\n";
        let err = read_loads_from(Cursor::new(csv), DatasetFormat::Csv).expect_err("bad rate");
        assert!(matches!(err, DatasetError::InvalidRate { row: 2, .. }));
    }

    #[test]
    fn json_must_be_an_array_of_loads() {
        let err = read_loads_from(Cursor::new("{\"loads\": []}"), DatasetFormat::Json)
            .expect_err("object rejected");
        assert!(matches!(err, DatasetError::Json(_)));
    }
}
