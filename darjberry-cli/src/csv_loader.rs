//! CSV loader for batch location analysis.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column      | Required | Type    | Notes                         |
//! |-------------|----------|---------|-------------------------------|
//! | `latitude`  | yes      | decimal | −90 to 90                     |
//! | `longitude` | yes      | decimal | −180 to 180                   |
//! | `label`     | no       | string  | Free text, e.g. a plot name   |
//!
//! ```csv
//! latitude,longitude,label
//! 27.036,88.2627,Darjeeling town
//! 26.71,88.43,
//! ```
use std::path::{Path, PathBuf};

use darjberry_core::Coordinates;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CsvRow {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    label: Option<String>,
}

/// One input point, with its optional label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledCoordinates {
    pub coordinates: Coordinates,
    pub label: Option<String>,
}

/// Errors that can occur while loading coordinate CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// Bad structure, missing required column or a non-numeric value.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `row` is 1-based, not counting the header.
    #[error("latitude {latitude} out of range on row {row}")]
    LatitudeOutOfRange { latitude: f64, row: usize },

    #[error("longitude {longitude} out of range on row {row}")]
    LongitudeOutOfRange { longitude: f64, row: usize },
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<LabeledCoordinates, CsvLoadError> {
    if !(-90.0..=90.0).contains(&row.latitude) {
        return Err(CsvLoadError::LatitudeOutOfRange {
            latitude: row.latitude,
            row: row_number,
        });
    }
    if !(-180.0..=180.0).contains(&row.longitude) {
        return Err(CsvLoadError::LongitudeOutOfRange {
            longitude: row.longitude,
            row: row_number,
        });
    }

    Ok(LabeledCoordinates {
        coordinates: Coordinates::new(row.latitude, row.longitude),
        label: row.label.filter(|l| !l.is_empty()),
    })
}

/// Parse CSV text into coordinates, in file order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] when the CSV is malformed or a required
///   field cannot be read.
/// * [`CsvLoadError::LatitudeOutOfRange`] / [`CsvLoadError::LongitudeOutOfRange`]
///   for the first row holding an impossible coordinate.
pub fn load_from_str(input: &str) -> Result<Vec<LabeledCoordinates>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<LabeledCoordinates>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}
