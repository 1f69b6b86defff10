use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use log::{debug, error, info};
use ndarray::Array2;

use super::{Dataset, DatasetError, DatasetSource};
use crate::constants::DIGIT_SIDE;

/// Digits in the UCI optdigits text layout: one image per line, 64 comma
/// separated intensities, optionally followed by the class label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDigits {
    path: PathBuf,
}

impl CsvDigits {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_cell<T: std::str::FromStr>(
    row: usize,
    column: usize,
    cell: &str,
) -> Result<T, DatasetError> {
    cell.parse().map_err(|_| {
        error!("Row {}, column {}: {:?} is not a number", row, column, cell);
        DatasetError::InvalidValue {
            row,
            column,
            value: cell.to_string(),
        }
    })
}

impl DatasetSource for CsvDigits {
    fn describe(&self) -> String {
        format!("optdigits file {}", self.path.display())
    }

    fn load(&self) -> Result<Dataset, DatasetError> {
        info!("Loading digits from {:?}", self.path);
        let pixels = DIGIT_SIDE * DIGIT_SIDE;

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_path(&self.path)?;

        let mut flat = Vec::new();
        let mut targets = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() != pixels && record.len() != pixels + 1 {
                error!(
                    "Row {} has {} columns, expected {} or {}",
                    row,
                    record.len(),
                    pixels,
                    pixels + 1
                );
                return Err(DatasetError::RowLength {
                    row,
                    expected: pixels + 1,
                    found: record.len(),
                });
            }

            for (column, cell) in record.iter().take(pixels).enumerate() {
                flat.push(parse_cell::<f64>(row, column, cell)?);
            }
            let label = match record.get(pixels) {
                Some(cell) => parse_cell::<u8>(row, pixels, cell)?,
                None => 0,
            };
            targets.push(label);
        }

        if targets.is_empty() {
            error!("No images in {:?}", self.path);
            return Err(DatasetError::Empty(self.path.display().to_string()));
        }
        debug!("Read {} images", targets.len());

        let data = Array2::from_shape_vec((targets.len(), pixels), flat)?;
        Dataset::new(data, targets, DIGIT_SIDE, DIGIT_SIDE)
    }
}
