pub mod builtin;
pub mod optdigits;

use log::error;
use ndarray::{s, Array2, ArrayView2};
use thiserror::Error;

pub use builtin::BuiltinDigits;
pub use optdigits::CsvDigits;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Row {row} has {found} columns, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Row {row}, column {column}: {value:?} is not a number")]
    InvalidValue {
        row: usize,
        column: usize,
        value: String,
    },
    #[error("Images have {found} pixels, expected {expected}")]
    ImageShape { expected: usize, found: usize },
    #[error("{found} labels for {expected} images")]
    LabelCount { expected: usize, found: usize },
    #[error("Dataset source {0} holds no images")]
    Empty(String),
    #[error("Dataset shape error")]
    Shape(#[from] ndarray::ShapeError),
}

/// Square-ish grayscale images, one flattened image per row, with labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    data: Array2<f64>,
    targets: Vec<u8>,
    image_width: usize,
    image_height: usize,
}

impl Dataset {
    pub fn new(
        data: Array2<f64>,
        targets: Vec<u8>,
        image_width: usize,
        image_height: usize,
    ) -> Result<Self, DatasetError> {
        let pixels = image_width * image_height;
        if data.ncols() != pixels {
            error!("Images have {} pixels, expected {}", data.ncols(), pixels);
            return Err(DatasetError::ImageShape {
                expected: pixels,
                found: data.ncols(),
            });
        }
        if targets.len() != data.nrows() {
            error!("{} labels for {} images", targets.len(), data.nrows());
            return Err(DatasetError::LabelCount {
                expected: data.nrows(),
                found: targets.len(),
            });
        }

        Ok(Self {
            data,
            targets,
            image_width,
            image_height,
        })
    }

    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(images, pixels per image)`.
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn targets(&self) -> &[u8] {
        &self.targets
    }

    pub fn image_width(&self) -> usize {
        self.image_width
    }

    pub fn image_height(&self) -> usize {
        self.image_height
    }

    /// Image `index` as `(height, width)`.
    pub fn image(&self, index: usize) -> Option<ArrayView2<'_, f64>> {
        if index >= self.len() {
            return None;
        }
        self.data
            .row(index)
            .into_shape((self.image_height, self.image_width))
            .ok()
    }

    /// The first `limit` images, or all of them if there are fewer.
    pub fn take(&self, limit: usize) -> Dataset {
        let count = limit.min(self.len());
        Dataset {
            data: self.data.slice(s![..count, ..]).to_owned(),
            targets: self.targets[..count].to_vec(),
            image_width: self.image_width,
            image_height: self.image_height,
        }
    }
}

/// Somewhere a `Dataset` can be loaded from.
pub trait DatasetSource {
    fn describe(&self) -> String;

    fn load(&self) -> Result<Dataset, DatasetError>;
}
