//! Binary tile grid files: a 16-byte header of four little-endian `i32`
//! (`numberOfImages`, `SOM_width`, `SOM_height`, `SOM_depth`) followed by
//! `numberOfImages` tiles of `SOM_width * SOM_height * SOM_depth`
//! little-endian `f32`.

pub mod format;
pub mod layout;
pub mod reader;
pub mod writer;

use thiserror::Error;

pub use format::{TileDims, TileGridHeader};
pub use layout::{tile_to_grid, Tile};
pub use reader::{extract_tile, ByteReader, TileGridReader};
pub use writer::TileGridWriter;

#[derive(Error, Debug)]
pub enum TileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unexpected end of data at offset {offset}: need {needed} bytes, {remaining} left")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    #[error("Header field {field} must not be negative, got {value}")]
    InvalidDimension { field: &'static str, value: i32 },
    #[error("Tile size overflows the address space")]
    SizeOverflow,
    #[error("Image number {index} too large, the file holds {count} images")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("Tile holds {found} values, expected {expected}")]
    TileLength { expected: usize, found: usize },
    #[error("Tile grid holds {found} tiles, expected {expected}")]
    TileCount { expected: usize, found: usize },
    #[error("Header encoding failed")]
    Encoding(#[from] bincode::Error),
    #[error("Tile reshape failed")]
    Shape(#[from] ndarray::ShapeError),
}
