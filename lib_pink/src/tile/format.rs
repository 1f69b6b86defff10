use log::error;
use serde::{Deserialize, Serialize};

use super::TileError;

/// The four little-endian `i32` values at the start of a tile grid file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGridHeader {
    pub number_of_images: i32,
    pub som_width: i32,
    pub som_height: i32,
    pub som_depth: i32,
}

/// Validated tile extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDims {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

impl TileDims {
    /// Number of `f32` values in one tile.
    pub fn len(&self) -> usize {
        self.width * self.height * self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shape of the displayed grid: `(depth * height, width)`.
    pub fn grid_shape(&self) -> (usize, usize) {
        (self.depth * self.height, self.width)
    }
}

fn non_negative(field: &'static str, value: i32) -> Result<usize, TileError> {
    usize::try_from(value).map_err(|_| {
        error!("Header field {} is negative: {}", field, value);
        TileError::InvalidDimension { field, value }
    })
}

impl TileGridHeader {
    pub const SIZE: usize = 4 * std::mem::size_of::<i32>();
    pub const VALUE_SIZE: usize = std::mem::size_of::<f32>();

    pub fn new(number_of_images: i32, som_width: i32, som_height: i32, som_depth: i32) -> Self {
        Self {
            number_of_images,
            som_width,
            som_height,
            som_depth,
        }
    }

    pub fn image_count(&self) -> Result<usize, TileError> {
        non_negative("numberOfImages", self.number_of_images)
    }

    pub fn dims(&self) -> Result<TileDims, TileError> {
        let dims = TileDims {
            width: non_negative("SOM_width", self.som_width)?,
            height: non_negative("SOM_height", self.som_height)?,
            depth: non_negative("SOM_depth", self.som_depth)?,
        };
        dims.width
            .checked_mul(dims.height)
            .and_then(|n| n.checked_mul(dims.depth))
            .and_then(|n| n.checked_mul(Self::VALUE_SIZE))
            .ok_or(TileError::SizeOverflow)?;
        Ok(dims)
    }

    /// Values per tile, `SOM_width * SOM_height * SOM_depth`.
    pub fn tile_len(&self) -> Result<usize, TileError> {
        Ok(self.dims()?.len())
    }

    /// Bytes per tile.
    pub fn tile_byte_len(&self) -> Result<usize, TileError> {
        Ok(self.tile_len()? * Self::VALUE_SIZE)
    }

    /// Offset of tile `index` measured from the end of the header.
    pub fn tile_offset(&self, index: usize) -> Result<u64, TileError> {
        let offset = index
            .checked_mul(self.tile_byte_len()?)
            .ok_or(TileError::SizeOverflow)?;
        Ok(offset as u64)
    }

    /// Byte length a well-formed file with this header has.
    pub fn expected_file_len(&self) -> Result<u64, TileError> {
        let payload = self
            .image_count()?
            .checked_mul(self.tile_byte_len()?)
            .ok_or(TileError::SizeOverflow)?;
        Ok(Self::SIZE as u64 + payload as u64)
    }

    /// Fails with `IndexOutOfRange` unless `index < numberOfImages`.
    pub fn check_index(&self, index: usize) -> Result<(), TileError> {
        let count = self.image_count()?;
        if index >= count {
            error!("Requested tile {} but the file holds {}", index, count);
            return Err(TileError::IndexOutOfRange { index, count });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_for_four_by_four_by_three() {
        let header = TileGridHeader::new(2, 4, 4, 3);
        assert_eq!(header.tile_len().unwrap(), 48);
        assert_eq!(header.tile_byte_len().unwrap(), 192);
        assert_eq!(header.tile_offset(0).unwrap(), 0);
        assert_eq!(header.tile_offset(1).unwrap(), 192);
        assert_eq!(header.expected_file_len().unwrap(), 16 + 2 * 192);
        assert_eq!(header.dims().unwrap().grid_shape(), (12, 4));
    }

    #[test]
    fn negative_extent_is_rejected() {
        let header = TileGridHeader::new(1, 4, -4, 1);
        match header.dims() {
            Err(TileError::InvalidDimension { field, value }) => {
                assert_eq!(field, "SOM_height");
                assert_eq!(value, -4);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn index_bound() {
        let header = TileGridHeader::new(3, 1, 1, 1);
        assert!(header.check_index(2).is_ok());
        assert!(matches!(
            header.check_index(3),
            Err(TileError::IndexOutOfRange { index: 3, count: 3 })
        ));
    }
}
