use log::{debug, error};
use ndarray::{Array2, Array3};

use super::format::TileDims;
use super::TileError;

/// One tile as stored in the file, a flat run of `width * height * depth` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub index: usize,
    pub dims: TileDims,
    pub values: Vec<f32>,
}

impl Tile {
    pub fn new(index: usize, dims: TileDims, values: Vec<f32>) -> Result<Self, TileError> {
        if values.len() != dims.len() {
            error!(
                "Tile {} has {} values, expected {}",
                index,
                values.len(),
                dims.len()
            );
            return Err(TileError::TileLength {
                expected: dims.len(),
                found: values.len(),
            });
        }
        Ok(Self {
            index,
            dims,
            values,
        })
    }

    /// The values viewed as `[width, height, depth]`, last axis fastest.
    pub fn cube(&self) -> Result<Array3<f32>, TileError> {
        let shape = (self.dims.width, self.dims.height, self.dims.depth);
        Ok(Array3::from_shape_vec(shape, self.values.clone())?)
    }

    pub fn to_grid(&self) -> Result<Array2<f32>, TileError> {
        tile_to_grid(&self.values, self.dims)
    }
}

/// Lays a tile out for display.
///
/// The flat values are shaped `[width, height, depth]`, the first and last
/// axes are swapped to `[depth, height, width]`, and the depth planes are
/// stacked vertically into a `(depth * height, width)` grid. Cell
/// `(z * height + y, x)` therefore holds flat value
/// `x * height * depth + y * depth + z`.
pub fn tile_to_grid(values: &[f32], dims: TileDims) -> Result<Array2<f32>, TileError> {
    let cube = Array3::from_shape_vec((dims.width, dims.height, dims.depth), values.to_vec())?;
    let swapped = cube.permuted_axes([2, 1, 0]);

    let grid = Array2::from_shape_vec(dims.grid_shape(), swapped.iter().copied().collect())?;
    debug!("Tile reshaped to grid {:?}", grid.dim());
    Ok(grid)
}
