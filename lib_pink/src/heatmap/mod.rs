pub mod colormap;

use log::{debug, error};
use ndarray::Array2;
use thiserror::Error;

pub use colormap::{jet, TRANSPARENT};

/// Largest canvas `render` will allocate, in pixels.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HeatmapError {
    #[error("A {rows}x{cols} heatmap with {cell_size} px cells does not fit in a canvas")]
    CanvasTooLarge {
        rows: usize,
        cols: usize,
        cell_size: u32,
    },
}

/// Layout of a rendered heatmap: square cells, a gap, then the colour bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub cell_size: u32,
    pub gap: u32,
    pub colorbar_width: u32,
    pub background: [u8; 4],
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cell_size: 16,
            gap: 12,
            colorbar_width: 24,
            background: [255, 255, 255, 255],
        }
    }
}

/// RGBA pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaCanvas {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaCanvas {
    fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self {
            width,
            height,
            pixels: color.repeat(width as usize * height as usize),
        }
    }

    fn put(&mut self, x: u32, y: u32, color: [u8; 4]) {
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[offset..offset + 4].copy_from_slice(&color);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut color = [0u8; 4];
        color.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(color)
    }
}

/// A 2-D grid of values mapped through the jet colour map, scaled linearly
/// between the smallest and largest finite value.
#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    values: Array2<f32>,
    min: f32,
    max: f32,
}

impl Heatmap {
    pub fn new(values: Array2<f32>) -> Self {
        let (min, max) = values
            .iter()
            .filter(|v| v.is_finite())
            .fold(None, |range: Option<(f32, f32)>, &v| match range {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            })
            .unwrap_or((0.0, 0.0));
        debug!("Heatmap {:?} spans {} to {}", values.dim(), min, max);

        Self { values, min, max }
    }

    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn cols(&self) -> usize {
        self.values.ncols()
    }

    pub fn values(&self) -> &Array2<f32> {
        &self.values
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn value(&self, row: usize, col: usize) -> Option<f32> {
        self.values.get((row, col)).copied()
    }

    /// Position of `value` on the colour scale; a flat map sits at 0.
    pub fn normalize(&self, value: f32) -> f32 {
        if self.max > self.min {
            ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn color_of(&self, value: f32) -> [u8; 4] {
        if value.is_nan() {
            TRANSPARENT
        } else {
            jet(self.normalize(value))
        }
    }

    pub fn color_at(&self, row: usize, col: usize) -> Option<[u8; 4]> {
        self.value(row, col).map(|value| self.color_of(value))
    }

    /// One RGBA pixel per cell.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.values
            .iter()
            .flat_map(|&value| self.color_of(value))
            .collect()
    }

    /// Vertical colour bar, maximum at the top.
    pub fn colorbar_rgba(&self, width: usize, height: usize) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            let color = jet(1.0 - (y as f32 + 0.5) / height as f32);
            for _ in 0..width {
                pixels.extend_from_slice(&color);
            }
        }
        pixels
    }

    /// `count` evenly spaced colour bar labels from min to max.
    pub fn ticks(&self, count: usize) -> Vec<f32> {
        match count {
            0 => Vec::new(),
            1 => vec![self.min],
            _ => (0..count)
                .map(|i| self.min + (self.max - self.min) * i as f32 / (count - 1) as f32)
                .collect(),
        }
    }

    /// `(map_width, width, height)` of the rendered canvas, if it fits.
    fn canvas_size(&self, options: &RenderOptions, cell: u32) -> Option<(u32, u32, u32)> {
        let map_width = u32::try_from(self.cols()).ok()?.checked_mul(cell)?;
        let height = u32::try_from(self.rows()).ok()?.checked_mul(cell)?;
        let width = map_width
            .checked_add(options.gap)?
            .checked_add(options.colorbar_width)?;
        if u64::from(width) * u64::from(height) > MAX_CANVAS_PIXELS {
            return None;
        }
        Some((map_width, width, height))
    }

    /// Heatmap with nearest-neighbour cells and its colour bar side by side.
    pub fn render(&self, options: &RenderOptions) -> Result<RgbaCanvas, HeatmapError> {
        let cell = options.cell_size.max(1);
        let (map_width, width, height) = self.canvas_size(options, cell).ok_or_else(|| {
            error!(
                "Heatmap {}x{} with {} px cells exceeds the canvas limit",
                self.rows(),
                self.cols(),
                cell
            );
            HeatmapError::CanvasTooLarge {
                rows: self.rows(),
                cols: self.cols(),
                cell_size: cell,
            }
        })?;

        let mut canvas = RgbaCanvas::filled(width, height, options.background);
        for y in 0..height {
            for x in 0..map_width {
                let row = (y / cell) as usize;
                let col = (x / cell) as usize;
                let color = self.color_of(self.values[[row, col]]);
                if color != TRANSPARENT {
                    canvas.put(x, y, color);
                }
            }
        }

        let bar = self.colorbar_rgba(options.colorbar_width as usize, height as usize);
        for y in 0..height {
            for x in 0..options.colorbar_width {
                let offset = (y as usize * options.colorbar_width as usize + x as usize) * 4;
                let mut color = [0u8; 4];
                color.copy_from_slice(&bar[offset..offset + 4]);
                canvas.put(map_width + options.gap + x, y, color);
            }
        }

        debug!("Rendered heatmap canvas {}x{}", width, height);
        Ok(canvas)
    }
}
