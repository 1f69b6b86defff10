use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use image::{ImageError, ImageFormat, RgbaImage};
use lib_pink::{Heatmap, HeatmapError, RenderOptions, TileError, TileGridReader};
use log::info;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Tile grid error: {0}")]
    TileError(#[from] TileError),

    #[error("Heatmap rendering error: {0}")]
    HeatmapError(#[from] HeatmapError),

    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    #[error("Window error: {0}")]
    WindowError(#[from] eframe::Error),

    #[error("Rendered heatmap does not fill a {0}x{1} image")]
    CanvasSize(u32, u32),
}

pub fn open_grid(path: &Path) -> Result<TileGridReader<BufReader<File>>, ViewerError> {
    Ok(TileGridReader::open(path)?)
}

/// Writes the heatmap and its colour bar as PNG, `scale` pixels per cell.
pub fn save_heatmap(path: &Path, heatmap: &Heatmap, scale: u32) -> Result<(), ViewerError> {
    let options = RenderOptions {
        cell_size: scale,
        ..RenderOptions::default()
    };
    let canvas = heatmap.render(&options)?;
    let (width, height) = (canvas.width, canvas.height);

    let image = RgbaImage::from_raw(width, height, canvas.pixels)
        .ok_or(ViewerError::CanvasSize(width, height))?;
    image.save_with_format(path, ImageFormat::Png)?;

    info!("Heatmap saved to {:?} ({}x{})", path, width, height);
    Ok(())
}
