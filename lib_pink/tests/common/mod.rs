#![allow(dead_code)]

use lib_pink::{TileGridHeader, TileGridWriter};

/// Header of the two-tile, 4x4x3 grid used throughout the tests.
pub const SMALL_GRID: TileGridHeader = TileGridHeader {
    number_of_images: 2,
    som_width: 4,
    som_height: 4,
    som_depth: 3,
};

/// Distinct values for every tile: tile `t`, position `p` holds `t * 1000 + p`.
pub fn numbered_tiles(header: &TileGridHeader) -> Vec<Vec<f32>> {
    let count = header.image_count().unwrap();
    let len = header.tile_len().unwrap();
    (0..count)
        .map(|t| (0..len).map(|p| (t * 1000 + p) as f32).collect())
        .collect()
}

pub fn tile_grid_bytes(header: TileGridHeader, tiles: &[Vec<f32>]) -> Vec<u8> {
    let mut writer = TileGridWriter::new(Vec::new(), header).unwrap();
    for tile in tiles {
        writer.write_tile(tile).unwrap();
    }
    writer.finish().unwrap()
}

/// optdigits style line: 64 intensities and a label.
pub fn optdigits_line(fill: u8, label: u8) -> String {
    let mut cells: Vec<String> = (0..64).map(|_| fill.to_string()).collect();
    cells.push(label.to_string());
    cells.join(",")
}
