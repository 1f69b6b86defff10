mod common;

use std::io::Cursor;

use common::{numbered_tiles, tile_grid_bytes, SMALL_GRID};
use lib_pink::heatmap::jet;
use lib_pink::{Heatmap, RenderOptions, TileGridReader};

#[test]
fn test_render_size_and_cells() {
    let bytes = tile_grid_bytes(SMALL_GRID, &numbered_tiles(&SMALL_GRID));
    let grid = TileGridReader::new(Cursor::new(bytes))
        .unwrap()
        .read_tile(0)
        .unwrap()
        .to_grid()
        .unwrap();
    let heatmap = Heatmap::new(grid);
    assert_eq!((heatmap.rows(), heatmap.cols()), (12, 4));
    assert_eq!(heatmap.range(), (0.0, 47.0));

    let options = RenderOptions {
        cell_size: 5,
        gap: 3,
        colorbar_width: 7,
        background: [255, 255, 255, 255],
    };
    let canvas = heatmap.render(&options).unwrap();
    assert_eq!(canvas.width, 4 * 5 + 3 + 7);
    assert_eq!(canvas.height, 12 * 5);
    assert_eq!(canvas.pixels.len(), (canvas.width * canvas.height * 4) as usize);

    for row in 0..12 {
        for col in 0..4 {
            let expected = jet(heatmap.normalize(heatmap.value(row, col).unwrap()));
            let x = col as u32 * 5;
            let y = row as u32 * 5;
            assert_eq!(canvas.pixel(x, y), Some(expected));
            assert_eq!(canvas.pixel(x + 4, y + 4), Some(expected));
        }
    }

    assert_eq!(canvas.pixel(20, 0), Some([255, 255, 255, 255]));
    assert_eq!(canvas.pixel(22, 30), Some([255, 255, 255, 255]));
}

#[test]
fn test_rgba_has_one_pixel_per_cell() {
    let heatmap = Heatmap::new(ndarray::array![[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]]);
    let rgba = heatmap.to_rgba();

    assert_eq!(rgba.len(), 6 * 4);
    assert_eq!(&rgba[..4], &jet(0.0));
    assert_eq!(&rgba[20..], &jet(1.0));
}
