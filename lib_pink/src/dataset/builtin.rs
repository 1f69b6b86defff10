use log::{debug, info};
use ndarray::Array2;
use rand_core::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

use super::{Dataset, DatasetError, DatasetSource};
use crate::constants::{BUILTIN_SAMPLES, BUILTIN_SEED, DIGIT_SIDE};

/// Brightest intensity of the digits set.
pub const MAX_INTENSITY: u32 = 16;

#[rustfmt::skip]
const GLYPHS: [[&str; DIGIT_SIDE]; 10] = [
    ["..####..", ".##..##.", ".##..##.", ".##..##.", ".##..##.", ".##..##.", ".##..##.", "..####.."],
    ["...##...", "..###...", ".####...", "...##...", "...##...", "...##...", "...##...", ".######."],
    ["..####..", ".##..##.", ".....##.", "....##..", "...##...", "..##....", ".##.....", ".######."],
    ["..####..", ".##..##.", ".....##.", "...###..", ".....##.", ".....##.", ".##..##.", "..####.."],
    ["....##..", "...###..", "..####..", ".##.##..", ".######.", "....##..", "....##..", "....##.."],
    [".######.", ".##.....", ".#####..", ".....##.", ".....##.", ".....##.", ".##..##.", "..####.."],
    ["..####..", ".##.....", ".##.....", ".#####..", ".##..##.", ".##..##.", ".##..##.", "..####.."],
    [".######.", ".....##.", "....##..", "....##..", "...##...", "...##...", "..##....", "..##...."],
    ["..####..", ".##..##.", ".##..##.", "..####..", ".##..##.", ".##..##.", ".##..##.", "..####.."],
    ["..####..", ".##..##.", ".##..##.", "..#####.", ".....##.", ".....##.", "....##..", "..###..."],
];

fn glyph_set(digit: usize, x: isize, y: isize) -> bool {
    if x < 0 || y < 0 || x >= DIGIT_SIDE as isize || y >= DIGIT_SIDE as isize {
        return false;
    }
    GLYPHS[digit][y as usize].as_bytes()[x as usize] == b'#'
}

/// Random integer in `0..=max`.
fn below(rng: &mut Xoshiro256Plus, max: u32) -> u32 {
    (rng.next_u64() % (u64::from(max) + 1)) as u32
}

/// One 8x8 image of `digit`, row-major, intensities in `0..=16`.
fn render_digit(digit: usize, rng: &mut Xoshiro256Plus) -> Vec<f64> {
    let shift = below(rng, 2) as isize - 1;
    let mut pixels = Vec::with_capacity(DIGIT_SIDE * DIGIT_SIDE);

    for y in 0..DIGIT_SIDE as isize {
        for x in 0..DIGIT_SIDE as isize {
            let gx = x - shift;
            let intensity = if glyph_set(digit, gx, y) {
                MAX_INTENSITY - below(rng, 4)
            } else if [(-1, 0), (1, 0), (0, -1), (0, 1)]
                .iter()
                .any(|&(dx, dy)| glyph_set(digit, gx + dx, y + dy))
            {
                below(rng, 6)
            } else {
                0
            };
            pixels.push(f64::from(intensity));
        }
    }
    pixels
}

/// Seeded stand-in for the classic 8x8 hand-written digits set.
///
/// Sample `i` shows digit `i % 10`, shifted by at most one column, with
/// jittered stroke and edge intensities. The same seed always yields the
/// same images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinDigits {
    pub seed: u64,
    pub samples: usize,
}

impl Default for BuiltinDigits {
    fn default() -> Self {
        Self {
            seed: BUILTIN_SEED,
            samples: BUILTIN_SAMPLES,
        }
    }
}

impl BuiltinDigits {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

impl DatasetSource for BuiltinDigits {
    fn describe(&self) -> String {
        format!("built-in digits (seed {:#x})", self.seed)
    }

    fn load(&self) -> Result<Dataset, DatasetError> {
        info!("Generating {} built-in digits", self.samples);
        let mut rng = Xoshiro256Plus::seed_from_u64(self.seed);

        let mut flat = Vec::with_capacity(self.samples * DIGIT_SIDE * DIGIT_SIDE);
        let mut targets = Vec::with_capacity(self.samples);
        for index in 0..self.samples {
            let digit = index % 10;
            flat.extend(render_digit(digit, &mut rng));
            targets.push(digit as u8);
        }
        debug!("Generated {} pixel values", flat.len());

        let data = Array2::from_shape_vec((self.samples, DIGIT_SIDE * DIGIT_SIDE), flat)?;
        Dataset::new(data, targets, DIGIT_SIDE, DIGIT_SIDE)
    }
}
