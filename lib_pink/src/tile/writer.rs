use std::io::Write;

use bincode::Options;
use log::{debug, error, info};

use super::format::TileGridHeader;
use super::TileError;

fn header_codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
}

impl TileGridHeader {
    /// The 16 header bytes: four fixed-width little-endian `i32`.
    pub fn encode(&self) -> Result<Vec<u8>, TileError> {
        let bytes = header_codec().serialize(self)?;
        debug!("Tile grid header encoded: {:?}", bytes);
        Ok(bytes)
    }
}

/// Writes a tile grid file: the header, then every tile in order.
pub struct TileGridWriter<W: Write> {
    inner: W,
    header: TileGridHeader,
    tile_len: usize,
    written: usize,
}

impl<W: Write> TileGridWriter<W> {
    pub fn new(mut inner: W, header: TileGridHeader) -> Result<Self, TileError> {
        let tile_len = header.tile_len()?;
        header.image_count()?;
        inner.write_all(&header.encode()?)?;
        info!("Started tile grid with header {:?}", header);

        Ok(Self {
            inner,
            header,
            tile_len,
            written: 0,
        })
    }

    pub fn write_tile(&mut self, values: &[f32]) -> Result<(), TileError> {
        if values.len() != self.tile_len {
            error!(
                "Tile #{} has {} values, header says {}",
                self.written,
                values.len(),
                self.tile_len
            );
            return Err(TileError::TileLength {
                expected: self.tile_len,
                found: values.len(),
            });
        }

        for value in values {
            self.inner.write_all(&value.to_le_bytes())?;
        }
        self.written += 1;
        debug!("Tile #{} written", self.written - 1);
        Ok(())
    }

    /// Flushes and returns the sink once exactly `numberOfImages` tiles were written.
    pub fn finish(mut self) -> Result<W, TileError> {
        let expected = self.header.image_count()?;
        if self.written != expected {
            error!(
                "Tile grid holds {} tiles, header says {}",
                self.written, expected
            );
            return Err(TileError::TileCount {
                expected,
                found: self.written,
            });
        }
        self.inner.flush()?;
        info!("Tile grid finished with {} tiles", self.written);
        Ok(self.inner)
    }
}
