use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use log::{debug, error, info};

use super::format::TileGridHeader;
use super::layout::Tile;
use super::TileError;

/// Cursor over a byte buffer with explicit little-endian reads.
pub struct ByteReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], TileError> {
        let bytes = self.data[self.position..]
            .get(..N)
            .and_then(|slice| <[u8; N]>::try_from(slice).ok())
            .ok_or_else(|| {
                error!(
                    "Unexpected end of data at offset {}: need {} bytes, {} left",
                    self.position,
                    N,
                    self.remaining()
                );
                TileError::UnexpectedEof {
                    offset: self.position,
                    needed: N,
                    remaining: self.remaining(),
                }
            })?;
        self.position += N;
        Ok(bytes)
    }

    pub fn skip(&mut self, count: usize) -> Result<(), TileError> {
        if count > self.remaining() {
            error!(
                "Cannot skip {} bytes at offset {}: {} left",
                count,
                self.position,
                self.remaining()
            );
            return Err(TileError::UnexpectedEof {
                offset: self.position,
                needed: count,
                remaining: self.remaining(),
            });
        }
        self.position += count;
        Ok(())
    }

    pub fn read_i32_le(&mut self) -> Result<i32, TileError> {
        Ok(i32::from_le_bytes(self.take()?))
    }

    pub fn read_f32_le(&mut self) -> Result<f32, TileError> {
        Ok(f32::from_le_bytes(self.take()?))
    }

    pub fn read_f32_vec_le(&mut self, count: usize) -> Result<Vec<f32>, TileError> {
        let needed = count
            .checked_mul(TileGridHeader::VALUE_SIZE)
            .ok_or(TileError::SizeOverflow)?;
        if needed > self.remaining() {
            error!(
                "Unexpected end of data at offset {}: need {} bytes, {} left",
                self.position,
                needed,
                self.remaining()
            );
            return Err(TileError::UnexpectedEof {
                offset: self.position,
                needed,
                remaining: self.remaining(),
            });
        }
        (0..count).map(|_| self.read_f32_le()).collect()
    }
}

impl TileGridHeader {
    pub fn decode(reader: &mut ByteReader) -> Result<Self, TileError> {
        let header = Self {
            number_of_images: reader.read_i32_le()?,
            som_width: reader.read_i32_le()?,
            som_height: reader.read_i32_le()?,
            som_depth: reader.read_i32_le()?,
        };
        debug!("Tile grid header read: {:?}", header);
        Ok(header)
    }
}

/// Pulls tile `index` out of a complete tile grid file held in memory.
pub fn extract_tile(data: &[u8], index: usize) -> Result<Tile, TileError> {
    let mut reader = ByteReader::new(data);
    let header = TileGridHeader::decode(&mut reader)?;
    header.check_index(index)?;

    let dims = header.dims()?;
    reader.skip(header.tile_offset(index)? as usize)?;
    debug!("Tile {} starts at byte {}", index, reader.position());

    let values = reader.read_f32_vec_le(dims.len())?;
    Tile::new(index, dims, values)
}

/// Reads single tiles from a seekable tile grid stream.
pub struct TileGridReader<R> {
    inner: R,
    header: TileGridHeader,
}

impl TileGridReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TileError> {
        info!("Opening tile grid file {:?}", path.as_ref());
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> TileGridReader<R> {
    /// Reads the header from the start of `inner`.
    pub fn new(mut inner: R) -> Result<Self, TileError> {
        let mut buffer = [0u8; TileGridHeader::SIZE];
        inner.seek(SeekFrom::Start(0))?;
        inner.read_exact(&mut buffer)?;
        let header = TileGridHeader::decode(&mut ByteReader::new(&buffer))?;
        Ok(Self { inner, header })
    }

    pub fn header(&self) -> &TileGridHeader {
        &self.header
    }

    /// Seeks to tile `index` and reads it.
    pub fn read_tile(&mut self, index: usize) -> Result<Tile, TileError> {
        self.header.check_index(index)?;
        let dims = self.header.dims()?;

        let start = TileGridHeader::SIZE as u64 + self.header.tile_offset(index)?;
        let needed = self.header.tile_byte_len()?;
        let stream_len = self.inner.seek(SeekFrom::End(0))?;
        if start.saturating_add(needed as u64) > stream_len {
            let remaining = stream_len.saturating_sub(start);
            error!(
                "Tile {} needs {} bytes at offset {}, the stream holds {} more",
                index, needed, start, remaining
            );
            return Err(TileError::UnexpectedEof {
                offset: usize::try_from(start).unwrap_or(usize::MAX),
                needed,
                remaining: usize::try_from(remaining).unwrap_or(usize::MAX),
            });
        }

        self.inner.seek(SeekFrom::Start(start))?;
        debug!("Seeked to byte {} for tile {}", start, index);

        let mut buffer = vec![0u8; needed];
        self.inner.read_exact(&mut buffer)?;

        let values = ByteReader::new(&buffer).read_f32_vec_le(dims.len())?;
        info!("Read tile {} ({} values)", index, values.len());
        Tile::new(index, dims, values)
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian() {
        let mut data = Vec::new();
        data.extend_from_slice(&(-2i32).to_le_bytes());
        data.extend_from_slice(&1.5f32.to_le_bytes());
        let mut reader = ByteReader::new(&data);

        assert_eq!(reader.read_i32_le().unwrap(), -2);
        assert_eq!(reader.read_f32_le().unwrap(), 1.5);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn short_buffer_reports_offset() {
        let data = [1u8, 0, 0, 0, 7, 7];
        let mut reader = ByteReader::new(&data);
        reader.read_i32_le().unwrap();

        match reader.read_f32_le() {
            Err(TileError::UnexpectedEof {
                offset,
                needed,
                remaining,
            }) => {
                assert_eq!((offset, needed, remaining), (4, 4, 2));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn skip_past_end_fails() {
        let data = [0u8; 8];
        let mut reader = ByteReader::new(&data);
        assert!(reader.skip(8).is_ok());
        assert!(reader.skip(1).is_err());
    }
}
