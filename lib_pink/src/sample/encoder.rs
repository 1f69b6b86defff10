use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::{debug, error, info};
use thiserror::Error;

use super::format::{SampleFile, SampleHeader};
use crate::dataset::Dataset;

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Payload holds {found} values, header announces {expected}")]
    PayloadLength { expected: usize, found: usize },
    #[error("Entry shape has no extents")]
    EmptyShape,
    #[error("Header announces more values than fit in memory")]
    SizeOverflow,
}

/// Writes space separated tokens: header integers, then payload values.
pub struct SampleWriter<W: Write> {
    inner: W,
    tokens: usize,
}

impl<W: Write> SampleWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, tokens: 0 }
    }

    fn separator(&mut self) -> io::Result<()> {
        if self.tokens > 0 {
            self.inner.write_all(b" ")?;
        }
        self.tokens += 1;
        Ok(())
    }

    pub fn write_header(&mut self, header: &SampleHeader) -> io::Result<()> {
        for token in header.tokens() {
            self.separator()?;
            self.inner.write_all(token.as_bytes())?;
        }
        debug!("Header written: {:?}", header);
        Ok(())
    }

    /// Values keep their fractional part, `0.0` rather than `0`.
    pub fn write_values<I: IntoIterator<Item = f64>>(&mut self, values: I) -> io::Result<()> {
        for value in values {
            self.separator()?;
            write!(self.inner, "{:?}", value)?;
        }
        Ok(())
    }

    pub fn tokens_written(&self) -> usize {
        self.tokens
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl SampleFile {
    /// The first `limit` images of `dataset`, each flattened row-major.
    pub fn from_dataset(dataset: &Dataset, limit: usize) -> Self {
        let subset = dataset.take(limit);
        let header = SampleHeader::new(
            subset.len(),
            vec![subset.image_width(), subset.image_height()],
        );
        let payload = subset.data().iter().copied().collect();
        debug!("Sample file built from {} images", subset.len());

        Self { header, payload }
    }

    fn validate(&self) -> Result<(), EncodingError> {
        if self.header.shape.is_empty() {
            error!("Sample header has an empty shape");
            return Err(EncodingError::EmptyShape);
        }
        let expected = self.header.payload_len().ok_or_else(|| {
            error!("Sample header {:?} overflows the payload size", self.header);
            EncodingError::SizeOverflow
        })?;
        if self.payload.len() != expected {
            error!(
                "Payload holds {} values, header announces {}",
                self.payload.len(),
                expected
            );
            return Err(EncodingError::PayloadLength {
                expected,
                found: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn write_to<W: Write>(&self, inner: W) -> Result<W, EncodingError> {
        self.validate()?;

        let mut writer = SampleWriter::new(inner);
        writer.write_header(&self.header)?;
        writer.write_values(self.payload.iter().copied())?;
        debug!("{} tokens written", writer.tokens_written());
        Ok(writer.finish()?)
    }
}

pub fn encode(file: &SampleFile) -> Result<Vec<u8>, EncodingError> {
    info!("Starting sample encoding");
    let encoded = file.write_to(Vec::new())?;
    info!("Sample encoding completed: {} bytes", encoded.len());
    Ok(encoded)
}

/// Creates `path`, replacing any existing file.
pub fn write_sample_file<P: AsRef<Path>>(path: P, file: &SampleFile) -> Result<(), EncodingError> {
    info!("Writing sample file {:?}", path.as_ref());
    let sink = BufWriter::new(File::create(path)?);
    file.write_to(sink)?;
    info!("Sample file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_single_space_separated() {
        let file = SampleFile {
            header: SampleHeader::new(1, vec![2, 1]),
            payload: vec![0.0, 13.0],
        };
        let encoded = encode(&file).unwrap();
        assert_eq!(String::from_utf8(encoded).unwrap(), "2 0 0 1 0 2 2 1 0.0 13.0");
    }

    #[test]
    fn payload_must_match_header() {
        let file = SampleFile {
            header: SampleHeader::new(2, vec![2, 2]),
            payload: vec![1.0; 7],
        };
        assert!(matches!(
            encode(&file),
            Err(EncodingError::PayloadLength {
                expected: 8,
                found: 7
            })
        ));
    }
}
