use std::fs;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use log::{debug, error, info};
use thiserror::Error;

use super::format::{DataType, FileType, Layout, SampleFile, SampleHeader};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Header ends before field {0}")]
    MissingToken(&'static str),
    #[error("Invalid {field} token: {token:?}")]
    InvalidToken { field: &'static str, token: String },
    #[error("Unknown file type code {0}")]
    UnknownFileType(i32),
    #[error("Unknown data type code {0}")]
    UnknownDataType(i32),
    #[error("Unknown layout code {0}")]
    UnknownLayout(i32),
    #[error("Payload holds {found} values, header announces {expected}")]
    PayloadLength { expected: usize, found: usize },
    #[error("Header announces more values than fit in memory")]
    SizeOverflow,
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

fn parse_token<T: FromStr>(field: &'static str, token: &str) -> Result<T, DecodeError> {
    token.parse().map_err(|_| {
        error!("Invalid {} token: {:?}", field, token);
        DecodeError::InvalidToken {
            field,
            token: token.to_string(),
        }
    })
}

fn unknown_code(field: &'static str, code: i32, err: DecodeError) -> DecodeError {
    error!("Unknown {} code {}", field, code);
    err
}

impl<'a> Tokens<'a> {
    fn next<T: FromStr>(&mut self, field: &'static str) -> Result<T, DecodeError> {
        let token = self.inner.next().ok_or_else(|| {
            error!("Header ends before field {}", field);
            DecodeError::MissingToken(field)
        })?;
        parse_token(field, token)
    }
}

/// Drops leading `#` comment lines.
fn strip_comments(text: &str) -> &str {
    let mut rest = text;
    while rest.trim_start().starts_with('#') {
        rest = match rest.find('\n') {
            Some(end) => &rest[end + 1..],
            None => "",
        };
    }
    rest
}

pub fn decode(text: &str) -> Result<SampleFile, DecodeError> {
    info!("Starting sample decoding");
    let mut tokens = Tokens {
        inner: strip_comments(text).split_whitespace(),
    };

    let file_version = tokens.next("file_version")?;
    let file_type = tokens.next("file_type")?;
    let file_type = FileType::from_code(file_type).ok_or_else(|| {
        unknown_code("file type", file_type, DecodeError::UnknownFileType(file_type))
    })?;
    let data_type = tokens.next("data_type")?;
    let data_type = DataType::from_code(data_type).ok_or_else(|| {
        unknown_code("data type", data_type, DecodeError::UnknownDataType(data_type))
    })?;
    let no_entries = tokens.next("no_entries")?;
    let layout = tokens.next("layout")?;
    let layout = Layout::from_code(layout)
        .ok_or_else(|| unknown_code("layout", layout, DecodeError::UnknownLayout(layout)))?;
    let dim: usize = tokens.next("dim")?;
    let shape = (0..dim)
        .map(|_| tokens.next("extent"))
        .collect::<Result<Vec<usize>, _>>()?;

    let header = SampleHeader {
        file_version,
        file_type,
        data_type,
        no_entries,
        layout,
        shape,
    };
    debug!("Header read: {:?}", header);

    let expected = header.payload_len().ok_or_else(|| {
        error!("Sample header {:?} overflows the payload size", header);
        DecodeError::SizeOverflow
    })?;

    let payload = tokens
        .inner
        .map(|token| parse_token::<f64>("payload", token))
        .collect::<Result<Vec<_>, _>>()?;

    if payload.len() != expected {
        error!(
            "Payload holds {} values, header announces {}",
            payload.len(),
            expected
        );
        return Err(DecodeError::PayloadLength {
            expected,
            found: payload.len(),
        });
    }

    info!("Sample decoding completed: {} entries", header.no_entries);
    Ok(SampleFile { header, payload })
}

pub fn read_sample_file<P: AsRef<Path>>(path: P) -> Result<SampleFile, DecodeError> {
    info!("Reading sample file {:?}", path.as_ref());
    let text = fs::read_to_string(path)?;
    decode(&text)
}
