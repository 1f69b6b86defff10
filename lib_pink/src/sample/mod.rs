//! Text sample files: whitespace separated decimal tokens, an integer
//! header followed by every entry's values flattened row-major.

pub mod decoder;
pub mod encoder;
pub mod format;

pub use decoder::{decode, read_sample_file, DecodeError};
pub use encoder::{encode, write_sample_file, EncodingError, SampleWriter};
pub use format::{DataType, FileType, Layout, SampleFile, SampleHeader, FILE_VERSION};
