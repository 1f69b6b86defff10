pub const FILE_VERSION: i32 = 2;

/// Kind of PINK file, the token after the version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Data,
}

/// Element type of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Float32,
}

/// Arrangement of the entries' pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Cartesian,
    Hexagonal,
}

impl FileType {
    pub fn code(self) -> i32 {
        match self {
            FileType::Data => 0,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(FileType::Data),
            _ => None,
        }
    }
}

impl DataType {
    pub fn code(self) -> i32 {
        match self {
            DataType::Float32 => 0,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(DataType::Float32),
            _ => None,
        }
    }
}

impl Layout {
    pub fn code(self) -> i32 {
        match self {
            Layout::Cartesian => 0,
            Layout::Hexagonal => 1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Layout::Cartesian),
            1 => Some(Layout::Hexagonal),
            _ => None,
        }
    }
}

/// Header of a sample file:
/// `version file_type data_type no_entries layout dim extent...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleHeader {
    pub file_version: i32,
    pub file_type: FileType,
    pub data_type: DataType,
    pub no_entries: usize,
    pub layout: Layout,
    pub shape: Vec<usize>,
}

impl SampleHeader {
    /// Version 2 float data header with cartesian layout.
    pub fn new(no_entries: usize, shape: Vec<usize>) -> Self {
        Self {
            file_version: FILE_VERSION,
            file_type: FileType::Data,
            data_type: DataType::Float32,
            no_entries,
            layout: Layout::Cartesian,
            shape,
        }
    }

    pub fn dim(&self) -> usize {
        self.shape.len()
    }

    /// Values per entry, `None` if the extents overflow `usize`.
    pub fn entry_len(&self) -> Option<usize> {
        self.shape.iter().try_fold(1usize, |len, &extent| len.checked_mul(extent))
    }

    /// Payload tokens the header announces, `None` on overflow.
    pub fn payload_len(&self) -> Option<usize> {
        self.no_entries.checked_mul(self.entry_len()?)
    }

    /// Header tokens in file order.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = vec![
            self.file_version.to_string(),
            self.file_type.code().to_string(),
            self.data_type.code().to_string(),
            self.no_entries.to_string(),
            self.layout.code().to_string(),
            self.dim().to_string(),
        ];
        tokens.extend(self.shape.iter().map(|extent| extent.to_string()));
        tokens
    }
}

/// A whole sample file: header plus every entry flattened row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleFile {
    pub header: SampleHeader,
    pub payload: Vec<f64>,
}

impl SampleFile {
    /// Values of entry `index`.
    pub fn entry(&self, index: usize) -> Option<&[f64]> {
        let len = self.header.entry_len()?;
        let start = index.checked_mul(len)?;
        self.payload.get(start..start.checked_add(len)?)
    }
}
