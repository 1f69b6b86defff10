pub const FORMAT_NAME: &str = "PINK";
pub const FILE_EXT: &str = "pink";

/// File the exporter writes when no output path is given.
pub const DEFAULT_SAMPLE_FILE: &str = "digits.pink";

/// Number of samples the exporter takes from its dataset source.
pub const EXPORT_LIMIT: usize = 1000;

/// Side length of the square digit images.
pub const DIGIT_SIDE: usize = 8;

/// Seed of the built-in digits generator.
pub const BUILTIN_SEED: u64 = 0x5eed_d161;

/// Sample count of the built-in digits set.
pub const BUILTIN_SAMPLES: usize = 1797;
