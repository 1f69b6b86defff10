//! Writes demo data for PINK: the digits set as a version 2 sample file.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use lib_pink::constants::{BUILTIN_SEED, DEFAULT_SAMPLE_FILE, EXPORT_LIMIT};
use lib_pink::sample::{write_sample_file, EncodingError};
use lib_pink::{BuiltinDigits, CsvDigits, DatasetError, DatasetSource, SampleFile};
use log::{debug, info};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(
    name = "generate_sample_imgs",
    about = "Generate a data file that conforms with the PINK data format"
)]
struct Cli {
    /// File to write, replaced if it exists
    #[arg(short, long, default_value = DEFAULT_SAMPLE_FILE)]
    output: PathBuf,

    /// Read digits from an optdigits CSV file instead of the built-in set
    #[arg(long, value_name = "CSV")]
    input: Option<PathBuf>,

    /// Number of images to export
    #[arg(short = 'n', long, default_value_t = EXPORT_LIMIT)]
    limit: usize,

    /// Seed of the built-in digits
    #[arg(long, default_value_t = BUILTIN_SEED)]
    seed: u64,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,

    /// Write the log to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Error, Debug)]
enum ExportError {
    #[error("Logging setup failed: {0}")]
    Logging(#[from] io::Error),

    #[error("Loading the data set failed")]
    Dataset(#[from] DatasetError),

    #[error("Writing the sample file failed")]
    Encoding(#[from] EncodingError),
}

fn main() -> Result<(), ExportError> {
    let cli = Cli::parse();
    lib_pink::init_logging(env!("CARGO_CRATE_NAME"), cli.verbose, cli.log_file.as_deref())?;
    debug!("Arguments: {:?}", cli);

    let source: Box<dyn DatasetSource> = match &cli.input {
        Some(path) => Box::new(CsvDigits::new(path)),
        None => Box::new(BuiltinDigits::with_seed(cli.seed)),
    };
    info!("Dataset source: {}", source.describe());

    println!("Loading the digits data set as demo data...");
    let dataset = source.load()?;
    let file = SampleFile::from_dataset(&dataset, cli.limit);
    println!(
        "Set loaded. Data format: ({}, {})",
        file.header.no_entries,
        dataset.image_width() * dataset.image_height()
    );

    println!("Saving the data to a file named {}", cli.output.display());
    println!("Warning: If such a file already exists, it will be overwritten.");
    write_sample_file(&cli.output, &file)?;

    println!("Done.");
    Ok(())
}
