pub mod constants;
pub mod dataset;
pub mod heatmap;
pub mod sample;
pub mod tile;

use log::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub use crate::dataset::{BuiltinDigits, CsvDigits, Dataset, DatasetError, DatasetSource};
pub use crate::heatmap::{Heatmap, HeatmapError, RenderOptions};
pub use crate::sample::{SampleFile, SampleHeader};
pub use crate::tile::{extract_tile, TileError, TileGridHeader, TileGridReader, TileGridWriter};

/// Sets up `env_logger` for a binary of this workspace.
///
/// `crate_name` is the calling crate (`env!("CARGO_CRATE_NAME")`); it and this
/// library log at debug level when `verbose` is set, warn otherwise. `RUST_LOG`
/// still wins. With `log_file` the output is piped into that file.
pub fn init_logging(
    crate_name: &str,
    verbose: bool,
    log_file: Option<&Path>,
) -> std::io::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, LevelFilter::Warn)
        .filter(Some("lib_pink"), level)
        .filter(Some(crate_name), level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        });

    match log_file {
        Some(path) => {
            let target = Box::new(File::create(path)?);
            builder.target(env_logger::Target::Pipe(target));
        }
        None => {
            builder.target(env_logger::Target::Stderr);
        }
    }

    builder.init();
    Ok(())
}
