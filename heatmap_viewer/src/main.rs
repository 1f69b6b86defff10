mod app;
mod cli;
mod filemanager;
mod viewport;

use std::process::ExitCode;

use cli::Invocation;
use filemanager::ViewerError;
use lib_pink::{Heatmap, TileError};
use log::debug;

fn main() -> Result<ExitCode, ViewerError> {
    let options = match cli::parse_args(std::env::args_os()) {
        Invocation::Run(options) => options,
        Invocation::Exit { code, message } => {
            println!("{}", message);
            return Ok(ExitCode::from(code));
        }
    };
    lib_pink::init_logging(
        env!("CARGO_CRATE_NAME"),
        options.verbose,
        options.log_file.as_deref(),
    )?;
    debug!("Options: {:?}", options);

    println!("Input file is {}", options.input.display());
    println!("Image number is {}", options.image);

    let mut reader = filemanager::open_grid(&options.input)?;
    let header = *reader.header();
    println!("Number of images = {}", header.number_of_images);
    println!("SOM_width = {}", header.som_width);
    println!("SOM_height = {}", header.som_height);
    println!("SOM_depth = {}", header.som_depth);

    let tile = match reader.read_tile(options.image) {
        Err(TileError::IndexOutOfRange { .. }) => {
            println!("Image number too large.");
            return Ok(ExitCode::from(1));
        }
        result => result?,
    };
    drop(reader);

    let heatmap = Heatmap::new(tile.to_grid()?);
    let (min, max) = heatmap.range();
    debug!(
        "Grid {}x{}, values {} to {}",
        heatmap.rows(),
        heatmap.cols(),
        min,
        max
    );

    match &options.output {
        Some(path) => {
            filemanager::save_heatmap(path, &heatmap, options.scale)?;
            println!("Heatmap written to {}", path.display());
        }
        None => {
            let caption = format!(
                "image {} of {}, {} x {}",
                options.image,
                header.number_of_images,
                heatmap.rows(),
                heatmap.cols()
            );
            app::show(heatmap, "showHeatmap", caption)?;
        }
    }

    println!("All done.");
    Ok(ExitCode::SUCCESS)
}
