use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

const USAGE: &str = "showHeatmap [Options] <inputfile>";
const MAX_SCALE: u32 = 256;

#[derive(Parser, Debug)]
#[command(
    name = "showHeatmap",
    override_usage = USAGE,
    about = "Show one tile of a tile grid file as a heatmap",
    disable_version_flag = true
)]
struct Cli {
    /// Number of image to visualize
    #[arg(short = 'i', long = "image", value_name = "int", default_value_t = 0)]
    image: usize,

    /// Save the heatmap as PNG instead of opening a window
    #[arg(short, long, value_name = "png")]
    output: Option<PathBuf>,

    /// Pixels per heatmap cell in the PNG
    #[arg(
        long,
        value_name = "px",
        default_value_t = 16,
        value_parser = clap::value_parser!(u32).range(1..=MAX_SCALE as i64)
    )]
    scale: u32,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,

    /// Write the log to this file instead of stderr
    #[arg(long, value_name = "path")]
    log_file: Option<PathBuf>,

    #[arg(value_name = "inputfile")]
    inputs: Vec<PathBuf>,
}

/// Settings for one viewer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub input: PathBuf,
    pub image: usize,
    pub output: Option<PathBuf>,
    pub scale: u32,
    pub verbose: bool,
    pub log_file: Option<PathBuf>,
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(Options),
    /// Print `message` to stdout and exit with `code`.
    Exit { code: u8, message: String },
}

pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

fn usage_error(error: &str) -> Invocation {
    Invocation::Exit {
        code: 1,
        message: format!("{}\nERROR: {}", usage(), error),
    }
}

/// `--help`, or `-h` alone or in a cluster of flag-only short options
/// (`-vh`), anywhere before `--`. `-ih` is `-i` with value `h`, not help.
fn asks_for_help(args: &[OsString]) -> bool {
    args.iter()
        .skip(1)
        .take_while(|arg| *arg != "--")
        .filter_map(|arg| arg.to_str())
        .any(|arg| {
            if arg == "--help" {
                return true;
            }
            match arg.strip_prefix('-') {
                Some(cluster) if !cluster.starts_with('-') => {
                    cluster.contains('h') && cluster.chars().all(|c| c == 'h' || c == 'v')
                }
                _ => false,
            }
        })
}

pub fn parse_args<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if asks_for_help(&args) {
        return Invocation::Exit {
            code: 0,
            message: usage(),
        };
    }

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            return Invocation::Exit {
                code: 0,
                message: usage(),
            }
        }
        Err(e) => {
            let reason = e.kind().as_str().unwrap_or("invalid arguments");
            return usage_error(reason);
        }
    };

    let mut inputs = cli.inputs;
    let input = match inputs.len() {
        0 => return usage_error("Input file is missing."),
        1 => inputs.remove(0),
        n => return usage_error(&format!("Expected one input file, got {}.", n)),
    };

    Invocation::Run(Options {
        input,
        image: cli.image,
        output: cli.output,
        scale: cli.scale,
        verbose: cli.verbose,
        log_file: cli.log_file,
    })
}
