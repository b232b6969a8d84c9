use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "opti-webp",
    version,
    about = "Bulk resize, compress and convert images to an optimized WebP version",
    long_about = "Bulk-converts JPEG, PNG, GIF, BMP, HEIC and TIFF images to WebP, \
optionally downscaling to a maximum bounding dimension and optionally renaming \
the results to Webflow asset-compatible filenames.\nWithout --auto the tool runs \
interactively and prompts for anything it is missing."
)]
pub struct Cli {
    /// Image files to process
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Process all compatible files in this input directory
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Run without interactive prompts
    #[arg(short, long, default_value_t = false)]
    pub auto: bool,

    /// Rename the output files for Webflow asset compatibility
    #[arg(short, long, default_value_t = false)]
    pub webflow: bool,

    /// Output directory, instead of each source file's own directory
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Resize to fit in this maximum dimension, preserving aspect ratio
    #[arg(short, long, value_name = "PIXELS")]
    pub maxsize: Option<u32>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    #[arg(long, default_value = "info", value_parser = ["info", "warn", "error"])]
    pub log_level: String,
}

pub fn validate_cli_args(cli: &Cli) -> io::Result<()> {
    if cli.auto && cli.files.is_empty() && cli.dir.is_none() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "at least one file or an input directory is required in auto mode",
        ));
    }
    if let Some(dir) = &cli.dir {
        validate_input_dir(dir)?;
    }
    if cli.maxsize == Some(0) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "maxsize must be a positive number of pixels",
        ));
    }
    Ok(())
}

pub fn validate_input_dir(dir: &Path) -> io::Result<()> {
    if !dir.is_dir() {
        log::error!("input directory does not exist: {}", dir.display());
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("input directory '{}' does not exist", dir.display()),
        ));
    }
    Ok(())
}
