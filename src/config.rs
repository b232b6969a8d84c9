use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::cli::Cli;
use crate::file::{collect_directory_images, is_supported_extension};

/// Read-only settings for one conversion run. Built once at startup and
/// passed by reference into the pipeline; nothing mutates it afterwards.
pub struct Config {
    /// Resolved input files, in processing order.
    pub inputs: Vec<PathBuf>,
    /// Where outputs land. `None` means each input's own directory.
    pub output_dir: Option<PathBuf>,
    /// Maximum bounding dimension in pixels. `None` means no resize.
    pub max_dimension: Option<u32>,
    /// Rewrite output names to the Webflow asset character set.
    pub sanitize_names: bool,
    pub no_progress: bool,
}

pub fn resolve_config(cli: &Cli) -> io::Result<Config> {
    let inputs = resolve_inputs(&cli.files, cli.dir.as_deref())?;
    Ok(Config {
        inputs,
        output_dir: cli.out.clone(),
        max_dimension: cli.maxsize,
        sanitize_names: cli.webflow,
        no_progress: cli.no_progress,
    })
}

/// Build the ordered input set from explicit files plus an optional
/// directory. Unsupported extensions are dropped here; an empty result is
/// a fatal argument error, reported before any job runs.
pub fn resolve_inputs(files: &[PathBuf], dir: Option<&Path>) -> io::Result<Vec<PathBuf>> {
    let mut inputs: Vec<PathBuf> = files
        .iter()
        .filter(|path| is_supported_extension(path))
        .cloned()
        .collect();

    if let Some(dir) = dir {
        let found = collect_directory_images(dir)?;
        info!(
            "optimizable images found in {}: {}",
            dir.display(),
            found.len()
        );
        inputs.extend(found);
    }

    if inputs.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no optimizable images were found in the given input",
        ));
    }
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_files_are_filtered_out() {
        let files = vec![PathBuf::from("notes.txt"), PathBuf::from("photo.jpg")];
        let inputs = resolve_inputs(&files, None).unwrap();
        assert_eq!(inputs, vec![PathBuf::from("photo.jpg")]);
    }

    #[test]
    fn empty_input_set_is_an_error() {
        assert!(resolve_inputs(&[], None).is_err());
        assert!(resolve_inputs(&[PathBuf::from("notes.txt")], None).is_err());
    }
}
