use std::io;
use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input};

use crate::cli::Cli;
use crate::config::{resolve_inputs, Config};
use crate::convert::execute_conversion;

/// Interactive front end: prompt for the input path and the optional
/// maximum dimension, run the pipeline, then offer to run again. Every
/// re-run resolves the input set from scratch.
pub fn run_interactive(cli: &Cli) -> io::Result<()> {
    println!("Choose the file or directory of the image(s) to be optimized.");
    loop {
        let config = prompt_config(cli)?;
        let report = execute_conversion(&config)?;
        println!(
            "Your conversion is now complete: {} converted, {} failed.",
            report.converted(),
            report.failed()
        );

        let again = Confirm::new()
            .with_prompt("Run another conversion?")
            .default(false)
            .interact()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        if !again {
            break;
        }
    }
    Ok(())
}

/// Flag values act as defaults; only missing pieces are prompted for.
fn prompt_config(cli: &Cli) -> io::Result<Config> {
    let inputs = if !cli.files.is_empty() || cli.dir.is_some() {
        resolve_inputs(&cli.files, cli.dir.as_deref())?
    } else {
        let input = prompt_input_path()?;
        if input.is_dir() {
            resolve_inputs(&[], Some(&input))?
        } else {
            resolve_inputs(&[input], None)?
        }
    };

    let max_dimension = prompt_max_dimension(cli.maxsize)?;

    Ok(Config {
        inputs,
        output_dir: cli.out.clone(),
        max_dimension,
        sanitize_names: cli.webflow,
        no_progress: cli.no_progress,
    })
}

fn prompt_input_path() -> io::Result<PathBuf> {
    let raw: String = Input::new()
        .with_prompt("Enter an image file or a directory of images")
        .validate_with(|input: &String| -> Result<(), String> {
            if Path::new(input).exists() {
                Ok(())
            } else {
                Err(format!("path '{}' does not exist", input))
            }
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    Ok(PathBuf::from(raw))
}

fn prompt_max_dimension(default: Option<u32>) -> io::Result<Option<u32>> {
    let default_text = default.map(|m| m.to_string()).unwrap_or_default();
    let raw: String = Input::new()
        .with_prompt(
            "Limit max width/height of image(s) in pixels, aspect ratio stays locked \
(500-4000 is suggested, leave empty for no resize)",
        )
        .default(default_text)
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                return Ok(());
            }
            match input.trim().parse::<u32>() {
                Ok(n) if n > 0 => Ok(()),
                _ => Err("enter a positive number of pixels, or leave empty".to_string()),
            }
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    Ok(raw.trim().parse::<u32>().ok())
}
