use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::config::Config;
use crate::error::ConvertError;
use crate::file::webp_file_name;
use crate::image_ops::{resize_to_fit, write_resized_png, write_webp};
use crate::utils::create_progress_bar;

/// Terminal record of one conversion job.
pub struct JobOutcome {
    pub input: PathBuf,
    pub result: Result<PathBuf, ConvertError>,
}

/// What a whole run produced. Per-file failures are counted, never fatal.
pub struct BatchReport {
    pub outcomes: Vec<JobOutcome>,
}

impl BatchReport {
    pub fn converted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.converted()
    }
}

/// Run every job in the config, strictly in input order, collecting the
/// outcomes. A failing job is logged and the batch moves on.
pub fn execute_conversion(config: &Config) -> io::Result<BatchReport> {
    if let Some(dir) = &config.output_dir {
        fs::create_dir_all(dir)?;
    }

    let total = config.inputs.len();
    info!("processing {} images", total);

    let pb = create_progress_bar(total as u64, config.no_progress);
    let mut outcomes = Vec::with_capacity(total);
    for (i, input) in config.inputs.iter().enumerate() {
        pb.set_message(format!(
            "processing image {}/{}: {}",
            i + 1,
            total,
            input.display()
        ));
        let result = convert_image(input, config);
        match &result {
            Ok(output) => info!("converted {} -> {}", input.display(), output.display()),
            Err(e) => error!(
                "an error occurred while processing image {}: {}",
                input.display(),
                e
            ),
        }
        outcomes.push(JobOutcome {
            input: input.clone(),
            result,
        });
        pb.inc(1);
    }
    pb.finish_with_message("processing complete");

    let report = BatchReport { outcomes };
    info!(
        "run complete: {} converted, {} failed",
        report.converted(),
        report.failed()
    );
    Ok(report)
}

/// One job: decode, optional resize with an on-disk PNG intermediate, WebP
/// encode, intermediate cleanup. The intermediate never outlives the job,
/// whether or not the encode succeeded.
pub fn convert_image(input: &Path, config: &Config) -> Result<PathBuf, ConvertError> {
    let img = image::open(input).map_err(|e| ConvertError::Decode(e.to_string()))?;

    let output_dir = match &config.output_dir {
        Some(dir) => dir.clone(),
        None => input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (img, intermediate) = match config.max_dimension {
        Some(max) => {
            let resized = resize_to_fit(img, max);
            let resized_path = output_dir.join(format!("{stem}_resized.png"));
            if let Err(e) = write_resized_png(&resized, &resized_path) {
                remove_intermediate(&resized_path);
                return Err(e);
            }
            info!("saved resized image as: {}", resized_path.display());
            (resized, Some(resized_path))
        }
        None => (img, None),
    };

    let webp_path = output_dir.join(webp_file_name(input, config.sanitize_names));
    let encode_result = write_webp(&img, &webp_path);

    if let Some(path) = intermediate {
        remove_intermediate(&path);
    }

    encode_result?;
    Ok(webp_path)
}

fn remove_intermediate(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => info!("deleted resized image: {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(
            "could not delete intermediate {}: {}",
            path.display(),
            e
        ),
    }
}
