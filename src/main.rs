use std::io;

use clap::Parser;

use opti_webp::cli::{validate_cli_args, Cli};
use opti_webp::config::resolve_config;
use opti_webp::convert::execute_conversion;
use opti_webp::interactive::run_interactive;
use opti_webp::utils::setup_logging;

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;
    validate_cli_args(&cli)?;
    print_banner();

    if cli.auto {
        let config = resolve_config(&cli)?;
        let report = execute_conversion(&config)?;
        println!(
            "Conversion complete: {} converted, {} failed.",
            report.converted(),
            report.failed()
        );
        Ok(())
    } else {
        run_interactive(&cli)
    }
}

fn print_banner() {
    println!(
        "Opti-WebP {} - Image Optimization Tool",
        env!("CARGO_PKG_VERSION")
    );
    println!("Bulk resize, compress and convert non-WebP images to an optimized WebP version.");
}
