mod output;


use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;


/// Extract an El Torito image from a bootable CD (or cd-image).
#[derive(Parser)]
#[command(version)]
struct Opts {
    /// Write extracted data to file <OUTPUT> instead of STDOUT.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// CD image file or device.
    pub image_file: PathBuf,
}


fn init_logging() {
    // stdout may carry the image, so everything else goes to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}


fn main() -> ExitCode {
    let opts = Opts::parse();
    init_logging();

    let mut image_file = match File::open(&opts.image_file) {
        Ok(f) => f,
        Err(e) => {
            error!("Cannot read image/device {:?}. Aborting: {}", opts.image_file, e);
            return ExitCode::FAILURE;
        },
    };

    let image = match eltorito::extract_boot_image(&mut image_file) {
        Ok(i) => i,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        },
    };
    drop(image_file);

    let result = match &opts.output {
        Some(path) => output::write_to_file(path, image.as_bytes()),
        None => output::write_to_stdout(image.as_bytes()),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        },
    }
}
