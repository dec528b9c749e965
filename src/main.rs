use log::{error, info};
use std::process;

use image_fetch::cli::{usage, Invocation};
use image_fetch::logging::setup_logging;
use image_fetch::Report;

fn main() {
    let mut args = std::env::args_os();
    let program = args
        .next()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image-fetch".to_string());

    let Some(invocation) = Invocation::parse(args) else {
        println!("{}", usage(&program));
        process::exit(1);
    };

    if let Err(e) = setup_logging() {
        eprintln!("logging disabled: {:#}", e);
    }

    info!("Source URL: {:?}", invocation.url);
    info!("Output path: {:?}", invocation.output_path);

    let result = invocation.run();
    if let Err(ref e) = result {
        error!("Download failed ({}): {}", e.category(), e);
    }

    // Failures are reported, not turned into a non-zero exit status.
    println!("{}", Report::from_result(&result));
}
