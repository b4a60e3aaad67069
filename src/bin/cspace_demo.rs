//! Expand a disparity image into a C-space image.
//!
//! Usage: `cspace_demo <config.json>`
//!
//! The config names the input disparity image, the processing parameters and
//! the output paths. The C-space frame is written as an 8-bit PNG (absolute
//! value, saturated at 255) and, optionally, a JSON report with timings.
use cspace_expander::config::cspace_demo::load_config;
use cspace_expander::image::io::{load_disparity_image, save_cspace_png, write_json_file};
use cspace_expander::CSpaceProcessor;
use std::env;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let disp = load_disparity_image(&config.input, config.disparity_scale)?;
    let mut params = config.params;
    params.image = params.image.with_size(disp.w, disp.h);

    let processor = CSpaceProcessor::new(params).map_err(|e| e.to_string())?;
    let report = processor
        .process_with_diagnostics(&disp)
        .map_err(|e| e.to_string())?;

    save_cspace_png(&report.cspace, &config.output.cspace_image)?;
    println!(
        "Saved {}x{} C-space image to {} ({} blocked cells, {:.3} ms)",
        report.input.width,
        report.input.height,
        config.output.cspace_image.display(),
        report.stats.blocked_cells,
        report.timings.total_ms
    );

    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report)?;
        println!("Saved report to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: cspace_demo <config.json>".to_string()
}
