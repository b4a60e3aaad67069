use cspace_expander::{CSpaceParams, CSpaceProcessor, Frame};

fn main() {
    // Demo stub: a synthetic wall of disparity 20 in front of the camera
    let params = CSpaceParams::default();
    let (w, h) = (params.image.width, params.image.height);
    let mut disp = Frame::nan(w, h);
    for y in 200..260 {
        for x in 300..340 {
            disp.set(x, y, 20.0);
        }
    }

    let processor = match CSpaceProcessor::new(params) {
        Ok(p) => p,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    match processor.process_with_diagnostics(&disp) {
        Ok(report) => println!(
            "blocked={} valid={} latency_ms={:.3}",
            report.stats.blocked_cells, report.stats.valid_output, report.timings.total_ms
        ),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
