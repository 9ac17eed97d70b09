use log::info;
use spectral_image::config::load_config;
use spectral_image::diagnostics::TimingBreakdown;
use spectral_image::image::io::{save_grayscale_f64, write_json_file};
use spectral_image::spectrum::Transform2D;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let input = config.input.load()?;
    let mut prep_timings = TimingBreakdown::default();
    let prepared = config
        .preprocess
        .apply(&input, &mut prep_timings)
        .map_err(|e| format!("Preprocessing failed: {e}"))?;
    if !config.preprocess.is_identity() {
        info!("prepared input {}x{}", prepared.w, prepared.h);
    }

    let transform = Transform2D::new(config.transform);
    let mut output = config
        .experiment
        .run(&prepared, &transform)
        .map_err(|e| format!("Experiment {} failed: {e}", config.experiment.name()))?;

    let timings = &mut output.report.timings;
    timings.total_ms += prep_timings.stages.iter().map(|s| s.elapsed_ms).sum::<f64>();
    let mut stages = prep_timings.stages;
    stages.append(&mut timings.stages);
    timings.stages = stages;

    let dir = &config.output.dir;
    if config.output.save_input && !config.preprocess.is_identity() {
        let path = dir.join("input.png");
        save_grayscale_f64(&prepared, &path)?;
        println!("Saved prepared input to {}", path.display());
    }
    for named in &output.images {
        let path = dir.join(format!("{}.png", named.name));
        save_grayscale_f64(&named.image, &path)?;
        println!("Saved {} to {}", named.name, path.display());
    }
    let report_path = dir.join(&config.output.report);
    write_json_file(&report_path, &output.report)?;
    println!("Saved report to {}", report_path.display());
    println!("{}", output.report.summary());

    Ok(())
}

fn usage() -> String {
    "Usage: spectrum_tool <config.json>".to_string()
}
