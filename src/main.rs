//! solar-predict entry point: CLI wiring, artifact loading, mode dispatch.

use std::process;

use tracing::{debug, error};

use solar_predict::cli::{self, Mode};
use solar_predict::config::AppConfig;
use solar_predict::io::batch::run_batch_files;
use solar_predict::logging;
use solar_predict::runner::{load_predictor, panel_with_overrides, run_once};

fn main() {
    let cli = match cli::parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(2);
        }
    };

    let mut config = if let Some(ref path) = cli.config {
        match AppConfig::from_toml_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        AppConfig::default()
    };

    if let Some(dir) = cli.artifacts_dir.clone() {
        config.artifacts.dir = dir;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let interactive = cli.mode == Mode::Interactive;
    if let Err(e) = logging::init(&config.logging, interactive) {
        eprintln!("error: {e}");
        process::exit(1);
    }

    // Both artifacts must load before any input is accepted or UI drawn.
    let predictor = match load_predictor(&config) {
        Ok(p) => p,
        Err(e) => {
            debug!(error = %e, "artifact load failed");
            eprintln!("error: {e}");
            if e.is_missing() {
                eprintln!(
                    "Please ensure '{}' and '{}' are in \"{}\".",
                    config.artifacts.model_file,
                    config.artifacts.scaler_file,
                    config.artifacts.dir.display()
                );
            }
            process::exit(1);
        }
    };

    match cli.mode {
        Mode::Once { ref overrides } => {
            let panel = panel_with_overrides(&config, overrides);
            match run_once(&predictor, &panel) {
                Ok(report) => print!("{}", report.render()),
                Err(e) => {
                    debug!(error = %e, "prediction failed");
                    eprintln!("error: {e}");
                    process::exit(1);
                }
            }
        }
        Mode::Batch {
            ref input,
            ref output,
        } => {
            if let Err(e) = run_batch_files(&predictor, input, output.as_deref()) {
                debug!(error = %e, "batch failed");
                eprintln!("error: {e}");
                process::exit(1);
            }
            if let Some(path) = output {
                eprintln!("Predictions written to {}", path.display());
            }
        }
        Mode::Interactive => run_interactive(&config, predictor),
    }
}

#[cfg(feature = "tui")]
fn run_interactive(config: &AppConfig, predictor: solar_predict::predictor::Predictor) {
    let panel = panel_with_overrides(config, &[]);
    if let Err(e) = solar_predict::tui::run(predictor, panel) {
        error!(error = %e, "interactive session failed");
        eprintln!("error: {e}");
        process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn run_interactive(_config: &AppConfig, _predictor: solar_predict::predictor::Predictor) {
    eprintln!("error: built without the `tui` feature; use --once or --batch");
    process::exit(2);
}
