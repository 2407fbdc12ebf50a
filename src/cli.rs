//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

use crate::inputs::Field;

/// What the process does once the artifacts are loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Interactive slider UI.
    Interactive,
    /// One prediction from the defaults plus `--set` overrides.
    Once { overrides: Vec<(Field, f64)> },
    /// CSV in, CSV out.
    Batch {
        input: PathBuf,
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub artifacts_dir: Option<PathBuf>,
    pub mode: Mode,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut config = None;
    let mut artifacts_dir = None;
    let mut once = false;
    let mut overrides = Vec::new();
    let mut batch = None;
    let mut out = None;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --config (expected a TOML file path)",
                )?;
                if config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--artifacts" => {
                i += 1;
                let dir = args.next_or_err(
                    i,
                    "missing value for --artifacts (expected a directory)",
                )?;
                if artifacts_dir.replace(PathBuf::from(dir)).is_some() {
                    return Err("--artifacts provided more than once".to_string());
                }
            }
            "--once" => {
                if once {
                    return Err("--once provided more than once".to_string());
                }
                once = true;
            }
            "--set" => {
                i += 1;
                let pair = args.next_or_err(i, "missing value for --set (expected NAME=VALUE)")?;
                let parsed = parse_override(pair)?;
                if overrides.iter().any(|(f, _)| *f == parsed.0) {
                    return Err(format!("--set {} provided more than once", parsed.0.key()));
                }
                overrides.push(parsed);
            }
            "--batch" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --batch (expected a CSV file path)",
                )?;
                if batch.replace(PathBuf::from(path)).is_some() {
                    return Err("--batch provided more than once".to_string());
                }
            }
            "--out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --out (expected a file path)")?;
                if out.replace(PathBuf::from(path)).is_some() {
                    return Err("--out provided more than once".to_string());
                }
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if once && batch.is_some() {
        return Err(
            "arguments `--once` and `--batch` are mutually exclusive; choose one mode".to_string(),
        );
    }
    if !overrides.is_empty() && batch.is_some() {
        return Err("`--set` cannot be combined with `--batch`".to_string());
    }
    if out.is_some() && batch.is_none() {
        return Err("`--out` requires `--batch`".to_string());
    }

    let mode = if let Some(input) = batch {
        Mode::Batch { input, output: out }
    } else if once || !overrides.is_empty() || !cfg!(feature = "tui") {
        Mode::Once { overrides }
    } else {
        Mode::Interactive
    };

    Ok(CliOptions {
        config,
        artifacts_dir,
        mode,
    })
}

fn parse_override(pair: &str) -> Result<(Field, f64), String> {
    let (name, value) = pair
        .split_once('=')
        .ok_or_else(|| format!("--set value \"{pair}\" is not of the form NAME=VALUE"))?;
    let field = Field::from_key(name.trim())
        .ok_or_else(|| format!("--set: unknown input \"{}\"", name.trim()))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("--set {}: \"{}\" is not a number", field.key(), value.trim()))?;
    if !value.is_finite() {
        return Err(format!("--set {}: value must be finite", field.key()));
    }
    Ok((field, value))
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("solar-predict: solar plant AC power output from weather and time inputs");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  solar-predict [--config <path>] [--artifacts <dir>]");
    eprintln!("                [--once [--set NAME=VALUE]...]");
    eprintln!("                [--batch <in.csv> [--out <out.csv>]]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>      Load settings from a TOML file");
    eprintln!("  --artifacts <dir>    Directory holding xgb_model.json and scaler.json");
    eprintln!("  --once               Print one prediction instead of opening the UI");
    eprintln!("  --set NAME=VALUE     Override one input for --once (e.g. hour=9)");
    eprintln!("  --batch <path>       Predict every row of a CSV file");
    eprintln!("  --out <path>         Write batch results here instead of stdout");
    eprintln!("  --help               Show this help message");
}
