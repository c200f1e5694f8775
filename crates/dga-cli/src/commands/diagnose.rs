use clap::Args;
use dga_core::backend::clips::ClipsBackend;
use dga_core::backend::NativeBackend;
use dga_core::error::DgaError;
use dga_core::model::ClassificationMode;
use dga_core::parsing::{self, RawReading};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::output;

#[derive(Args)]
pub struct DiagnoseArgs {
    /// JSON file with the five gas concentrations (string-valued ppm)
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["h2", "ch4", "c2h2", "c2h4", "c2h6"])]
    pub input: Option<PathBuf>,

    /// Hydrogen concentration in ppm
    #[arg(long, value_name = "PPM")]
    pub h2: Option<Decimal>,

    /// Methane concentration in ppm
    #[arg(long, value_name = "PPM")]
    pub ch4: Option<Decimal>,

    /// Acetylene concentration in ppm
    #[arg(long, value_name = "PPM")]
    pub c2h2: Option<Decimal>,

    /// Ethylene concentration in ppm
    #[arg(long, value_name = "PPM")]
    pub c2h4: Option<Decimal>,

    /// Ethane concentration in ppm
    #[arg(long, value_name = "PPM")]
    pub c2h6: Option<Decimal>,

    /// Rule set: scoring (default) or tree
    #[arg(short, long, default_value = "scoring")]
    pub mode: String,

    /// Backend: native (default) or clips
    #[arg(short, long, default_value = "native")]
    pub backend: String,

    /// CLIPS rule source (.clp); falls back to the DGA_CLIPS_RULES env var
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Output format: table (default) or json
    #[arg(short, long, default_value = "table")]
    pub output: String,

    /// Show the per-category score table
    #[arg(long)]
    pub verbose: bool,
}

pub fn run(args: DiagnoseArgs) -> Result<(), DgaError> {
    let mode = ClassificationMode::from_str_loose(&args.mode)
        .ok_or_else(|| DgaError::UnknownMode(args.mode.clone()))?;

    let reading = match &args.input {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            parsing::parse_reading(&json)?
        }
        None => {
            // Missing flags are reported together, as an invalid reading.
            let raw = RawReading {
                h2: args.h2,
                ch4: args.ch4,
                c2h2: args.c2h2,
                c2h4: args.c2h4,
                c2h6: args.c2h6,
            };
            parsing::reading_from_raw(&raw)?
        }
    };

    let diagnosis = match args.backend.trim().to_lowercase().as_str() {
        "native" => dga_core::diagnose_with(&NativeBackend::new(), &reading, mode)?,
        "clips" => {
            let rules_path = args
                .rules
                .clone()
                .or_else(|| std::env::var_os("DGA_CLIPS_RULES").map(PathBuf::from))
                .ok_or_else(|| DgaError::Backend {
                    backend: "clips".into(),
                    reason: "no rule source: pass --rules or set DGA_CLIPS_RULES".into(),
                })?;
            dga_core::diagnose_with(&ClipsBackend::new(rules_path), &reading, mode)?
        }
        other => {
            return Err(DgaError::Backend {
                backend: other.to_string(),
                reason: "unknown backend (expected 'native' or 'clips')".into(),
            })
        }
    };

    match args.output.as_str() {
        "json" => output::json::print(&diagnosis)?,
        _ => output::table::print_diagnosis(&diagnosis, args.verbose),
    }

    Ok(())
}
