// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: decode a QDF assembly file and print what it contains
//!
//! Usage:
//!   qdf-lite <file.qdf> [options]
//!
//! Output is JSON on stdout; logs go to stderr and follow `RUST_LOG`.

use anyhow::{bail, Context, Result};
use qdf_lite_processing::{process_file, ModelSummary, ProcessingConfig};
use std::env;

struct Options {
    path: String,
    records: bool,
    diagnostics: bool,
    sequential: bool,
}

fn print_usage() {
    eprintln!("Usage: qdf-lite <file.qdf> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --records       Print every decoded record and material");
    eprintln!("  --diagnostics   Print rejected lines and per-keyword counts");
    eprintln!("  --sequential    Decode on the calling thread only");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QDF_PARALLEL_THRESHOLD, QDF_MAX_INPUT_MB, QDF_MAX_REPORTED_REJECTIONS, RUST_LOG");
}

fn parse_args(args: &[String]) -> Result<Option<Options>> {
    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        return Ok(None);
    }

    let mut options = Options {
        path: args[1].clone(),
        records: false,
        diagnostics: false,
        sequential: false,
    };

    for arg in &args[2..] {
        match arg.as_str() {
            "--records" => options.records = true,
            "--diagnostics" => options.diagnostics = true,
            "--sequential" => options.sequential = true,
            other => bail!("unknown option: {}", other),
        }
    }
    Ok(Some(options))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "warn,qdf_lite_processing=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    let mut config = ProcessingConfig::from_env();
    if options.sequential {
        config = config.sequential();
    }
    tracing::debug!(?config, path = %options.path, "starting");

    let processed = process_file(&options.path, &config)
        .with_context(|| format!("failed to process {}", options.path))?;

    let mut output = serde_json::Map::new();
    output.insert(
        "summary".into(),
        serde_json::to_value(ModelSummary::from_model(&processed.model))?,
    );
    if options.records {
        output.insert(
            "materials".into(),
            serde_json::to_value(processed.model.materials())?,
        );
        output.insert(
            "geometries".into(),
            serde_json::to_value(processed.model.geometries())?,
        );
    }
    if options.diagnostics {
        output.insert(
            "diagnostics".into(),
            serde_json::to_value(&processed.diagnostics)?,
        );
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
