//! CLI binary for the candump CSV converter

use anyhow::Result;
use candump_csv::{check_preconditions, convert_candump_to_csv, ConversionOptions};
use clap::{Arg, Command};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let matches = Command::new("candump2csv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert CAN log to human-readable CSV.")
        .arg(
            Arg::new("candump")
                .short('c')
                .long("candump")
                .help("Path to the CAN dump file.")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("dbc")
                .short('d')
                .long("dbc")
                .help("Path to the DBC file.")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Path of the output file. Must not exist yet.")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output with per-frame decoding details")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let debug = matches.get_flag("debug");
    init_logging(debug);

    // required(true) guarantees all three are present
    let path_arg = |name: &str| {
        matches
            .get_one::<PathBuf>(name)
            .cloned()
            .unwrap_or_default()
    };
    let options = ConversionOptions::new(path_arg("candump"), path_arg("dbc"), path_arg("output"));

    if let Err(e) = check_preconditions(&options) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match convert_candump_to_csv(&options) {
        Ok(report) => {
            if report.skipped() > 0 {
                eprintln!(
                    "Skipped {} of {} lines ({} malformed, {} unknown IDs, {} decode failures).",
                    report.skipped(),
                    report.lines_read,
                    report.malformed_lines,
                    report.unknown_frame_ids,
                    report.decode_failures
                );
            }
            println!(
                "Conversion completed successfully! Data has been saved to '{}'.",
                options.output.display()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Conversion failed. Please check the provided files and try again.");
            std::process::exit(1);
        }
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = if debug {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
