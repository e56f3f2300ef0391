// Copyright 2026 The json2kml Authors
//
// This file is part of json2kml.
//
// json2kml is free software: you can redistribute it and/or modify it under
// the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// json2kml is distributed in the hope that it will be useful, but WITHOUT ANY
// WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for
// more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with json2kml. If not, see <https://www.gnu.org/licenses/>.

//! This is a very simple command-line interface for the JSON-to-KML
//! converter.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

/// Convert a JSON location log to a KML document.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JSON file containing an array of location records.
    input: PathBuf,

    /// Destination KML file.
    #[arg(default_value = "output.kml")]
    output: PathBuf,
}

fn main() -> ExitCode {
    // Skipped-record warnings should be visible without RUST_LOG being set.
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match json2kml::convert(&cli.input, &cli.output) {
        Ok(summary) => {
            println!(
                "KML file created: {} ({} points, {} skipped)",
                cli.output.display(),
                summary.rendered,
                summary.skipped
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Conversion failed with: {err}");
            ExitCode::FAILURE
        }
    }
}
