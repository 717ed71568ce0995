//! Protoflow CLI - edit the incident management protocol flowchart

mod cli;
mod listing;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is initialized inside run() once flags and environment are known
    if let Err(e) = cli::ProtoflowApp::run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
