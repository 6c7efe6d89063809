use std::process::ExitCode;

use clap::Parser;
use relkit_cli::{
    logging::init_tracing,
    version::{UpdateVersionArgs, run_update_version},
};

fn main() -> ExitCode {
    init_tracing();
    let args = UpdateVersionArgs::parse();

    match run_update_version(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
