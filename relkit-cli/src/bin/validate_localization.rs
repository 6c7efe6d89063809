use std::process::ExitCode;

use clap::Parser;
use relkit_cli::{
    localization::{ValidateArgs, run_validate},
    logging::init_tracing,
};

fn main() -> ExitCode {
    init_tracing();
    let args = ValidateArgs::parse();

    match run_validate(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
