//! qharness - menu-driven runner for quantum algorithm demonstrations

use std::process::ExitCode;

use qharness::cli;

fn main() -> ExitCode {
    cli::run()
}
