//! Gantry binary entry point.
//!
//! Thin wrapper around [`gantry::cli::run`]. The CLI returns the process
//! exit code to use: the child's code when a launch was performed, zero
//! otherwise. Errors are printed and mapped to exit code 1.

use std::process::ExitCode;

fn main() -> ExitCode {
    match gantry::cli::run() {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(err) => {
            gantry::ui::output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
