//! Binary entrypoint for the `depgen` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env is fine; DEPGEN_* variables may come from the shell.
    let _ = dotenvy::dotenv();
    match depgen::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
