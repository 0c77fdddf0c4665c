//! Runs the calculator features from the command line.

use std::process::ExitCode;

fn main() -> ExitCode {
    bdd_runner_cli::main(&calculator::resolver())
}
