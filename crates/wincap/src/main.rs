use std::process::ExitCode;

use tracing::debug;
use wincap_core::init_logging;

mod app;
mod commands;
mod table;

fn main() -> ExitCode {
    let matches = app::build_cli().get_matches();

    init_logging(!matches.get_flag("verbose"));

    match commands::run_command(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Handlers have already printed the user-facing message
            debug!(event = "cli.exit_with_error", error = %e);
            ExitCode::FAILURE
        }
    }
}
