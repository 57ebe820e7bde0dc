//! Main application entry point.
//!
//! Parses the command line, applies the process-wide switches (configuration
//! directory, debug output, JSON mode) and dispatches to the command handlers in
//! `daylightr::commands`. Errors end the run with a closing error line and a
//! non-zero exit code.

use anyhow::Result;

use daylightr::args::{self, CliAction, GlobalOptions, ParsedArgs};
use daylightr::commands;
use daylightr::common::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use daylightr::config;
use daylightr::logger::Log;
use daylightr::log_error_exit;

fn main() {
    let parsed_args = ParsedArgs::from_env();

    let code = match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            EXIT_SUCCESS
        }
        CliAction::ShowHelp => {
            args::display_help();
            EXIT_SUCCESS
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            EXIT_FAILURE
        }
        CliAction::Help { command } => finish(commands::help::run_help_command(command.as_deref())),
        CliAction::Status(options) => run(&options, || {
            commands::status::handle_status_command(&options)
        }),
        CliAction::Milestones(options) => run(&options, || {
            commands::milestones::handle_milestones_command(&options)
        }),
        CliAction::Seasons { options, year } => run(&options, || {
            commands::seasons::handle_seasons_command(&options, year)
        }),
    };

    std::process::exit(code);
}

/// Apply the global options, then run `command`.
fn run(options: &GlobalOptions, command: impl FnOnce() -> Result<()>) -> i32 {
    // JSON goes to stdout alone
    Log::set_enabled(!options.json);
    Log::set_debug(options.debug_enabled);

    if let Err(e) = config::set_config_dir(options.config_dir.clone()) {
        return finish(Err(e));
    }

    finish(command())
}

fn finish(result: Result<()>) -> i32 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            Log::set_enabled(true);
            log_error_exit!("{e:#}");
            EXIT_FAILURE
        }
    }
}
