//! Command-line argument parsing and processing.
//!
//! This module turns the raw argument list into a [`CliAction`]. Flags may appear
//! anywhere; the first positional argument selects the command. Unknown flags,
//! unknown commands and malformed values all resolve to
//! [`CliAction::ShowHelpDueToError`].

use chrono::NaiveDate;

use crate::time_source::parse_date;

/// Flags shared by every report command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalOptions {
    pub debug_enabled: bool,
    pub json: bool,
    pub config_dir: Option<String>,
    /// Report for this date instead of today.
    pub date: Option<NaiveDate>,
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Today's daylight report (default command)
    Status(GlobalOptions),
    /// Milestones of the current gaining half-year
    Milestones(GlobalOptions),
    /// Solstices and equinoxes of a year
    Seasons {
        options: GlobalOptions,
        year: Option<i32>,
    },
    /// Help for one command, or the command overview
    Help { command: Option<String> },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first item is the program name and is skipped.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut options = GlobalOptions::default();
        let mut display_help = false;
        let mut display_version = false;
        let mut unknown_arg_found = false;
        let mut positionals: Vec<String> = Vec::new();

        let mut iter = args_vec.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--debug" | "-d" => options.debug_enabled = true,
                "--json" | "-j" => options.json = true,
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--config" | "-c" => match iter.next() {
                    Some(dir) => options.config_dir = Some(dir.clone()),
                    None => {
                        log_error!("Missing directory after {arg}");
                        unknown_arg_found = true;
                    }
                },
                "--date" | "-D" => match iter.next().map(|value| parse_date(value)) {
                    Some(Ok(date)) => options.date = Some(date),
                    Some(Err(e)) => {
                        log_error!("{e}");
                        unknown_arg_found = true;
                    }
                    None => {
                        log_error!("Missing date after {arg}");
                        unknown_arg_found = true;
                    }
                },
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    log_warning!("Unknown argument: {flag}");
                    unknown_arg_found = true;
                }
                _ => positionals.push(arg.clone()),
            }
        }

        // Version and help take precedence over everything else
        let action = if display_version {
            CliAction::ShowVersion
        } else if display_help {
            CliAction::ShowHelp
        } else if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else {
            Self::command_action(options, &positionals)
        };

        ParsedArgs { action }
    }

    fn command_action(options: GlobalOptions, positionals: &[String]) -> CliAction {
        let (command, rest) = match positionals.split_first() {
            None => return CliAction::Status(options),
            Some((command, rest)) => (command.as_str(), rest),
        };

        match (command, rest) {
            ("status" | "s", []) => CliAction::Status(options),
            ("milestones" | "m", []) => CliAction::Milestones(options),
            ("seasons" | "y", []) => CliAction::Seasons {
                options,
                year: None,
            },
            ("seasons" | "y", [year]) => match year.parse::<i32>() {
                Ok(year) => CliAction::Seasons {
                    options,
                    year: Some(year),
                },
                Err(_) => {
                    log_error!("Invalid year: {year}");
                    CliAction::ShowHelpDueToError
                }
            },
            ("help" | "h", []) => CliAction::Help { command: None },
            ("help" | "h", [topic]) => CliAction::Help {
                command: Some(topic.clone()),
            },
            (command, []) => {
                log_warning!("Unknown command: {command}");
                CliAction::ShowHelpDueToError
            }
            (command, extra) => {
                log_error!("Unexpected arguments after '{command}': {}", extra.join(" "));
                CliAction::ShowHelpDueToError
            }
        }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("daylightr [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-D, --date <date>      Report for YYYY-MM-DD instead of today");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-h, --help             Print help information");
    log_indented!("-j, --json             Print machine-readable JSON");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("status, s              Today's daylight and how it is changing (default)");
    log_indented!("milestones, m          Milestones of the gaining half-year");
    log_indented!("seasons, y [YEAR]      Solstices and equinoxes of a year");
    log_indented!("help, h [COMMAND]      Show detailed help for a command");
    log_end!();
}
