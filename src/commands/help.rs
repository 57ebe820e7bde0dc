//! Help command implementation for daylightr.
//!
//! Shows command-specific help or the command overview.

use anyhow::Result;

/// Run the help command (dispatcher)
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = general help)
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => display_general_help(),
        Some("status") | Some("s") => display_status_help(),
        Some("milestones") | Some("m") => display_milestones_help(),
        Some("seasons") | Some("y") => display_seasons_help(),
        Some("help") | Some("h") => display_help_help(),
        Some(unknown) => {
            log_warning!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
    Ok(())
}

/// Display general help focused on commands (for the help command)
fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("status, s              Today's daylight and how it is changing (default)");
    log_indented!("milestones, m          Milestones of the gaining half-year");
    log_indented!("seasons, y [YEAR]      Solstices and equinoxes of a year");
    log_indented!("help, h [COMMAND]      Show detailed help for a command");
    log_pipe!();
    log_info!("Use 'daylightr help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'daylightr --help' to see all options and general usage.");
    log_end!();
}

fn display_status_help() {
    log_version!();
    log_block_start!("status - Today's daylight and how it is changing");
    log_block_start!("Usage: daylightr [status] [--date YYYY-MM-DD] [--json]");
    log_block_start!("Shows:");
    log_indented!("Sunrise, sunset, solar noon and civil twilight");
    log_indented!("Change since yesterday and since the last solstice");
    log_indented!("Whether days are getting longer or shorter, and how fast");
    log_indented!("The next equinox, solstice and milestone");
    log_block_start!("Notes:");
    log_indented!("Yesterday's and the solstice's daylight are cached in");
    log_indented!("$XDG_STATE_HOME/daylightr unless state_dir is configured");
    log_end!();
}

fn display_milestones_help() {
    log_version!();
    log_block_start!("milestones - Thresholds reached and ahead");
    log_block_start!("Usage: daylightr milestones [--date YYYY-MM-DD] [--json]");
    log_block_start!("Milestones:");
    log_indented!("daylight_hours   Daylight reaches N hours");
    log_indented!("gain_minutes     N minutes gained since the solstice");
    log_indented!("track_equinox    The equinox halfway to the summer solstice");
    log_block_start!("Notes:");
    log_indented!("Milestones are only tracked while days are getting longer");
    log_end!();
}

fn display_seasons_help() {
    log_version!();
    log_block_start!("seasons - Solstices and equinoxes of a year");
    log_block_start!("Usage: daylightr seasons [YEAR] [--json]");
    log_block_start!("Arguments:");
    log_indented!("YEAR  Year to show, defaults to the current one");
    log_block_start!("Examples:");
    log_indented!("daylightr seasons");
    log_indented!("daylightr seasons 2030");
    log_end!();
}

/// Display help for the help command itself
fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: daylightr help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  Optional command to get help for");
    log_indented!("         If omitted, shows general help");
    log_block_start!("Examples:");
    log_indented!("daylightr help");
    log_indented!("daylightr help milestones");
    log_end!();
}
