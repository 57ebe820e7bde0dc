//! Status command - today's daylight and how it is changing.
//!
//! Runs the tracker against the on-disk snapshot store so yesterday's and the
//! solstice's daylight are reused between runs, then prints the full report.
//! A tracker failure (polar night, unreadable state) only drops the cached
//! comparison; the report falls back to computing changes directly.

use anyhow::Result;
use chrono::{DateTime, FixedOffset};

use super::{ReportContext, print_json};
use crate::args::GlobalOptions;
use crate::store::FileSnapshotStore;
use crate::summary::{WidgetSummary, format_change, format_duration, summarize};
use crate::tracker::DaylightTracker;

/// Handle the status command.
pub fn handle_status_command(options: &GlobalOptions) -> Result<()> {
    let context = ReportContext::prepare(options)?;
    let summary = build_summary(&context);

    if options.json {
        print_json(&summary)
    } else {
        display_human_readable(&summary);
        Ok(())
    }
}

pub(crate) fn build_summary(context: &ReportContext) -> WidgetSummary {
    let store = FileSnapshotStore::open(context.config.state_dir.as_deref());
    log_debug!("Using state directory {}", store.dir().display());

    let tracker = DaylightTracker::new(store, context.coordinate, context.tz);
    let comparison = match tracker.track(context.date) {
        Ok(comparison) => Some(comparison.result),
        Err(e) => {
            log_warning!("Could not compare with stored daylight: {e}");
            None
        }
    };

    summarize(
        context.date,
        context.coordinate,
        &context.tz,
        context.timezone_name(),
        comparison.as_ref(),
        &context.config.milestone_settings(),
    )
}

fn clock(time: Option<DateTime<FixedOffset>>) -> String {
    time.map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "none".to_string())
}

fn display_human_readable(summary: &WidgetSummary) {
    log_version!();
    log_block_start!("{} at {} ({})", summary.date, summary.location, summary.timezone);

    match summary.daylight_seconds {
        Some(seconds) => {
            log_indented!("Sunrise:   {}", clock(summary.sunrise));
            log_indented!("Sunset:    {}", clock(summary.sunset));
            log_indented!("Daylight:  {}", format_duration(seconds));
        }
        None => log_indented!("The sun does not rise and set today"),
    }
    log_indented!("Solar noon: {}", summary.solar_noon.format("%H:%M:%S"));
    if summary.civil_dawn.is_some() || summary.civil_dusk.is_some() {
        log_indented!(
            "Civil twilight: {} to {}",
            clock(summary.civil_dawn),
            clock(summary.civil_dusk)
        );
    }

    log_block_start!("{}", summary.season);
    if let Some(change) = summary.daily_change_seconds {
        log_indented!("Since yesterday: {}", format_change(change));
    }
    if let Some(change) = summary.cumulative_change_seconds {
        log_indented!(
            "Since the {} ({}): {}",
            summary.reference_solstice.kind.display_name().to_lowercase(),
            summary.reference_solstice.date,
            format_change(change)
        );
    }
    if let Some(velocity) = summary.velocity_seconds_per_day {
        log_indented!("Changing by {} per day", format_change(velocity));
    }
    log_indented!("{:.0}% through the half-year", summary.progress * 100.0);

    log_block_start!("Coming up");
    for countdown in [summary.next_equinox, summary.next_solstice].into_iter().flatten() {
        match countdown.days {
            0 => log_indented!("{} today", countdown.kind),
            1 => log_indented!("{} tomorrow ({})", countdown.kind, countdown.date),
            days => log_indented!("{} in {} days ({})", countdown.kind, days, countdown.date),
        }
    }

    if let Some(next) = summary.milestones.iter().find(|m| !m.is_achieved())
        && let (Some(date), Some(days)) = (next.target_date(), next.days_until())
    {
        log_indented!("{} in {} days ({})", next.kind, days, date);
    }
    log_end!();
}
