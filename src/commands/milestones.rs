//! Milestones command - thresholds reached and ahead in the gaining half-year.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use super::{ReportContext, print_json};
use crate::args::GlobalOptions;
use crate::milestones::{Milestone, MilestoneState, update_milestones_with};
use crate::season::{Hemisphere, SeasonClassification, SeasonalCalendar};

#[derive(Debug, Serialize)]
struct MilestoneReport {
    date: NaiveDate,
    season: SeasonClassification,
    milestones: Vec<Milestone>,
}

/// Handle the milestones command.
pub fn handle_milestones_command(options: &GlobalOptions) -> Result<()> {
    let context = ReportContext::prepare(options)?;
    let settings = context.config.milestone_settings();

    let calendar = SeasonalCalendar::new(context.tz);
    let season = Hemisphere::from_latitude(context.coordinate.latitude())
        .orient(calendar.classify(context.date));
    let report = MilestoneReport {
        date: context.date,
        season,
        milestones: update_milestones_with(context.date, context.coordinate, &context.tz, &settings),
    };

    if options.json {
        return print_json(&report);
    }

    log_version!();
    log_block_start!("{}: {}", report.date, report.season);
    if report.milestones.is_empty() {
        if report.season.is_gaining() {
            log_indented!("No milestones could be projected");
        } else {
            let solstice = calendar.days_until_solstice(context.date);
            log_indented!("Days are getting shorter, milestones resume after the solstice");
            if let Some(countdown) = solstice {
                log_indented!("{} in {} days ({})", countdown.kind, countdown.days, countdown.date);
            }
        }
        log_end!();
        return Ok(());
    }

    for milestone in &report.milestones {
        match milestone.state {
            MilestoneState::Achieved { achieved_date } => {
                log_indented!("✓ {} on {}", milestone.kind, achieved_date);
            }
            MilestoneState::Upcoming {
                target_date,
                days_until,
            } => {
                log_indented!("  {} in {} days ({})", milestone.kind, days_until, target_date);
            }
        }
    }
    log_end!();
    Ok(())
}
