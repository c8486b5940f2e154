//! Commands invoked by the dashboard front end

use std::fmt::Display;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::water::models::{ActivityId, ActivityKind, DashboardData, DayDetail, UsageEvent};
use crate::water::stats::{get_dashboard_data, get_day_detail};
use crate::AppState;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown activity: {0}")]
    UnknownActivity(ActivityId),
}

/// Log one occurrence of a catalog activity at `at`
pub fn log_activity(
    state: &mut AppState,
    activity_id: ActivityId,
    at: DateTime<Utc>,
) -> Result<UsageEvent, CommandError> {
    let activity = state
        .catalog
        .get(activity_id)
        .ok_or(CommandError::UnknownActivity(activity_id))?;
    Ok(state.log.record(activity, at))
}

/// Undo the latest entry of `activity_id` on `now`'s day
pub fn remove_activity<Tz: TimeZone>(
    state: &mut AppState,
    activity_id: ActivityId,
    now: &DateTime<Tz>,
) -> bool {
    state.log.remove_latest_on_day(activity_id, now)
}

/// Get everything the dashboard renders for `now`
pub fn get_dashboard<Tz: TimeZone>(state: &AppState, now: &DateTime<Tz>) -> DashboardData {
    get_dashboard_data(&state.log, &state.catalog, &state.config, now)
}

/// Get the drill-down for one day of the week view
pub fn get_day_details<Tz>(state: &AppState, date: NaiveDate, tz: &Tz) -> DayDetail
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    get_day_detail(&state.log, &state.catalog, date, tz)
}

/// Get the activity catalog in display order
pub fn get_catalog(state: &AppState) -> &[ActivityKind] {
    state.catalog.activities()
}
