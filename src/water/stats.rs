//! Statistics calculation for water usage data
//!
//! Every function here is a pure derivation from an [`EventLog`] and a
//! caller-supplied reference instant. Calendar days are evaluated in the
//! timezone of that instant; nothing reads the system clock.

use std::collections::HashMap;
use std::fmt::Display;

use chrono::{DateTime, NaiveDate, TimeZone};
use indexmap::IndexMap;

use crate::water::catalog::ActivityCatalog;
use crate::water::day::{day_label, day_title, format_time, is_same_day, local_date, trailing_dates};
use crate::water::event_log::EventLog;
use crate::water::models::{
    ActivityId, AppConfig, DailyAggregate, DashboardData, DayDetail, DayEntry, DaySeriesPoint,
    TodaySummary, UsageEvent, WeekDayProgress,
};
use crate::water::progress::{usage_percentage, ArcGeometry};

/// Length of the rolling series shown on the dashboard
pub const DEFAULT_ROLLING_DAYS: usize = 7;

/// Total gallons logged on `now`'s calendar day
pub fn today_total<Tz: TimeZone>(log: &EventLog, now: &DateTime<Tz>) -> f64 {
    log.iter()
        .filter(|event| is_same_day(&event.occurred_at, now))
        .map(|event| event.gallons)
        .sum()
}

/// Today's events grouped by activity, in order of each activity's first
/// occurrence today.
///
/// `gallons` on each aggregate is the per-event amount of the first event;
/// `total_gallons` is the exact sum.
pub fn today_by_activity<Tz: TimeZone>(
    log: &EventLog,
    catalog: &ActivityCatalog,
    now: &DateTime<Tz>,
) -> Vec<DailyAggregate> {
    let mut todays: Vec<&UsageEvent> = log
        .iter()
        .filter(|event| is_same_day(&event.occurred_at, now))
        .collect();
    todays.sort_by_key(|event| event.occurred_at);

    let mut groups: IndexMap<ActivityId, DailyAggregate> = IndexMap::new();
    for event in todays {
        let aggregate = groups
            .entry(event.activity_id)
            .or_insert_with(|| DailyAggregate {
                activity_id: event.activity_id,
                name: catalog.name_of(event.activity_id),
                gallons: event.gallons,
                count: 0,
                total_gallons: 0.0,
            });
        aggregate.count += 1;
        aggregate.total_gallons += event.gallons;
    }

    groups.into_values().collect()
}

/// Daily totals for the last seven calendar days, oldest first
pub fn rolling_week<Tz: TimeZone>(log: &EventLog, now: &DateTime<Tz>) -> Vec<DaySeriesPoint> {
    rolling_days(log, now, DEFAULT_ROLLING_DAYS)
}

/// Daily totals for the `days` calendar days ending on `now`'s day.
///
/// Always yields one point per day, zero-filled, oldest first.
pub fn rolling_days<Tz: TimeZone>(
    log: &EventLog,
    now: &DateTime<Tz>,
    days: usize,
) -> Vec<DaySeriesPoint> {
    let tz = now.timezone();
    let mut totals: HashMap<NaiveDate, f64> = HashMap::new();
    for event in log {
        *totals.entry(local_date(&event.occurred_at, &tz)).or_insert(0.0) += event.gallons;
    }

    trailing_dates(now.date_naive(), days)
        .into_iter()
        .map(|date| DaySeriesPoint {
            date,
            total_gallons: totals.get(&date).copied().unwrap_or(0.0),
        })
        .collect()
}

/// Events on the calendar day of `day`, ascending by time
pub fn entries_on_day<Tz: TimeZone>(log: &EventLog, day: &DateTime<Tz>) -> Vec<UsageEvent> {
    entries_on_date(log, day.date_naive(), &day.timezone())
}

/// Events on `date` as seen in `tz`, ascending by time
pub fn entries_on_date<Tz: TimeZone>(log: &EventLog, date: NaiveDate, tz: &Tz) -> Vec<UsageEvent> {
    let mut entries: Vec<UsageEvent> = log
        .iter()
        .filter(|event| local_date(&event.occurred_at, tz) == date)
        .cloned()
        .collect();
    entries.sort_by_key(|event| event.occurred_at);
    entries
}

/// Build today's budget summary
pub fn get_today_summary<Tz: TimeZone>(
    log: &EventLog,
    catalog: &ActivityCatalog,
    config: &AppConfig,
    now: &DateTime<Tz>,
) -> TodaySummary {
    let used_gallons = today_total(log, now);
    let percentage = usage_percentage(used_gallons, config.daily_budget_gallons);

    TodaySummary {
        date: now.date_naive(),
        used_gallons,
        budget_gallons: config.daily_budget_gallons,
        percentage,
        remaining_gallons: (config.daily_budget_gallons - used_gallons).max(0.0),
        ring: ArcGeometry::compute(percentage, config.ring_radius),
        activities: today_by_activity(log, catalog, now),
    }
}

/// Build the rolling week of progress rings
pub fn get_week_progress<Tz: TimeZone>(
    log: &EventLog,
    config: &AppConfig,
    now: &DateTime<Tz>,
) -> Vec<WeekDayProgress> {
    rolling_days(log, now, config.rolling_days)
        .into_iter()
        .map(|point| {
            let percentage = usage_percentage(point.total_gallons, config.daily_budget_gallons);
            WeekDayProgress {
                date: point.date,
                day_label: day_label(point.date),
                total_gallons: point.total_gallons,
                percentage,
                ring: ArcGeometry::compute(percentage, config.ring_radius),
            }
        })
        .collect()
}

/// Get complete dashboard data
pub fn get_dashboard_data<Tz: TimeZone>(
    log: &EventLog,
    catalog: &ActivityCatalog,
    config: &AppConfig,
    now: &DateTime<Tz>,
) -> DashboardData {
    DashboardData {
        today: get_today_summary(log, catalog, config, now),
        week: get_week_progress(log, config, now),
    }
}

/// Get the drill-down listing for one calendar day
pub fn get_day_detail<Tz>(
    log: &EventLog,
    catalog: &ActivityCatalog,
    date: NaiveDate,
    tz: &Tz,
) -> DayDetail
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let entries: Vec<DayEntry> = entries_on_date(log, date, tz)
        .into_iter()
        .map(|event| DayEntry {
            activity_id: event.activity_id,
            name: catalog.name_of(event.activity_id),
            time_label: format_time(&event.occurred_at, tz),
            gallons: event.gallons,
            occurred_at: event.occurred_at,
        })
        .collect();

    DayDetail {
        date,
        title: day_title(date),
        total_gallons: entries.iter().map(|entry| entry.gallons).sum(),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, Utc};

    use crate::water::progress::ColorKind;

    const SHOWER: ActivityId = ActivityId::new(1);
    const FLUSH: ActivityId = ActivityId::new(3);
    const BATH: ActivityId = ActivityId::new(10);

    fn tz() -> FixedOffset {
        FixedOffset::east_opt(-4 * 3600).unwrap()
    }

    fn local(day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
        tz().with_ymd_and_hms(2024, 10, day, hour, minute, 0).unwrap()
    }

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        local(day, hour, minute).with_timezone(&Utc)
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, day).unwrap()
    }

    /// Two showers and a flush on the 14th
    fn morning_log() -> EventLog {
        let mut log = EventLog::new();
        log.append(SHOWER, 15.0, at(14, 8, 0));
        log.append(SHOWER, 15.0, at(14, 9, 0));
        log.append(FLUSH, 3.0, at(14, 10, 0));
        log
    }

    #[test]
    fn test_morning_scenario() {
        let catalog = ActivityCatalog::household();
        let mut log = morning_log();
        let now = local(14, 12, 0);

        assert_eq!(today_total(&log, &now), 33.0);

        let aggregates = today_by_activity(&log, &catalog, &now);
        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].activity_id, SHOWER);
        assert_eq!(aggregates[0].name, "5 Minute Shower");
        assert_eq!(aggregates[0].gallons, 15.0);
        assert_eq!(aggregates[0].count, 2);
        assert_eq!(aggregates[0].total_gallons, 30.0);
        assert_eq!(aggregates[1].activity_id, FLUSH);
        assert_eq!(aggregates[1].gallons, 3.0);
        assert_eq!(aggregates[1].count, 1);

        assert!(log.remove_latest_on_day(SHOWER, &now));
        assert_eq!(today_total(&log, &now), 18.0);
        let remaining = entries_on_day(&log, &now);
        assert_eq!(remaining[0].occurred_at, at(14, 8, 0));
    }

    #[test]
    fn test_empty_log() {
        let catalog = ActivityCatalog::household();
        let log = EventLog::new();
        let now = local(14, 12, 0);

        assert_eq!(today_total(&log, &now), 0.0);
        assert!(today_by_activity(&log, &catalog, &now).is_empty());
        assert!(entries_on_day(&log, &now).is_empty());

        let week = rolling_week(&log, &now);
        assert_eq!(week.len(), 7);
        assert!(week.iter().all(|p| p.total_gallons == 0.0));
    }

    #[test]
    fn test_aggregates_sum_to_today_total() {
        let catalog = ActivityCatalog::household();
        let mut log = morning_log();
        log.append(BATH, 45.0, at(14, 20, 0));
        log.append(FLUSH, 3.0, at(14, 21, 0));
        log.append(SHOWER, 15.0, at(13, 22, 0));
        let now = local(14, 23, 0);

        let from_groups: f64 = today_by_activity(&log, &catalog, &now)
            .iter()
            .map(|a| a.gallons * a.count as f64)
            .sum();
        assert_eq!(from_groups, today_total(&log, &now));
        assert_eq!(from_groups, 81.0);
    }

    #[test]
    fn test_group_order_follows_time_not_append_order() {
        let catalog = ActivityCatalog::household();
        let mut log = EventLog::new();
        log.append(FLUSH, 3.0, at(14, 10, 0));
        log.append(SHOWER, 15.0, at(14, 7, 0));
        log.append(FLUSH, 3.0, at(14, 6, 0));

        let ids: Vec<_> = today_by_activity(&log, &catalog, &local(14, 12, 0))
            .iter()
            .map(|a| a.activity_id)
            .collect();
        assert_eq!(ids, vec![FLUSH, SHOWER]);
    }

    #[test]
    fn test_rolling_week_shape() {
        let mut log = morning_log();
        log.append(BATH, 45.0, at(11, 19, 0));
        log.append(FLUSH, 3.0, at(7, 23, 0)); // outside the window
        let now = local(14, 12, 0);

        let week = rolling_week(&log, &now);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, date(8));
        assert_eq!(week[6].date, date(14));
        assert!(week.windows(2).all(|pair| pair[0].date < pair[1].date));

        assert_eq!(week[3].total_gallons, 45.0);
        assert_eq!(week[6].total_gallons, 33.0);
        assert_eq!(week.iter().map(|p| p.total_gallons).sum::<f64>(), 78.0);
    }

    #[test]
    fn test_rolling_days_custom_length() {
        let log = morning_log();
        let now = local(14, 12, 0);

        let series = rolling_days(&log, &now, 30);
        assert_eq!(series.len(), 30);
        assert_eq!(series.last().unwrap().date, date(14));
        assert!(rolling_days(&log, &now, 0).is_empty());
    }

    #[test]
    fn test_day_boundary_in_reference_timezone() {
        let mut log = EventLog::new();
        log.append(SHOWER, 15.0, at(13, 23, 59));
        log.append(FLUSH, 3.0, at(14, 0, 1));
        let now = local(14, 12, 0);

        assert_eq!(today_total(&log, &now), 3.0);

        let week = rolling_week(&log, &now);
        assert_eq!(week[5].total_gallons, 15.0);
        assert_eq!(week[6].total_gallons, 3.0);
    }

    #[test]
    fn test_future_events_count_on_their_day() {
        let mut log = EventLog::new();
        let now = local(14, 8, 0);
        log.append(BATH, 45.0, (now + Duration::hours(10)).with_timezone(&Utc));

        assert_eq!(today_total(&log, &now), 45.0);
    }

    #[test]
    fn test_entries_on_day_sorted() {
        let mut log = EventLog::new();
        log.append(FLUSH, 3.0, at(14, 10, 0));
        log.append(SHOWER, 15.0, at(14, 8, 0));
        log.append(BATH, 45.0, at(12, 9, 0));

        let entries = entries_on_day(&log, &local(14, 0, 0));
        let times: Vec<_> = entries.iter().map(|e| e.occurred_at).collect();
        assert_eq!(times, vec![at(14, 8, 0), at(14, 10, 0)]);

        assert!(entries_on_date(&log, date(13), &tz()).is_empty());
    }

    #[test]
    fn test_remove_then_readd_restores_total() {
        let mut log = morning_log();
        let now = local(14, 12, 0);
        let before = today_total(&log, &now);

        assert!(log.remove_latest_on_day(FLUSH, &now));
        log.append(FLUSH, 3.0, now.with_timezone(&Utc));

        assert_eq!(today_total(&log, &now), before);
    }

    #[test]
    fn test_derivations_track_mutations() {
        let catalog = ActivityCatalog::household();
        let mut log = EventLog::new();
        let now = local(14, 12, 0);

        assert!(today_by_activity(&log, &catalog, &now).is_empty());
        log.append(SHOWER, 15.0, at(14, 11, 0));
        assert_eq!(today_by_activity(&log, &catalog, &now)[0].count, 1);
        log.append(SHOWER, 15.0, at(14, 11, 30));
        assert_eq!(today_by_activity(&log, &catalog, &now)[0].count, 2);
    }

    #[test]
    fn test_today_summary_over_budget() {
        let catalog = ActivityCatalog::household();
        let config = AppConfig::default();
        let mut log = EventLog::new();
        log.append(BATH, 45.0, at(14, 7, 0));
        log.append(BATH, 45.0, at(14, 19, 0));
        log.append(FLUSH, 3.0, at(14, 20, 0));
        log.append(FLUSH, 3.0, at(14, 21, 0));

        let summary = get_today_summary(&log, &catalog, &config, &local(14, 22, 0));
        assert_eq!(summary.used_gallons, 96.0);
        assert_eq!(summary.percentage, 120.0);
        assert_eq!(summary.remaining_gallons, 0.0);
        assert_eq!(summary.ring.clamped_percentage, 120.0);
        assert_eq!(summary.ring.color_kind, ColorKind::Overage);
        assert_eq!(summary.activities.len(), 2);
    }

    #[test]
    fn test_dashboard_week_rings() {
        let catalog = ActivityCatalog::household();
        let config = AppConfig::default();
        let log = morning_log();

        let data = get_dashboard_data(&log, &catalog, &config, &local(14, 12, 0));
        assert_eq!(data.today.used_gallons, 33.0);
        assert_eq!(data.today.remaining_gallons, 47.0);
        assert_eq!(data.week.len(), 7);

        let today = data.week.last().unwrap();
        assert_eq!(today.day_label, "Mon");
        assert_eq!(today.total_gallons, 33.0);
        assert_eq!(today.ring.color_kind, ColorKind::Normal);
        assert_eq!(data.week[0].ring.dash_offset, data.week[0].ring.circumference);
    }

    #[test]
    fn test_day_detail() {
        let catalog = ActivityCatalog::household();
        let log = morning_log();

        let detail = get_day_detail(&log, &catalog, date(14), &tz());
        assert_eq!(detail.title, "Monday, Oct 14");
        assert_eq!(detail.total_gallons, 33.0);
        assert_eq!(detail.entries.len(), 3);
        assert_eq!(detail.entries[0].name, "5 Minute Shower");
        assert_eq!(detail.entries[0].time_label, "8:00 AM");
        assert_eq!(detail.entries[2].name, "Toilet Flush");

        let empty = get_day_detail(&log, &catalog, date(10), &tz());
        assert!(empty.entries.is_empty());
        assert_eq!(empty.total_gallons, 0.0);
    }
}
