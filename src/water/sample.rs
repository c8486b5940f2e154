//! Deterministic sample log for demos and tests

use chrono::{DateTime, Days, NaiveTime, TimeZone, Utc};

use crate::water::catalog::ActivityCatalog;
use crate::water::event_log::EventLog;

/// Days of history generated, today included
const SAMPLE_DAYS: u64 = 7;

/// Build a week of plausible history ending on `now`'s day.
///
/// Each day gets one to three entries between 06:00 and 21:59 local time;
/// the result is sorted chronologically.
pub fn sample_log<Tz: TimeZone>(catalog: &ActivityCatalog, now: &DateTime<Tz>) -> EventLog {
    let mut log = EventLog::new();
    let activities = catalog.activities();
    if activities.is_empty() {
        return log;
    }

    let tz = now.timezone();
    for offset in 0..SAMPLE_DAYS {
        let Some(day) = now.date_naive().checked_sub_days(Days::new(offset)) else {
            continue;
        };

        let entries = 1 + (offset % 3);
        for e in 0..entries {
            let slot = (offset * 3 + e * 7) as usize;
            let activity = &activities[slot % activities.len()];
            let hour = 6 + ((offset * 5 + e * 4) % 16) as u32;
            let minute = ((offset * 17 + e * 23) % 60) as u32;

            let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) else {
                continue;
            };
            // Skips wall-clock times erased by a DST jump
            if let Some(local) = tz.from_local_datetime(&day.and_time(time)).earliest() {
                log.record(activity, local.with_timezone(&Utc));
            }
        }
    }

    log.sort_chronologically();
    log
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    use crate::water::stats::rolling_week;

    #[test]
    fn test_sample_covers_week() {
        let catalog = ActivityCatalog::household();
        let tz = FixedOffset::east_opt(3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 10, 14, 12, 0, 0).unwrap();

        let log = sample_log(&catalog, &now);
        assert_eq!(log.len(), 1 + 2 + 3 + 1 + 2 + 3 + 1);
        assert!(log
            .events()
            .windows(2)
            .all(|pair| pair[0].occurred_at <= pair[1].occurred_at));
        assert!(log.iter().all(|e| {
            let hour = e.occurred_at.with_timezone(&tz).hour();
            (6..22).contains(&hour)
        }));
        assert!(rolling_week(&log, &now).iter().all(|p| p.total_gallons > 0.0));
    }

    #[test]
    fn test_sample_is_deterministic() {
        let catalog = ActivityCatalog::household();
        let now = Utc.with_ymd_and_hms(2024, 10, 14, 12, 0, 0).unwrap();
        assert_eq!(sample_log(&catalog, &now), sample_log(&catalog, &now));
    }
}
