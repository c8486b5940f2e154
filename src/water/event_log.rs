//! Append/remove event log, the source of truth for all statistics

use chrono::{DateTime, TimeZone, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::water::day::is_same_day;
use crate::water::models::{ActivityId, ActivityKind, UsageEvent};

/// Usage events in append order.
///
/// Bulk-loaded events may be out of time order; consumers that care about
/// chronology sort their own view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<UsageEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing list of events as-is
    pub fn from_events(events: Vec<UsageEvent>) -> Self {
        Self { events }
    }

    /// Append an event. Never fails; ids are trusted.
    pub fn append(
        &mut self,
        activity_id: ActivityId,
        gallons: f64,
        occurred_at: DateTime<Utc>,
    ) -> UsageEvent {
        let event = UsageEvent {
            activity_id,
            gallons,
            occurred_at,
        };
        debug!(
            "Logged activity {} ({} gal) at {}",
            activity_id,
            gallons,
            occurred_at.to_rfc3339()
        );
        self.events.push(event.clone());
        event
    }

    /// Append an event stamped with the current instant
    pub fn append_now(&mut self, activity_id: ActivityId, gallons: f64) -> UsageEvent {
        self.append(activity_id, gallons, Utc::now())
    }

    /// Append an occurrence of `activity`, copying its unit amount
    pub fn record(&mut self, activity: &ActivityKind, occurred_at: DateTime<Utc>) -> UsageEvent {
        self.append(activity.id, activity.unit_gallons, occurred_at)
    }

    /// Remove the most recently added event for `activity_id` that falls on
    /// the calendar day of `reference_day`.
    ///
    /// Returns whether anything was removed; a miss leaves the log untouched.
    pub fn remove_latest_on_day<Tz: TimeZone>(
        &mut self,
        activity_id: ActivityId,
        reference_day: &DateTime<Tz>,
    ) -> bool {
        let position = self.events.iter().rposition(|event| {
            event.activity_id == activity_id && is_same_day(&event.occurred_at, reference_day)
        });

        match position {
            Some(index) => {
                let removed = self.events.remove(index);
                debug!(
                    "Removed activity {} logged at {}",
                    removed.activity_id,
                    removed.occurred_at.to_rfc3339()
                );
                true
            }
            None => {
                debug!(
                    "No entry for activity {} on {} to remove",
                    activity_id,
                    reference_day.date_naive()
                );
                false
            }
        }
    }

    /// Stable sort by `occurred_at`
    pub fn sort_chronologically(&mut self) {
        self.events.sort_by_key(|event| event.occurred_at);
    }

    pub fn events(&self) -> &[UsageEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UsageEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FromIterator<UsageEvent> for EventLog {
    fn from_iter<I: IntoIterator<Item = UsageEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a UsageEvent;
    type IntoIter = std::slice::Iter<'a, UsageEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
