//! Data models for water usage tracking

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::water::progress::ArcGeometry;

/// Stable identifier of an activity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(u32);

impl ActivityId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ActivityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A catalog entry describing one kind of water use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityKind {
    pub id: ActivityId,
    pub name: String,
    pub unit_gallons: f64,
}

impl ActivityKind {
    pub fn new(id: u32, name: impl Into<String>, unit_gallons: f64) -> Self {
        Self {
            id: ActivityId::new(id),
            name: name.into(),
            unit_gallons,
        }
    }
}

/// One logged occurrence of an activity.
///
/// `gallons` is copied from the catalog when the event is logged, so later
/// catalog changes never rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEvent {
    pub activity_id: ActivityId,
    pub gallons: f64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub occurred_at: DateTime<Utc>,
}

/// Same-day aggregate for one activity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAggregate {
    pub activity_id: ActivityId,
    pub name: String,
    /// Per-event amount
    pub gallons: f64,
    pub count: u32,
    /// Exact sum of the grouped events
    pub total_gallons: f64,
}

/// Total usage on one calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySeriesPoint {
    pub date: NaiveDate,
    pub total_gallons: f64,
}

/// Today's progress against the budget
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySummary {
    pub date: NaiveDate,
    pub used_gallons: f64,
    pub budget_gallons: f64,
    pub percentage: f64,
    pub remaining_gallons: f64,
    pub ring: ArcGeometry,
    pub activities: Vec<DailyAggregate>,
}

/// One ring of the rolling week view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekDayProgress {
    pub date: NaiveDate,
    pub day_label: String,
    pub total_gallons: f64,
    pub percentage: f64,
    pub ring: ArcGeometry,
}

/// Everything the dashboard renders
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub today: TodaySummary,
    pub week: Vec<WeekDayProgress>,
}

/// A single drill-down line
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    pub activity_id: ActivityId,
    pub name: String,
    pub time_label: String,
    pub gallons: f64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub occurred_at: DateTime<Utc>,
}

/// Drill-down for one calendar day
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayDetail {
    pub date: NaiveDate,
    pub title: String,
    pub total_gallons: f64,
    pub entries: Vec<DayEntry>,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_daily_budget")]
    pub daily_budget_gallons: f64,
    #[serde(default = "default_ring_radius")]
    pub ring_radius: f64,
    #[serde(default = "default_rolling_days")]
    pub rolling_days: usize,
    /// Fixed UTC offset for day boundaries; system local time when absent
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
    /// Catalog override; the built-in household catalog when absent
    #[serde(default)]
    pub activities: Option<Vec<ActivityKind>>,
}

fn default_daily_budget() -> f64 {
    80.0
}

fn default_ring_radius() -> f64 {
    crate::water::progress::DEFAULT_RING_RADIUS
}

fn default_rolling_days() -> usize {
    7
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            daily_budget_gallons: default_daily_budget(),
            ring_radius: default_ring_radius(),
            rolling_days: default_rolling_days(),
            utc_offset_minutes: None,
            activities: None,
        }
    }
}
