//! Print the dashboard for a week of sample data
//!
//! Run with: cargo run --bin daily_report [config-dir]

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

use water_usage_tracker_lib::commands::{get_dashboard, get_day_details};
use water_usage_tracker_lib::water::sample_log;
use water_usage_tracker_lib::AppState;

fn main() {
    let custom_dir = std::env::args().nth(1);

    let mut state = match AppState::from_config_dir(custom_dir.as_deref()) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let now = Utc::now();
    match state.config.fixed_offset() {
        Some(offset) => report(&mut state, &now.with_timezone(&offset)),
        None => report(&mut state, &now.with_timezone(&Local)),
    }
}

fn report<Tz>(state: &mut AppState, now: &DateTime<Tz>)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    state.log = sample_log(&state.catalog, now);
    let data = get_dashboard(state, now);

    println!("=== Today ({}) ===", data.today.date);
    println!(
        "Used: {} / {} gallons ({}, {})",
        data.today.used_gallons,
        data.today.budget_gallons,
        data.today.ring.label(),
        data.today.ring.color_kind.hex()
    );
    if data.today.activities.is_empty() {
        println!("No activities logged yet.");
    }
    for activity in &data.today.activities {
        let times = if activity.count > 1 {
            format!(" x{}", activity.count)
        } else {
            String::new()
        };
        println!("  {}{}: {} gallons", activity.name, times, activity.total_gallons);
    }

    println!("");
    println!("=== Past {} Days ===", data.week.len());
    for day in &data.week {
        println!(
            "  {} {}: {:>5} gal  {:>4}  offset {:.1}/{:.1}",
            day.day_label,
            day.date,
            day.total_gallons,
            day.ring.label(),
            day.ring.dash_offset,
            day.ring.circumference
        );
    }

    if let Some(busiest) = data
        .week
        .iter()
        .max_by(|a, b| a.total_gallons.total_cmp(&b.total_gallons))
    {
        let detail = get_day_details(state, busiest.date, &now.timezone());
        println!("");
        println!("=== {} ===", detail.title);
        for entry in &detail.entries {
            println!("  {:>8}  {:<18} {} gal", entry.time_label, entry.name, entry.gallons);
        }
    }
}
