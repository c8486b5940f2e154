//! Water usage tracking - event log, aggregation and progress rings

pub mod catalog;
pub mod config;
pub mod day;
pub mod event_log;
pub mod models;
pub mod progress;
pub mod sample;
pub mod stats;

pub use catalog::*;
pub use config::*;
pub use day::*;
pub use event_log::*;
pub use models::*;
pub use progress::*;
pub use sample::*;
pub use stats::*;
