//! Circular progress ring geometry

use std::f64::consts::PI;

use serde::Serialize;

/// Upper clamp for ring percentages; 100..=120 is the overage zone
pub const MAX_PERCENTAGE: f64 = 120.0;

/// Percentage at which the daily budget is exactly used up
pub const BUDGET_PERCENTAGE: f64 = 100.0;

/// Ring radius used by the dashboard
pub const DEFAULT_RING_RADIUS: f64 = 60.0;

/// Stroke color class for a progress ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorKind {
    /// Within budget (0..=100%)
    Normal,
    /// Over budget (>100%)
    Overage,
}

impl ColorKind {
    /// Stroke color for the ring
    pub fn hex(&self) -> &'static str {
        match self {
            ColorKind::Normal => "#3b82f6",
            ColorKind::Overage => "#ef4444",
        }
    }
}

/// Stroke parameters for a fixed-radius progress ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcGeometry {
    pub clamped_percentage: f64,
    pub color_kind: ColorKind,
    pub circumference: f64,
    pub dash_offset: f64,
}

impl ArcGeometry {
    /// Map a percentage to ring geometry.
    ///
    /// Total over all inputs: the percentage is clamped to `[0, 120]` with
    /// `NaN` treated as 0. The arc is scaled against 120, so a fully used
    /// budget covers 100/120 of the ring.
    pub fn compute(percentage: f64, radius: f64) -> Self {
        let clamped_percentage = clamp_percentage(percentage);
        let circumference = 2.0 * PI * radius;
        let dash_offset = circumference - (clamped_percentage / MAX_PERCENTAGE) * circumference;

        let color_kind = if clamped_percentage > BUDGET_PERCENTAGE {
            ColorKind::Overage
        } else {
            ColorKind::Normal
        };

        Self {
            clamped_percentage,
            color_kind,
            circumference,
            dash_offset,
        }
    }

    /// Center label, e.g. "83%"
    pub fn label(&self) -> String {
        format!("{}%", self.clamped_percentage.round() as i64)
    }
}

fn clamp_percentage(percentage: f64) -> f64 {
    if percentage.is_nan() {
        return 0.0;
    }
    percentage.clamp(0.0, MAX_PERCENTAGE)
}

/// Share of the budget consumed, as a percentage.
///
/// A budget that is zero, negative or not finite yields 0 instead of `NaN`
/// or infinity.
pub fn usage_percentage(used_gallons: f64, budget_gallons: f64) -> f64 {
    if !budget_gallons.is_finite() || budget_gallons <= 0.0 {
        return 0.0;
    }
    used_gallons / budget_gallons * 100.0
}
