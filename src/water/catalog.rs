//! Static activity catalog

use std::collections::HashSet;

use serde::Serialize;

use crate::water::models::{ActivityId, ActivityKind};

/// Number of activities offered as one-tap log buttons
pub const QUICK_ACTIVITY_COUNT: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog has no activities")]
    Empty,
    #[error("Duplicate activity id: {0}")]
    DuplicateId(ActivityId),
    #[error("Activity {id} has invalid unit amount: {gallons}")]
    InvalidUnit { id: ActivityId, gallons: f64 },
}

/// Ordered, immutable list of activity kinds
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ActivityCatalog {
    activities: Vec<ActivityKind>,
}

impl Default for ActivityCatalog {
    fn default() -> Self {
        Self::household()
    }
}

impl ActivityCatalog {
    /// Build a catalog, rejecting duplicate ids and non-positive amounts
    pub fn new(activities: Vec<ActivityKind>) -> Result<Self, CatalogError> {
        if activities.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for activity in &activities {
            if !seen.insert(activity.id) {
                return Err(CatalogError::DuplicateId(activity.id));
            }
            if !activity.unit_gallons.is_finite() || activity.unit_gallons <= 0.0 {
                return Err(CatalogError::InvalidUnit {
                    id: activity.id,
                    gallons: activity.unit_gallons,
                });
            }
        }

        Ok(Self { activities })
    }

    /// Built-in household activities with typical gallon amounts
    pub fn household() -> Self {
        Self {
            activities: vec![
                ActivityKind::new(1, "5 Minute Shower", 15.0),
                ActivityKind::new(2, "10 Minute Shower", 30.0),
                ActivityKind::new(3, "Toilet Flush", 3.0),
                ActivityKind::new(4, "Dishwasher Load", 5.0),
                ActivityKind::new(5, "Laundry Load", 23.0),
                ActivityKind::new(6, "Hand Wash Dishes", 4.0),
                ActivityKind::new(7, "Garden Watering", 12.0),
                ActivityKind::new(8, "Brush Teeth", 1.0),
                ActivityKind::new(9, "Shave", 2.0),
                ActivityKind::new(10, "Take a Bath", 45.0),
            ],
        }
    }

    pub fn get(&self, id: ActivityId) -> Option<&ActivityKind> {
        self.activities.iter().find(|a| a.id == id)
    }

    /// Display name for an id, falling back to a generic label
    pub fn name_of(&self, id: ActivityId) -> String {
        match self.get(id) {
            Some(activity) => activity.name.clone(),
            None => {
                log::warn!("Activity {} is not in the catalog", id);
                format!("Activity {}", id)
            }
        }
    }

    pub fn activities(&self) -> &[ActivityKind] {
        &self.activities
    }

    /// Activities shown as one-tap buttons
    pub fn quick(&self) -> &[ActivityKind] {
        let split = QUICK_ACTIVITY_COUNT.min(self.activities.len());
        &self.activities[..split]
    }

    /// Activities offered in the "more activities" picker
    pub fn more(&self) -> &[ActivityKind] {
        let split = QUICK_ACTIVITY_COUNT.min(self.activities.len());
        &self.activities[split..]
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_household_catalog() {
        let catalog = ActivityCatalog::household();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.get(ActivityId::new(3)).unwrap().name, "Toilet Flush");
        assert_eq!(catalog.get(ActivityId::new(10)).unwrap().unit_gallons, 45.0);
        assert!(catalog.get(ActivityId::new(11)).is_none());
    }

    #[test]
    fn test_quick_and_more_split() {
        let catalog = ActivityCatalog::household();
        assert_eq!(catalog.quick().len(), 4);
        assert_eq!(catalog.more().len(), 6);
        assert_eq!(catalog.more()[0].name, "Laundry Load");

        let small = ActivityCatalog::new(vec![ActivityKind::new(1, "Shave", 2.0)]).unwrap();
        assert_eq!(small.quick().len(), 1);
        assert!(small.more().is_empty());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = ActivityCatalog::new(vec![
            ActivityKind::new(1, "Shower", 15.0),
            ActivityKind::new(1, "Bath", 45.0),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == ActivityId::new(1)));
    }

    #[test]
    fn test_rejects_bad_units() {
        for gallons in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = ActivityCatalog::new(vec![ActivityKind::new(1, "Leak", gallons)]);
            assert!(matches!(result, Err(CatalogError::InvalidUnit { .. })));
        }
        assert!(matches!(ActivityCatalog::new(vec![]), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_name_of_unknown() {
        let catalog = ActivityCatalog::household();
        assert_eq!(catalog.name_of(ActivityId::new(1)), "5 Minute Shower");
        assert_eq!(catalog.name_of(ActivityId::new(99)), "Activity 99");
    }
}
