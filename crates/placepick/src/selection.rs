use crate::place::{PlaceId, PlaceName, Restaurant};
use thiserror::Error;

/// Most sectors the wheel will carry.
pub const MAX_SELECTED: usize = 10;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error("You can only select up to 10 restaurants for the wheel.")]
    CapReached,
    #[error("No restaurant with id {0} in the current results")]
    UnknownPlace(PlaceId),
}

/// Search results plus the ordered subset placed on the wheel.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    restaurants: Vec<Restaurant>,
    selected: Vec<PlaceId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces everything with a fresh ranking. Records already flagged
    /// `selected` are taken in order, up to the cap.
    pub fn replace(&mut self, restaurants: Vec<Restaurant>) {
        self.restaurants = restaurants;
        self.selected.clear();

        for restaurant in &mut self.restaurants {
            if restaurant.selected && self.selected.len() < MAX_SELECTED {
                self.selected.push(restaurant.id);
            } else {
                restaurant.selected = false;
            }
        }
    }

    pub fn clear(&mut self) {
        self.restaurants.clear();
        self.selected.clear();
    }

    pub fn toggle(&mut self, id: PlaceId, checked: bool) -> Result<(), SelectionError> {
        let full = self.selected.len() >= MAX_SELECTED;
        let restaurant = self
            .restaurants
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(SelectionError::UnknownPlace(id))?;

        match (checked, restaurant.selected) {
            (true, true) | (false, false) => Ok(()),
            (true, false) if full => Err(SelectionError::CapReached),
            (true, false) => {
                restaurant.selected = true;
                self.selected.push(id);
                Ok(())
            }
            (false, true) => {
                restaurant.selected = false;
                self.selected.retain(|s| *s != id);
                Ok(())
            }
        }
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn get(&self, id: PlaceId) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.id == id)
    }

    /// Selected records in the order they joined the wheel.
    pub fn selected(&self) -> Vec<&Restaurant> {
        self.selected.iter().filter_map(|id| self.get(*id)).collect()
    }

    pub fn selected_at(&self, index: usize) -> Option<&Restaurant> {
        self.selected.get(index).and_then(|id| self.get(*id))
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    pub fn can_spin(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn labels(&self) -> Vec<PlaceName> {
        self.selected().into_iter().map(|r| r.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::Place;

    fn results(count: u32, preselected: u32) -> Vec<Restaurant> {
        (0..count)
            .map(|i| {
                let mut r = Restaurant::from_place(
                    PlaceId::from(i),
                    Place {
                        name: PlaceName::new(format!("Place {i}")),
                        ..Place::default()
                    },
                );
                r.selected = i < preselected;
                r
            })
            .collect()
    }

    #[test]
    fn test_replace_takes_preselected() {
        let mut selection = Selection::new();
        selection.replace(results(12, 10));
        assert_eq!(selection.selected_count(), 10);
        assert_eq!(selection.restaurants().len(), 12);
        assert!(selection.can_spin());
    }

    #[test]
    fn test_replace_enforces_cap() {
        let mut selection = Selection::new();
        selection.replace(results(12, 12));
        assert_eq!(selection.selected_count(), MAX_SELECTED);
        assert!(!selection.restaurants()[11].selected);
    }

    #[test]
    fn test_eleventh_selection_rejected() {
        let mut selection = Selection::new();
        selection.replace(results(12, 10));

        let outcome = selection.toggle(PlaceId::from(10), true);
        assert_eq!(outcome, Err(SelectionError::CapReached));
        assert_eq!(selection.selected_count(), 10);
        assert!(!selection.get(PlaceId::from(10)).unwrap().selected);
    }

    #[test]
    fn test_unselect_then_select_appends() {
        let mut selection = Selection::new();
        selection.replace(results(12, 10));

        selection.toggle(PlaceId::from(2), false).unwrap();
        assert_eq!(selection.selected_count(), 9);
        selection.toggle(PlaceId::from(11), true).unwrap();

        let labels = selection.labels();
        assert_eq!(labels.len(), 10);
        assert_eq!(labels.last().unwrap().as_str(), "Place 11");
        assert!(!labels.iter().any(|l| l.as_str() == "Place 2"));
    }

    #[test]
    fn test_duplicate_names_are_distinct() {
        let mut restaurants = results(3, 3);
        for r in &mut restaurants {
            r.name = PlaceName::from("Same Name");
        }
        let mut selection = Selection::new();
        selection.replace(restaurants);

        selection.toggle(PlaceId::from(1), false).unwrap();
        assert_eq!(selection.selected_count(), 2);
        assert!(selection.get(PlaceId::from(0)).unwrap().selected);
        assert!(selection.get(PlaceId::from(2)).unwrap().selected);
    }

    #[test]
    fn test_unknown_id() {
        let mut selection = Selection::new();
        assert_eq!(
            selection.toggle(PlaceId::from(4), true),
            Err(SelectionError::UnknownPlace(PlaceId::from(4)))
        );
    }

    #[test]
    fn test_clear_disables_spin() {
        let mut selection = Selection::new();
        selection.replace(results(5, 5));
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.selected_count(), 0);
        assert!(!selection.can_spin());
        assert!(selection.labels().is_empty());
    }
}
