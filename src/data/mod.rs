//! Core data models for Bandeco
//!
//! This module contains the menu types shared by the fetcher, the cache and the
//! presentation layer, plus the restaurant catalog and the remote menu client.

pub mod menu;
pub mod restaurants;

pub use menu::{parse_menu, MenuError, MenuSource, UspMenuClient};
pub use restaurants::{all_restaurants, resolve_restaurant, restaurant_name, RestaurantId};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A meal served by the restaurants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    Lunch,
    Dinner,
}

impl Meal {
    /// Maps the remote single-character meal code to a meal
    ///
    /// `"A"` (almoço) is lunch and `"J"` (jantar) is dinner. Any other code is `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(Meal::Lunch),
            "J" => Some(Meal::Dinner),
            _ => None,
        }
    }

    /// Lowercase name used in entry keys and JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            Meal::Lunch => "lunch",
            Meal::Dinner => "dinner",
        }
    }

    /// Capitalized name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            Meal::Lunch => "Lunch",
            Meal::Dinner => "Dinner",
        }
    }
}

/// One meal's menu on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Menu text, one dish per line
    pub menu: String,
    /// Calorie count in Kcal
    pub calories: u64,
}

/// All lunch/dinner entries for one restaurant for one week
///
/// Entries are keyed by `"<dd/mm/yyyy>-<meal>"`. A set is always a whole week as
/// reported by the remote source, never a single day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuEntrySet {
    entries: BTreeMap<String, MenuEntry>,
}

/// Builds the composite key for a date and a meal
pub fn entry_key(date_text: &str, meal: Meal) -> String {
    format!("{}-{}", date_text, meal.as_str())
}

impl MenuEntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any previous entry for the same slot
    pub fn insert(&mut self, date_text: &str, meal: Meal, entry: MenuEntry) {
        self.entries.insert(entry_key(date_text, meal), entry);
    }

    /// Looks up the entry for a `dd/mm/yyyy` date and a meal
    pub fn get(&self, date_text: &str, meal: Meal) -> Option<&MenuEntry> {
        self.entries.get(&entry_key(date_text, meal))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(menu: &str, calories: u64) -> MenuEntry {
        MenuEntry {
            menu: menu.to_string(),
            calories,
        }
    }

    #[test]
    fn test_meal_from_code() {
        assert_eq!(Meal::from_code("A"), Some(Meal::Lunch));
        assert_eq!(Meal::from_code("J"), Some(Meal::Dinner));
        assert_eq!(Meal::from_code("a"), None);
        assert_eq!(Meal::from_code("X"), None);
        assert_eq!(Meal::from_code(""), None);
    }

    #[test]
    fn test_entry_key_format() {
        assert_eq!(entry_key("16/10/2026", Meal::Lunch), "16/10/2026-lunch");
        assert_eq!(entry_key("16/10/2026", Meal::Dinner), "16/10/2026-dinner");
    }

    #[test]
    fn test_insert_and_get() {
        let mut set = MenuEntrySet::new();
        set.insert("16/10/2026", Meal::Lunch, entry("Arroz\nFeijão", 1200));

        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get("16/10/2026", Meal::Lunch),
            Some(&entry("Arroz\nFeijão", 1200))
        );
        assert!(set.get("16/10/2026", Meal::Dinner).is_none());
    }

    #[test]
    fn test_insert_same_slot_last_write_wins() {
        let mut set = MenuEntrySet::new();
        set.insert("16/10/2026", Meal::Dinner, entry("first", 1));
        set.insert("16/10/2026", Meal::Dinner, entry("second", 2));

        assert_eq!(set.len(), 1);
        assert_eq!(set.get("16/10/2026", Meal::Dinner).unwrap().menu, "second");
    }

    #[test]
    fn test_entry_set_serializes_as_flat_map() {
        let mut set = MenuEntrySet::new();
        set.insert("16/10/2026", Meal::Lunch, entry("Arroz", 900));

        let json = serde_json::to_string(&set).expect("Failed to serialize");
        assert_eq!(json, r#"{"16/10/2026-lunch":{"menu":"Arroz","calories":900}}"#);
    }
}
