/// Data models for the food stock
///
/// Plain structs; nothing here is persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A food item in the user's stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,
    pub icon: String, // symbol name, e.g. "leaf"
    pub quantity: u32,
    pub is_frozen: bool,
    pub expiration_date: Option<NaiveDate>,
}

impl FoodItem {
    /// Build a new item with a fresh id
    pub fn new(input: NewFoodItem) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            icon: input.icon,
            quantity: input.quantity,
            is_frozen: input.is_frozen,
            expiration_date: input.expiration_date,
        }
    }

    /// Whether the item has expired as of `today`.
    /// Items without a date never expire.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiration_date.map_or(false, |date| date < today)
    }

    /// Days left until expiration (negative once past it)
    pub fn days_until_expiration(&self, today: NaiveDate) -> Option<i64> {
        self.expiration_date
            .map(|date| date.signed_duration_since(today).num_days())
    }
}

/// Input for adding a food item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFoodItem {
    pub name: String,
    pub icon: String,
    pub quantity: u32,
    pub is_frozen: bool,
    pub expiration_date: Option<NaiveDate>,
}

impl NewFoodItem {
    pub fn new(name: impl Into<String>, icon: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            quantity,
            is_frozen: false,
            expiration_date: None,
        }
    }

    pub fn frozen(mut self) -> Self {
        self.is_frozen = true;
        self
    }

    pub fn expires_on(mut self, date: NaiveDate) -> Self {
        self.expiration_date = Some(date);
        self
    }
}

/// A suggested recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub cooking_time: u32, // minutes
}

impl Recipe {
    pub fn new(title: impl Into<String>, cooking_time: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            cooking_time,
        }
    }

    /// "Cooking time: 30 minutes"
    pub fn cooking_time_label(&self) -> String {
        format!("Cooking time: {} minutes", self.cooking_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_item_gets_unique_id() {
        let a = FoodItem::new(NewFoodItem::new("Eggs", "egg", 6));
        let b = FoodItem::new(NewFoodItem::new("Eggs", "egg", 6));

        assert_ne!(a.id, b.id);
        assert_eq!(a.quantity, 6);
        assert!(!a.is_frozen);
    }

    #[test]
    fn test_expiration() {
        let item = FoodItem::new(NewFoodItem::new("Basil", "leaf", 1).expires_on(date(2025, 3, 1)));

        assert!(!item.is_expired(date(2025, 3, 1)));
        assert!(item.is_expired(date(2025, 3, 2)));
        assert_eq!(item.days_until_expiration(date(2025, 2, 26)), Some(3));
        assert_eq!(item.days_until_expiration(date(2025, 3, 3)), Some(-2));
    }

    #[test]
    fn test_no_expiration_date() {
        let item = FoodItem::new(NewFoodItem::new("Salt", "circle.fill", 1));

        assert!(!item.is_expired(date(2099, 1, 1)));
        assert_eq!(item.days_until_expiration(date(2025, 1, 1)), None);
    }

    #[test]
    fn test_recipe_label() {
        let recipe = Recipe::new("Sample Recipe 1", 30);
        assert_eq!(recipe.cooking_time_label(), "Cooking time: 30 minutes");
    }
}
