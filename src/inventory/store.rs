/// In-memory food stock
///
/// Starts from a fixed seed list every launch. Edits happen in place and are
/// gone when the process exits.

use crate::error::{PantryError, Result};
use crate::inventory::models::{FoodItem, NewFoodItem};
use crate::inventory::MAX_QUANTITY;
use chrono::NaiveDate;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use tracing::debug;
use uuid::Uuid;

// (name, icon, quantity, frozen)
const SEED_ITEMS: &[(&str, &str, u32, bool)] = &[
    ("Eggs", "egg", 6, false),
    ("Chicken", "bird", 1, true),
    ("Bread", "birthday.cake", 1, false),
    ("Parmesan cheese", "circle", 1, false),
    ("Tomato sauce", "drop.fill", 1, false),
    ("Basil", "leaf", 1, false),
    ("Salt", "circle.fill", 1, false),
    ("Pepper", "circle.dotted", 1, false),
    ("Oil", "drop", 1, false),
    ("Spaghetti", "line.3.horizontal", 1, false),
    ("Garlic", "circle.circle", 1, false),
];

/// The user's stock, in insertion order
#[derive(Debug, Default)]
pub struct Inventory {
    items: Vec<FoodItem>,
}

impl Inventory {
    /// Empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Inventory with the launch seed list
    pub fn seeded() -> Self {
        let items = SEED_ITEMS
            .iter()
            .map(|&(name, icon, quantity, frozen)| {
                let mut input = NewFoodItem::new(name, icon, quantity);
                input.is_frozen = frozen;
                FoodItem::new(input)
            })
            .collect();

        Self { items }
    }

    pub fn list(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&FoodItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Add an item, returning its new id
    pub fn add(&mut self, input: NewFoodItem) -> Result<Uuid> {
        if input.quantity > MAX_QUANTITY {
            return Err(PantryError::InvalidQuantity(input.quantity));
        }

        let item = FoodItem::new(input);
        let id = item.id;
        debug!(%id, name = %item.name, "added food item");
        self.items.push(item);

        Ok(id)
    }

    /// Remove an item and hand it back
    pub fn remove(&mut self, id: Uuid) -> Result<FoodItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(PantryError::ItemNotFound(id))?;

        let item = self.items.remove(index);
        debug!(%id, name = %item.name, "removed food item");
        Ok(item)
    }

    /// Set an exact quantity
    pub fn set_quantity(&mut self, id: Uuid, quantity: u32) -> Result<()> {
        if quantity > MAX_QUANTITY {
            return Err(PantryError::InvalidQuantity(quantity));
        }

        self.item_mut(id)?.quantity = quantity;
        Ok(())
    }

    /// Bump the quantity by one, stopping at the max. Returns the new value.
    pub fn increment(&mut self, id: Uuid) -> Result<u32> {
        let item = self.item_mut(id)?;
        item.quantity = (item.quantity + 1).min(MAX_QUANTITY);
        Ok(item.quantity)
    }

    /// Drop the quantity by one, stopping at zero. Returns the new value.
    pub fn decrement(&mut self, id: Uuid) -> Result<u32> {
        let item = self.item_mut(id)?;
        item.quantity = item.quantity.saturating_sub(1);
        Ok(item.quantity)
    }

    pub fn set_frozen(&mut self, id: Uuid, frozen: bool) -> Result<()> {
        self.item_mut(id)?.is_frozen = frozen;
        Ok(())
    }

    pub fn set_expiration(&mut self, id: Uuid, date: Option<NaiveDate>) -> Result<()> {
        self.item_mut(id)?.expiration_date = date;
        Ok(())
    }

    /// Fuzzy search by name, best match first
    pub fn find(&self, query: &str) -> Vec<&FoodItem> {
        let matcher = SkimMatcherV2::default().ignore_case();

        let mut scored: Vec<(i64, &FoodItem)> = self
            .items
            .iter()
            .filter_map(|item| {
                matcher
                    .fuzzy_match(&item.name, query)
                    .map(|score| (score, item))
            })
            .collect();

        // Stable sort keeps insertion order for ties
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored.into_iter().map(|(_, item)| item).collect()
    }

    /// Items that expire within `days` of `today`, soonest first.
    /// Already-expired items are included.
    pub fn expiring_within(&self, today: NaiveDate, days: i64) -> Vec<&FoodItem> {
        let mut expiring: Vec<&FoodItem> = self
            .items
            .iter()
            .filter(|item| {
                item.days_until_expiration(today)
                    .map_or(false, |left| left <= days)
            })
            .collect();

        expiring.sort_by_key(|item| item.expiration_date);
        expiring
    }

    fn item_mut(&mut self, id: Uuid) -> Result<&mut FoodItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(PantryError::ItemNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn id_of(inventory: &Inventory, name: &str) -> Uuid {
        inventory
            .list()
            .iter()
            .find(|item| item.name == name)
            .map(|item| item.id)
            .unwrap()
    }

    #[test]
    fn test_seeded() {
        let inventory = Inventory::seeded();

        assert_eq!(inventory.len(), 11);
        assert_eq!(inventory.list()[0].name, "Eggs");
        assert_eq!(inventory.list()[0].quantity, 6);

        let chicken = inventory.get(id_of(&inventory, "Chicken")).unwrap();
        assert!(chicken.is_frozen);
        assert_eq!(chicken.icon, "bird");
    }

    #[test]
    fn test_add_and_remove() {
        let mut inventory = Inventory::new();
        let id = inventory.add(NewFoodItem::new("Milk", "cup", 2)).unwrap();

        assert_eq!(inventory.len(), 1);

        let removed = inventory.remove(id).unwrap();
        assert_eq!(removed.name, "Milk");
        assert!(inventory.is_empty());

        match inventory.remove(id) {
            Err(PantryError::ItemNotFound(missing)) => assert_eq!(missing, id),
            _ => panic!("Expected ItemNotFound error"),
        }
    }

    #[test]
    fn test_add_rejects_huge_quantity() {
        let mut inventory = Inventory::new();
        let result = inventory.add(NewFoodItem::new("Rice", "circle", 101));

        assert!(matches!(result, Err(PantryError::InvalidQuantity(101))));
    }

    #[test]
    fn test_quantity_bounds() {
        let mut inventory = Inventory::seeded();
        let salt = id_of(&inventory, "Salt");

        assert_eq!(inventory.decrement(salt).unwrap(), 0);
        assert_eq!(inventory.decrement(salt).unwrap(), 0);

        inventory.set_quantity(salt, MAX_QUANTITY).unwrap();
        assert_eq!(inventory.increment(salt).unwrap(), MAX_QUANTITY);

        assert!(inventory.set_quantity(salt, MAX_QUANTITY + 1).is_err());
        assert_eq!(inventory.get(salt).unwrap().quantity, MAX_QUANTITY);
    }

    #[test]
    fn test_set_frozen_and_expiration() {
        let mut inventory = Inventory::seeded();
        let bread = id_of(&inventory, "Bread");

        inventory.set_frozen(bread, true).unwrap();
        inventory.set_expiration(bread, Some(date(2025, 2, 20))).unwrap();

        let item = inventory.get(bread).unwrap();
        assert!(item.is_frozen);
        assert_eq!(item.expiration_date, Some(date(2025, 2, 20)));

        inventory.set_expiration(bread, None).unwrap();
        assert_eq!(inventory.get(bread).unwrap().expiration_date, None);
    }

    #[test]
    fn test_unknown_id() {
        let mut inventory = Inventory::seeded();
        let ghost = Uuid::new_v4();

        assert!(inventory.increment(ghost).is_err());
        assert!(inventory.set_frozen(ghost, true).is_err());
        assert!(inventory.get(ghost).is_none());
    }

    #[test]
    fn test_find() {
        let inventory = Inventory::seeded();

        let results = inventory.find("parm");
        assert!(!results.is_empty());
        assert_eq!(results[0].name, "Parmesan cheese");

        let results = inventory.find("spagheti");
        assert!(results.iter().any(|item| item.name == "Spaghetti"));

        assert!(inventory.find("zzzz").is_empty());
    }

    #[test]
    fn test_expiring_within() {
        let mut inventory = Inventory::seeded();
        let today = date(2025, 2, 13);

        inventory
            .set_expiration(id_of(&inventory, "Basil"), Some(date(2025, 2, 16)))
            .unwrap();
        inventory
            .set_expiration(id_of(&inventory, "Eggs"), Some(date(2025, 2, 14)))
            .unwrap();
        inventory
            .set_expiration(id_of(&inventory, "Oil"), Some(date(2026, 1, 1)))
            .unwrap();

        let expiring = inventory.expiring_within(today, 3);
        let names: Vec<&str> = expiring.iter().map(|item| item.name.as_str()).collect();

        assert_eq!(names, vec!["Eggs", "Basil"]);
    }
}
