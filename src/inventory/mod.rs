/// Inventory module
///
/// The food stock the user keeps track of, and the recipes suggested for
/// what's in it. Everything here lives in memory for the life of the
/// process.

pub mod models;
pub mod recipes;
pub mod store;

pub use models::{FoodItem, NewFoodItem, Recipe};
pub use recipes::{RecipeProvider, SampleRecipes};
pub use store::Inventory;

/// Largest quantity a single item can hold
pub const MAX_QUANTITY: u32 = 100;
