/// Recipe suggestions
///
/// There's no real recipe API yet, so SampleRecipes hands back the same two
/// placeholders for anything you ask about.

use crate::error::{PantryError, Result};
use crate::inventory::models::Recipe;
use async_trait::async_trait;
use tracing::debug;

/// Source of recipes for an ingredient
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Recipes that use `ingredient`
    async fn recipes_for(&self, ingredient: &str) -> Result<Vec<Recipe>>;
}

/// Placeholder provider with fixed sample data
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleRecipes;

impl SampleRecipes {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RecipeProvider for SampleRecipes {
    async fn recipes_for(&self, ingredient: &str) -> Result<Vec<Recipe>> {
        let ingredient = ingredient.trim();
        if ingredient.is_empty() {
            return Err(PantryError::InvalidIngredient(ingredient.to_string()));
        }

        debug!(ingredient, "serving sample recipes");

        Ok(vec![
            Recipe::new("Sample Recipe 1", 30),
            Recipe::new("Sample Recipe 2", 45),
        ])
    }
}
