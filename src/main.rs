// pantry-tracker - what's in the fridge, what to cook, where to get more
//
// Entry point. Parses CLI args and dispatches to handlers.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pantry_tracker_lib::{
    geo::Coordinate,
    inventory::{RecipeProvider, SampleRecipes},
    locator::{presenter, CatalogPlacesSearch, SimulatedLocationProvider},
    logging, Config, Inventory, StoreLocator,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

// How long to wait on the store search before giving up
const SEARCH_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Parser)]
#[command(name = "pantry-tracker", version, about = "Keep track of your food stock")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show your stock
    Stock,
    /// Find items in your stock by name
    Find {
        query: Vec<String>,
    },
    /// Suggest recipes for an ingredient
    Recipes {
        ingredient: Vec<String>,
    },
    /// Find grocery stores near a location
    Stores {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// JSON catalog of places to search (defaults to places_catalog from config)
        #[arg(long)]
        places: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().context("loading configuration")?;
    logging::init(&config.log_level)?;

    match cli.command {
        Commands::Stock => handle_stock(),
        Commands::Find { query } => handle_find(&query.join(" ")),
        Commands::Recipes { ingredient } => handle_recipes(&ingredient.join(" ")).await,
        Commands::Stores { lat, lon, places } => handle_stores(&config, lat, lon, places).await,
    }
}

fn handle_stock() -> Result<()> {
    let inventory = Inventory::seeded();

    println!("\nYour stock");
    println!("{}", "=".repeat(60));
    for item in inventory.list() {
        let frozen = if item.is_frozen { " (frozen)" } else { "" };
        println!("  {:<20} x{:<4}{}", item.name, item.quantity, frozen);
    }
    println!("{}", "=".repeat(60));

    Ok(())
}

fn handle_find(query: &str) -> Result<()> {
    if query.trim().is_empty() {
        bail!("No search query provided");
    }

    let inventory = Inventory::seeded();
    let results = inventory.find(query);

    if results.is_empty() {
        println!("Nothing in your stock matches '{}'", query);
    } else {
        for item in results {
            println!("  {} x{}", item.name, item.quantity);
        }
    }

    Ok(())
}

async fn handle_recipes(ingredient: &str) -> Result<()> {
    let recipes = SampleRecipes::new()
        .recipes_for(ingredient)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    println!("\nRecipes with {}", ingredient);
    println!("{}", "=".repeat(60));
    for recipe in recipes {
        println!("  {}", recipe.title);
        println!("    {}", recipe.cooking_time_label());
    }
    println!("{}", "=".repeat(60));

    Ok(())
}

async fn handle_stores(config: &Config, lat: f64, lon: f64, places: Option<PathBuf>) -> Result<()> {
    let here = Coordinate::new(lat, lon);
    if !here.is_valid() {
        bail!("{} is not a valid location", here);
    }

    let catalog_path = places
        .or_else(|| config.places_catalog.clone())
        .context("no places catalog given; pass --places <file.json> or set places_catalog in the config")?;
    let catalog = CatalogPlacesSearch::from_json_file(&catalog_path)
        .with_context(|| format!("reading places catalog {}", catalog_path.display()))?;

    let provider = Arc::new(SimulatedLocationProvider::authorized_at(here));
    let locator = StoreLocator::spawn(config.locator.clone(), provider, Arc::new(catalog));

    println!("Finding stores...");
    locator.request_permission();

    let state = tokio::time::timeout(SEARCH_TIMEOUT, locator.wait_for(|s| s.is_settled()))
        .await
        .context("store search timed out")??;

    if let Some(message) = &state.error_message {
        println!("{}", message);
        if presenter::offers_settings_link(message) {
            println!("(Open Settings to change location access)");
        }
    }

    if let Some(banner) = presenter::results_banner(state.stores.len()) {
        println!("\n{}", banner);
        println!("{}", "=".repeat(60));
        for store in presenter::stores_by_distance(&state.stores) {
            println!(
                "  {:<30} {:>8}",
                store.name,
                presenter::distance_label(store.distance_miles)
            );
            println!("    {}", store.address);
        }
        println!("{}", "=".repeat(60));
    }

    locator.shutdown().await;

    Ok(())
}
