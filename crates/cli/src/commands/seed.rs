//! Seed the backend with a starter catalog.
//!
//! Reads products and ingredients from a JSON file and creates them
//! through the backend API. Existing records are not touched; seeding
//! twice creates duplicates, so this is for fresh environments.

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use tio_pelotte_admin::cms::types::{IngredientInput, ProductInput};

/// Seed file layout.
#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    products: Vec<ProductInput>,
    #[serde(default)]
    ingredients: Vec<IngredientInput>,
}

/// Seed products and ingredients from a JSON file.
///
/// # Errors
///
/// Returns an error if environment variables are missing, the file
/// cannot be read or parsed, or a backend call fails.
pub async fn catalog(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading seed data from file");

    // Read and parse before connecting to the backend
    let content = tokio::fs::read_to_string(path).await?;
    let seed: SeedFile = serde_json::from_str(&content)?;

    info!(
        products = seed.products.len(),
        ingredients = seed.ingredients.len(),
        "Parsed seed file"
    );

    let client = super::client_from_env()?;

    let mut created = 0usize;
    let mut failed = 0usize;

    for product in &seed.products {
        match client.create_product(product).await {
            Ok(id) => {
                info!(slug = %product.slug, id = %id, "Product created");
                created += 1;
            }
            Err(e) => {
                error!(slug = %product.slug, "Failed to create product: {e}");
                failed += 1;
            }
        }
    }

    for ingredient in &seed.ingredients {
        match client.create_ingredient(ingredient).await {
            Ok(id) => {
                info!(name = %ingredient.name, id = %id, "Ingredient created");
                created += 1;
            }
            Err(e) => {
                error!(name = %ingredient.name, "Failed to create ingredient: {e}");
                failed += 1;
            }
        }
    }

    info!("Seeding complete: {created} created, {failed} failed");

    if failed > 0 {
        return Err(format!("{failed} records failed to seed").into());
    }
    Ok(())
}
