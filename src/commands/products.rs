//! Catalog listing commands

use anyhow::Result;
use themeswitch::catalog::{truncate_chars, Product};
use themeswitch::Config;
use tracing::debug;

/// List products
pub fn run_products(limit: Option<u32>) -> Result<()> {
    let config = Config::load()?;
    let client = config.api.client();
    let limit = limit.or(config.catalog.limit());
    debug!("Listing products from {} (limit {limit:?})", client.base_url());

    println!("Fetching products from {}...\n", client.base_url());
    let products = client.fetch_products(limit)?;

    if products.is_empty() {
        println!("No products found.");
        return Ok(());
    }

    for product in &products {
        println!("{}", product_row(product));
    }

    println!("\nTotal: {} products", products.len());
    Ok(())
}

/// Show a single product
pub fn run_product(id: u64) -> Result<()> {
    let config = Config::load()?;
    let client = config.api.client();

    let product = client.fetch_product(id)?;
    println!("{}", product_details(&product));
    Ok(())
}

/// List categories
pub fn run_categories() -> Result<()> {
    let config = Config::load()?;
    let client = config.api.client();

    let categories = client.fetch_categories()?;
    if categories.is_empty() {
        println!("No categories found.");
        return Ok(());
    }

    for category in &categories {
        println!("• {category}");
    }
    println!("\nTotal: {} categories", categories.len());
    Ok(())
}

fn product_row(product: &Product) -> String {
    format!(
        "#{:<4} {:>10}  {} ({:>4})  {:<50} [{}]",
        product.id,
        product.formatted_price(),
        product.star_glyphs(),
        product.rating.count,
        truncate_chars(&product.title, 50),
        product.category
    )
}

fn product_details(product: &Product) -> String {
    format!(
        "#{} {}\n\nCategory: {}\nPrice:    {}\nRating:   {} {:.1} ({} reviews)\nImage:    {}\n\n{}",
        product.id,
        product.title,
        product.category,
        product.formatted_price(),
        product.star_glyphs(),
        product.rating.rate,
        product.rating.count,
        product.image,
        product.description
    )
}
