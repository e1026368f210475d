//! # Development Data Generator
//!
//! Fills a store with garden catalog products and stock records.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default)
//! cargo run -p garden-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p garden-db --bin seed -- --count 1000
//!
//! # Specify database path
//! cargo run -p garden-db --bin seed -- --db ./data/garden_dev.sqlite
//! ```
//!
//! Each generated name is `{plant or tool} {variant}`, priced from the
//! variant's base plus a deterministic spread. One stock record is written
//! per variant family with a fractional quantity.

use std::env;

use garden_core::{Product, StockItem};
use garden_db::seed::SAMPLE_PRODUCTS;
use garden_db::{Database, DbConfig};

/// Catalog families: (status, names).
const FAMILIES: &[(&str, &[&str])] = &[
    (
        "In Stock",
        &[
            "Tomato", "Basil", "Pepper", "Lettuce", "Cucumber", "Zucchini", "Carrot", "Mint",
            "Rosemary", "Strawberry",
        ],
    ),
    (
        "Seasonal",
        &[
            "Tulip Bulbs", "Daffodil Bulbs", "Sunflower", "Lavender", "Dahlia", "Marigold",
            "Pumpkin", "Garlic",
        ],
    ),
    (
        "In Stock",
        &[
            "Spade", "Trowel", "Rake", "Hoe", "Pruner", "Watering Can", "Hose", "Wheelbarrow",
        ],
    ),
];

/// Variants: (suffix, base price).
const VARIANTS: &[(&str, f64)] = &[
    ("Seeds", 1.49),
    ("Seedling", 3.99),
    ("Small", 6.5),
    ("Large", 14.0),
    ("Premium", 24.99),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./garden_dev.sqlite");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Garden Product Manager Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./garden_dev.sqlite)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Garden Product Manager Seed Data Generator");
    println!("=============================================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Startup seeding leaves exactly the sample catalog in a new store
    let existing = db.products().count().await?;
    if existing > SAMPLE_PRODUCTS.len() as i64 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        db.close().await;
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let start = std::time::Instant::now();
    let mut generated = 0;
    let mut stocked = 0;

    'families: for (family_idx, (status, names)) in FAMILIES.iter().enumerate() {
        for (name_idx, name) in names.iter().enumerate() {
            for (variant_idx, (variant, base_price)) in VARIANTS.iter().enumerate() {
                if generated >= count {
                    break 'families;
                }

                let seed = family_idx * 1000 + name_idx * 20 + variant_idx;
                let product = generate_product(name, variant, *base_price, status, seed);

                if let Err(e) = db.products().insert(&product).await {
                    eprintln!("Failed to insert {}: {}", product.name, e);
                    continue;
                }

                generated += 1;
                if generated % 50 == 0 {
                    println!("  Generated {} products...", generated);
                }
            }

            let item = generate_stock_item(name, family_idx * 1000 + name_idx);
            match db.stock().insert(&item).await {
                Ok(_) => stocked += 1,
                Err(e) => eprintln!("Failed to insert stock {}: {}", item.name, e),
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);
    println!(
        "  Rate: {:.0} products/second",
        generated as f64 / elapsed.as_secs_f64()
    );
    println!("✓ Generated {} stock items", stocked);

    println!();
    println!("{}", db.status().await.message);

    db.close().await;
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single catalog product.
fn generate_product(name: &str, variant: &str, base_price: f64, status: &str, seed: usize) -> Product {
    // Spread of 0.00 - 4.99 on top of the variant base
    let spread = ((seed * 37) % 500) as f64 / 100.0;
    let price = ((base_price + spread) * 100.0).round() / 100.0;

    Product {
        id: String::new(),
        name: format!("{} {}", name, variant),
        price,
        description: format!("{} ({}) for the home garden", name, variant.to_lowercase()),
        status: status.to_string(),
    }
}

/// Generates a stock record with a fractional quantity.
fn generate_stock_item(name: &str, seed: usize) -> StockItem {
    StockItem {
        id: String::new(),
        name: name.to_string(),
        description: format!("Bulk {}", name.to_lowercase()),
        quantity: (seed % 97) as f64 + 0.5,
    }
}
