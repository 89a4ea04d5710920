//! Initial catalog data
//!
//! Seeding only runs against an empty catalog. Rows go through the normal
//! tracked insert path, so interceptors see them like any other save.

use core_kernel::Price;
use domain_catalog::{NewCategory, NewProduct, ProductSpecifications};
use tracing::info;

use crate::context::CatalogContext;
use crate::error::DatabaseError;

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    cents: i64,
    category: usize,
    color: &'static str,
    brand: &'static str,
    size: Option<&'static str>,
    warranty_months: Option<i32>,
}

const CATEGORIES: [(&str, &str); 3] = [
    ("Electronics", "Devices, gadgets and accessories"),
    ("Clothing", "Apparel for every season"),
    ("Books", "Printed and bound reading material"),
];

const PRODUCTS: [SeedProduct; 6] = [
    SeedProduct {
        name: "Wireless Headphones",
        description: "Over-ear headphones with noise cancelling",
        cents: 19999,
        category: 0,
        color: "Black",
        brand: "Sonic",
        size: None,
        warranty_months: Some(24),
    },
    SeedProduct {
        name: "Smartphone",
        description: "6.1 inch display, 128 GB storage",
        cents: 69900,
        category: 0,
        color: "Blue",
        brand: "Nova",
        size: None,
        warranty_months: Some(12),
    },
    SeedProduct {
        name: "Cotton T-Shirt",
        description: "Crew neck, regular fit",
        cents: 1999,
        category: 1,
        color: "Red",
        brand: "Basics",
        size: Some("M"),
        warranty_months: None,
    },
    SeedProduct {
        name: "Denim Jacket",
        description: "Classic trucker jacket",
        cents: 7950,
        category: 1,
        color: "Blue",
        brand: "Rivet",
        size: Some("L"),
        warranty_months: None,
    },
    SeedProduct {
        name: "Rust in Practice",
        description: "Systems programming handbook",
        cents: 4500,
        category: 2,
        color: "White",
        brand: "Ferrous Press",
        size: None,
        warranty_months: None,
    },
    SeedProduct {
        name: "Database Internals",
        description: "Storage engines and distributed systems",
        cents: 5299,
        category: 2,
        color: "Red",
        brand: "Ferrous Press",
        size: None,
        warranty_months: None,
    },
];

/// Seeds the catalog if it holds no categories yet
///
/// Returns `true` if data was inserted.
pub async fn seed_catalog(db: &CatalogContext) -> Result<bool, DatabaseError> {
    if db.categories().count_all().await? > 0 {
        info!("Catalog already seeded");
        return Ok(false);
    }

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for (name, description) in CATEGORIES {
        let category = db.categories().insert(NewCategory::new(name, description)).await?;
        category_ids.push(category.id);
    }

    for seed in &PRODUCTS {
        let Some(&category_id) = category_ids.get(seed.category) else {
            continue;
        };
        let product = NewProduct {
            name: seed.name.to_string(),
            description: Some(seed.description.to_string()),
            price: Price::from_cents(seed.cents)?,
            category_id,
            specifications: Some(ProductSpecifications {
                color: Some(seed.color.to_string()),
                brand: Some(seed.brand.to_string()),
                size: seed.size.map(str::to_string),
                warranty_months: seed.warranty_months,
                ..Default::default()
            }),
        };
        db.products().insert(product).await?;
    }

    info!(
        categories = CATEGORIES.len(),
        products = PRODUCTS.len(),
        "Catalog seeded"
    );
    Ok(true)
}
