//! Test Data Builders
//!
//! Provides builders for insert payloads. Unset fields are filled with
//! generated but valid data, so tests only spell out what they assert on.

use core_kernel::Price;
use domain_catalog::{NewProduct, ProductSpecifications};
use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::{Sentence, Word};
use fake::Fake;
use rust_decimal::Decimal;

const COLORS: [&str; 6] = ["Red", "Blue", "Black", "White", "Green", "Silver"];

/// Builder for product insert payloads
#[derive(Debug, Clone)]
pub struct NewProductBuilder {
    name: String,
    description: Option<String>,
    price: Price,
    category_id: i32,
    specifications: Option<ProductSpecifications>,
}

impl NewProductBuilder {
    /// Creates a builder for a product in the given category
    pub fn new(category_id: i32) -> Self {
        let word: String = Word().fake();
        let cents: i64 = (100..100_000i64).fake();

        Self {
            name: format!("{} {}", capitalize(&word), (1..1000u32).fake::<u32>()),
            description: Some(Sentence(3..8).fake()),
            price: Price::from_cents(cents).unwrap_or_default(),
            category_id,
            specifications: Some(ProductSpecifications {
                color: Some(COLORS[(0..COLORS.len()).fake::<usize>()].to_string()),
                brand: Some(CompanyName().fake()),
                ..Default::default()
            }),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the price; panics if the value does not fit `NUMERIC(18,2)`
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Price::new(price).expect("test price out of range");
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        let mut specifications = self.specifications.take().unwrap_or_default();
        specifications.color = Some(color.into());
        self.specifications = Some(specifications);
        self
    }

    pub fn with_specifications(mut self, specifications: ProductSpecifications) -> Self {
        self.specifications = Some(specifications);
        self
    }

    pub fn without_specifications(mut self) -> Self {
        self.specifications = None;
        self
    }

    pub fn build(self) -> NewProduct {
        NewProduct {
            name: self.name,
            description: self.description,
            price: self.price,
            category_id: self.category_id,
            specifications: self.specifications,
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
