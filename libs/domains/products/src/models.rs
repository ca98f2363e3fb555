use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Product entity - one record of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier, assigned by the repository on creation
    pub id: u64,
    /// Product name
    pub name: String,
    /// Available stock
    pub quantity: i64,
    /// User-supplied product code, unique across the catalog
    pub code_value: String,
    /// Whether the product can be purchased
    #[serde(default)]
    pub is_published: bool,
    /// Expiration date, DD/MM/YYYY
    pub expiration: String,
    /// Unit price
    pub price: f64,
}

/// DTO for creating a product, also used as the full-replacement body of PUT
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProduct {
    pub name: String,
    pub quantity: i64,
    pub code_value: String,
    #[serde(default)]
    pub is_published: bool,
    pub expiration: String,
    pub price: f64,
}

/// DTO for partially updating an existing product
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub code_value: Option<String>,
    pub is_published: Option<bool>,
    pub expiration: Option<String>,
    pub price: Option<f64>,
}

/// Result of pricing a shopping list
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConsumerPrice {
    /// The distinct purchased products, each appearing once.
    /// Ordering is unspecified; callers must not depend on it.
    pub products: Vec<Product>,
    /// Sum of every requested unit's price with the surcharge applied
    pub total_price: f64,
}

impl Product {
    /// Build a product from a creation payload and an assigned id
    pub fn new(id: u64, input: CreateProduct) -> Self {
        Self {
            id,
            name: input.name,
            quantity: input.quantity,
            code_value: input.code_value,
            is_published: input.is_published,
            expiration: input.expiration,
            price: input.price,
        }
    }

    /// Apply updates from an UpdateProduct DTO; the id never changes
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(code_value) = update.code_value {
            self.code_value = code_value;
        }
        if let Some(is_published) = update.is_published {
            self.is_published = is_published;
        }
        if let Some(expiration) = update.expiration {
            self.expiration = expiration;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
    }
}
