//! Consumer-price aggregation.
//!
//! Prices a shopping list expressed as a sequence of product ids, where a
//! repeated id requests one more unit of that product. The computation is
//! pure: it never mutates the catalog, and any failure aborts the whole
//! call with no partial result.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::{ProductError, ProductResult};
use crate::models::{ConsumerPrice, Product};

struct BasketLine<'a> {
    product: &'a Product,
    units: i64,
}

/// Price the given id sequence against the catalog.
///
/// Each id is processed in order: the product must exist and be published,
/// and from its second occurrence on the accumulated unit count must stay
/// within the product's stock. Every occurrence adds the unit price to the
/// running total. The surcharge tier is chosen by the number of *distinct*
/// products, not total units: larger baskets pay the smaller surcharge.
pub(crate) fn consumer_price(catalog: &[Product], ids: &[u64]) -> ProductResult<ConsumerPrice> {
    let mut basket: HashMap<u64, BasketLine<'_>> = HashMap::new();
    let mut total = 0.0;

    for &id in ids {
        let product = catalog
            .iter()
            .find(|p| p.id == id)
            .ok_or(ProductError::NotFound(id))?;

        if !product.is_published {
            return Err(ProductError::NotPublished(id));
        }

        match basket.entry(id) {
            Entry::Occupied(mut entry) => {
                let line = entry.get_mut();
                line.units += 1;
                if line.units > line.product.quantity {
                    return Err(ProductError::InsufficientStock {
                        id,
                        available: line.product.quantity,
                    });
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(BasketLine { product, units: 1 });
            }
        }

        total += product.price;
    }

    let multiplier = surcharge_multiplier(basket.len());
    let products = basket
        .into_values()
        .map(|line| line.product.clone())
        .collect();

    Ok(ConsumerPrice {
        products,
        total_price: total * multiplier,
    })
}

/// Surcharge factor by distinct product count. The inversion (bigger
/// baskets get the smallest factor) is the intended business rule.
fn surcharge_multiplier(distinct: usize) -> f64 {
    if distinct > 20 {
        1.15
    } else if distinct > 10 {
        1.17
    } else {
        1.21
    }
}
