//! Cart line types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// How a product is sold, which decides its quantity ceiling and precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SellingMode {
    /// Sold by length; fractional quantities allowed.
    Meter,
    /// Sold in whole units.
    Piece,
}

impl SellingMode {
    /// Lowercase name as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            SellingMode::Meter => "meter",
            SellingMode::Piece => "piece",
        }
    }

    /// Unit suffix for display.
    pub fn unit(&self) -> &'static str {
        match self {
            SellingMode::Meter => "m",
            SellingMode::Piece => "pcs",
        }
    }

    /// Round a requested quantity to this mode's precision: whole units for
    /// pieces, hundredths (centimeters) for meters.
    pub fn normalize(&self, quantity: f64) -> f64 {
        match self {
            SellingMode::Meter => (quantity * 100.0).round() / 100.0,
            SellingMode::Piece => quantity.round(),
        }
    }
}

impl fmt::Display for SellingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SellingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "meter" | "m" => Ok(SellingMode::Meter),
            "piece" | "pcs" => Ok(SellingMode::Piece),
            other => Err(format!("unknown selling mode: {}", other)),
        }
    }
}

/// A product line in the cart.
///
/// Serialized with camelCase keys; this is the durable storage format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product being purchased; unique within a cart.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// URL slug of the product page.
    pub slug: String,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Unit price when the item was added.
    pub price: f64,
    /// Quantity, in meters or pieces depending on `selling_mode`.
    pub quantity: f64,
    pub selling_mode: SellingMode,
    /// Smallest quantity the line may hold.
    pub min_order_quantity: f64,
}

impl CartItem {
    /// Price of the whole line.
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity
    }
}

/// Everything about a cart line except its quantity; the input to
/// [`CartStore::add_item`](crate::cart::CartStore::add_item).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub product_id: ProductId,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub price: f64,
    pub selling_mode: SellingMode,
    pub min_order_quantity: f64,
}

impl NewCartItem {
    /// Create an item with a minimum order quantity of 1 and a slug equal to
    /// the product id.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        selling_mode: SellingMode,
        price: f64,
    ) -> Self {
        let product_id = product_id.into();
        Self {
            slug: product_id.as_str().to_string(),
            product_id,
            name: name.into(),
            image: None,
            price,
            selling_mode,
            min_order_quantity: 1.0,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_min_order_quantity(mut self, min_order_quantity: f64) -> Self {
        self.min_order_quantity = min_order_quantity;
        self
    }

    /// Attach a quantity, producing a cart line.
    pub fn with_quantity(self, quantity: f64) -> CartItem {
        CartItem {
            product_id: self.product_id,
            name: self.name,
            slug: self.slug,
            image: self.image,
            price: self.price,
            quantity,
            selling_mode: self.selling_mode,
            min_order_quantity: self.min_order_quantity,
        }
    }
}
