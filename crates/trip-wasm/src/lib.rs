//! # trip-wasm
//!
//! WebAssembly bindings for pawtrip-rs.
//!
//! The browser checkout runs the exact pricing engine the server charges
//! with, so the total on screen is the total on the card statement.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { CheckoutPricer, calculate_price, format_price } from 'pawtrip-wasm';
//!
//! await init();
//!
//! // product as returned by GET /api/v1/products/{id}
//! const pricer = new CheckoutPricer(product);
//! const quote = pricer.quote(2, 1);
//!
//! console.log('Totale:', format_price(quote.total_amount));
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trip_core::{PricingInput, PricingResult, Product, ProductPricing};
use wasm_bindgen::prelude::*;

/// Pricing result with plain JS numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JsPricingResult {
    pub total_amount: f64,
    pub price_per_adult: f64,
    pub price_per_dog: f64,
    pub subtotal_adults: f64,
    pub subtotal_dogs: f64,
}

impl From<PricingResult> for JsPricingResult {
    fn from(result: PricingResult) -> Self {
        Self {
            total_amount: to_number(result.total_amount),
            price_per_adult: to_number(result.price_per_adult),
            price_per_dog: to_number(result.price_per_dog),
            subtotal_adults: to_number(result.subtotal_adults),
            subtotal_dogs: to_number(result.subtotal_dogs),
        }
    }
}

/// Card price and unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsCardPrice {
    pub price: f64,
    pub unit: String,
}

fn to_number(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}

fn to_decimal(amount: f64) -> Decimal {
    Decimal::from_f64(amount).unwrap_or(Decimal::ZERO)
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn card_price(product: &Product) -> JsCardPrice {
    let (price, unit) = product.price_and_unit_for_card();
    JsCardPrice {
        price: to_number(price),
        unit: unit.to_string(),
    }
}

/// Prices a single product as the customer changes party size
#[wasm_bindgen]
pub struct CheckoutPricer {
    pricing: ProductPricing,
    dog_only: bool,
}

impl CheckoutPricer {
    /// Rust-side constructor
    pub fn for_product(product: &Product) -> Self {
        Self {
            pricing: product.pricing.clone(),
            dog_only: product.is_dog_only(),
        }
    }

    /// Price a party. Adults are dropped for dog-only products.
    pub fn price(&self, guests: u32, dogs: u32) -> JsPricingResult {
        let guests = if self.dog_only { 0 } else { guests };
        trip_core::calculate_price(&self.pricing.input(guests, dogs)).into()
    }
}

#[wasm_bindgen]
impl CheckoutPricer {
    #[wasm_bindgen(constructor)]
    pub fn new(product: JsValue) -> Result<CheckoutPricer, JsValue> {
        let product: Product = serde_wasm_bindgen::from_value(product)
            .map_err(|e| js_error(format!("Invalid product: {}", e)))?;
        Ok(Self::for_product(&product))
    }

    #[wasm_bindgen(getter)]
    pub fn dog_only(&self) -> bool {
        self.dog_only
    }

    /// Full pricing breakdown
    #[wasm_bindgen]
    pub fn quote(&self, guests: u32, dogs: u32) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.price(guests, dogs)).map_err(js_error)
    }

    /// Total only
    #[wasm_bindgen]
    pub fn total(&self, guests: u32, dogs: u32) -> f64 {
        self.price(guests, dogs).total_amount
    }
}

/// Price a raw pricing input (same shape as the server's)
#[wasm_bindgen]
pub fn calculate_price(input: JsValue) -> Result<JsValue, JsValue> {
    let input: PricingInput = serde_wasm_bindgen::from_value(input)
        .map_err(|e| js_error(format!("Invalid pricing input: {}", e)))?;
    let result = JsPricingResult::from(trip_core::calculate_price(&input));
    serde_wasm_bindgen::to_value(&result).map_err(js_error)
}

/// Total for a raw pricing input
#[wasm_bindgen]
pub fn calculate_total(input: JsValue) -> Result<f64, JsValue> {
    let input: PricingInput = serde_wasm_bindgen::from_value(input)
        .map_err(|e| js_error(format!("Invalid pricing input: {}", e)))?;
    Ok(to_number(trip_core::calculate_total(&input)))
}

/// Lowest price a customer can pay for a product
#[wasm_bindgen]
pub fn minimum_price(product: JsValue) -> Result<f64, JsValue> {
    let product: Product = serde_wasm_bindgen::from_value(product)
        .map_err(|e| js_error(format!("Invalid product: {}", e)))?;
    Ok(to_number(product.minimum_price()))
}

/// `{ price, unit }` for product cards
#[wasm_bindgen]
pub fn price_and_unit_for_card(product: JsValue) -> Result<JsValue, JsValue> {
    let product: Product = serde_wasm_bindgen::from_value(product)
        .map_err(|e| js_error(format!("Invalid product: {}", e)))?;
    serde_wasm_bindgen::to_value(&card_price(&product)).map_err(js_error)
}

/// `€12.50`
#[wasm_bindgen]
pub fn format_price(amount: f64) -> String {
    trip_core::format_price(to_decimal(amount))
}

/// `Da €12.50`
#[wasm_bindgen]
pub fn format_price_from(amount: f64) -> String {
    trip_core::format_price_from(to_decimal(amount))
}

/// `€13`
#[wasm_bindgen]
pub fn format_price_rounded(amount: f64) -> String {
    trip_core::format_price_rounded(to_decimal(amount))
}

/// `Da €13`
#[wasm_bindgen]
pub fn format_price_from_rounded(amount: f64) -> String {
    trip_core::format_price_from_rounded(to_decimal(amount))
}

/// `2 adulti, 1 cane`
#[wasm_bindgen]
pub fn participants_label(guests: u32, dogs: u32) -> String {
    trip_core::participants_label(guests, dogs)
}

/// Log to browser console
#[wasm_bindgen]
pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use trip_core::Category;

    fn product_json() -> &'static str {
        r#"{
            "id": "agility-base",
            "name": "Agility base",
            "category": "class",
            "no_adults": true,
            "pricing": { "model": "legacy", "price_adult": 40, "price_dog": 24.5 },
            "card_price": "€25"
        }"#
    }

    #[test]
    fn test_pricer_matches_server() {
        let product = Product::new(
            "hike",
            "Hike",
            Category::Experience,
            ProductPricing::percentage(dec!(10), dec!(5), dec!(20)),
        );
        let pricer = CheckoutPricer::for_product(&product);
        let quote = pricer.price(2, 1);

        assert_eq!(quote, JsPricingResult::from(product.quote(2, 1)));
        assert_eq!(quote.total_amount, 30.0);
        assert_eq!(quote.subtotal_adults, 24.0);
        assert_eq!(pricer.total(2, 1), 30.0);
    }

    #[test]
    fn test_pricer_dog_only_drops_adults() {
        let product: Product = serde_json::from_str(product_json()).unwrap();
        let pricer = CheckoutPricer::for_product(&product);

        assert!(pricer.dog_only());
        assert_eq!(pricer.total(3, 2), 49.0);
    }

    #[test]
    fn test_card_price() {
        let product: Product = serde_json::from_str(product_json()).unwrap();
        let card = card_price(&product);

        assert_eq!(card.price, 25.0);
        assert_eq!(card.unit, "/ cane");
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_price(30.0), "€30.00");
        assert_eq!(format_price(0.1), "€0.10");
        assert_eq!(format_price_from(0.0), "Da €0");
        assert_eq!(format_price_rounded(44.5), "€45");
        assert_eq!(format_price_from_rounded(19.9), "Da €20");
        assert_eq!(participants_label(1, 2), "1 adulto, 2 cani");
    }
}
