//! # trip-core
//!
//! Core types for the pawtrip booking storefront.
//!
//! This crate provides:
//! - `calculate_price` and friends: the single pricing engine shared by the
//!   server (what gets charged) and the browser (what gets displayed)
//! - `Product` and `ProductCatalog` for experiences, classes and trips
//! - `ProductSource` trait for wherever products are stored
//! - `BookingRequest` and `CheckoutSummary` for the checkout flow
//! - `ConfirmationEmail` for the transactional booking email
//! - `BookingError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use trip_core::{BookingRequest, CheckoutSummary, Customer, ProductSource};
//!
//! let product = source.require_product("trekking-dolomiti").await?;
//! let request = BookingRequest::new(&product.id, 2, 1, Customer::new("Giulia", "Bianchi", "giulia@example.it"));
//!
//! // Validated and priced server-side
//! let summary = CheckoutSummary::build(&product, &request)?;
//! assert_eq!(summary.line_items_total_cents(), summary.amount_total_cents);
//! ```

pub mod booking;
pub mod catalog;
pub mod email;
pub mod error;
pub mod format;
pub mod pricing;
pub mod product;
pub mod source;

// Re-exports for convenience
pub use booking::{BookingRequest, CheckoutSummary, Customer, LineItem, CURRENCY};
pub use catalog::{CatalogQuery, ProductCatalog, SortOrder};
pub use email::{ConfirmationEmail, EmailBranding};
pub use error::{BookingError, BookingResult};
pub use format::{
    format_price, format_price_from, format_price_from_rounded, format_price_rounded,
    participants_label,
};
pub use pricing::{
    calculate_price, calculate_total, from_cents, round0, round2, to_cents, PricingInput,
    PricingModel, PricingResult,
};
pub use product::{Category, Product, ProductPricing};
pub use source::{ProductSource, SharedProductSource};

pub use rust_decimal::Decimal;
