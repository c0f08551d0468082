//! # Product Source Trait
//!
//! Where the storefront reads its products from. Production rows live in a
//! hosted relational store; the bundled implementation serves a
//! [`ProductCatalog`] loaded from TOML.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │          ProductSource (trait)           │
//! │  ├── list_products()                     │
//! │  ├── find_product()                      │
//! │  └── source_name()                       │
//! └──────────────────────────────────────────┘
//!                     ▲
//!          ┌──────────┴──────────┐
//!  ┌───────┴───────┐     ┌───────┴───────┐
//!  │ProductCatalog │     │  table-backed │
//!  │  (in memory)  │     │    source     │
//!  └───────────────┘     └───────────────┘
//! ```

use crate::catalog::{CatalogQuery, ProductCatalog};
use crate::error::{BookingError, BookingResult};
use crate::product::Product;
use async_trait::async_trait;
use std::sync::Arc;

/// Read access to the product catalog.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// All products, active or not, in catalog order.
    async fn list_products(&self) -> BookingResult<Vec<Product>>;

    /// Look up a product by ID or slug.
    async fn find_product(&self, id_or_slug: &str) -> BookingResult<Option<Product>>;

    /// Name used in logs.
    fn source_name(&self) -> &'static str;

    /// Run a listing query against the full product list.
    async fn search(&self, query: &CatalogQuery) -> BookingResult<Vec<Product>> {
        let products = self.list_products().await?;
        Ok(query.apply(&products).into_iter().cloned().collect())
    }

    /// Like `find_product`, but a missing product is an error.
    async fn require_product(&self, id_or_slug: &str) -> BookingResult<Product> {
        self.find_product(id_or_slug)
            .await?
            .ok_or_else(|| BookingError::ProductNotFound {
                product_id: id_or_slug.to_string(),
            })
    }
}

/// Type alias for a shared product source (dynamic dispatch)
pub type SharedProductSource = Arc<dyn ProductSource>;

#[async_trait]
impl ProductSource for ProductCatalog {
    async fn list_products(&self) -> BookingResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn find_product(&self, id_or_slug: &str) -> BookingResult<Option<Product>> {
        Ok(self.get(id_or_slug).cloned())
    }

    fn source_name(&self) -> &'static str {
        "catalog"
    }
}
