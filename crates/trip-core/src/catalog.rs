//! # Product Catalog
//!
//! In-memory catalog plus the listing query used by the storefront
//! (category tabs, search box, dog-only toggle, sort dropdown).

use crate::error::BookingResult;
use crate::product::{Category, Product};
use serde::{Deserialize, Serialize};

/// Sort order for catalog listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Catalog order as configured
    #[default]
    Featured,
    /// Cheapest minimum price first
    PriceAsc,
    /// Most expensive minimum price first
    PriceDesc,
    /// Alphabetical by name
    Name,
}

/// Listing filters. Empty query = all active products in catalog order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub dog_only: Option<bool>,
    #[serde(default)]
    pub sort: SortOrder,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: filter by category
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Builder: free-text search
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Builder: only dog-only (or only non dog-only) products
    pub fn dog_only(mut self, dog_only: bool) -> Self {
        self.dog_only = Some(dog_only);
        self
    }

    /// Builder: sort order
    pub fn sorted(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Does an active product pass the filters
    pub fn accepts(&self, product: &Product) -> bool {
        if !product.active {
            return false;
        }
        if let Some(category) = self.category {
            if product.category != category {
                return false;
            }
        }
        if let Some(dog_only) = self.dog_only {
            if product.is_dog_only() != dog_only {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => product.matches_text(text),
            _ => true,
        }
    }

    /// Filter and sort a product list
    pub fn apply<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Vec<&'a Product> {
        let mut matched: Vec<&Product> = products.into_iter().filter(|p| self.accepts(p)).collect();

        match self.sort {
            SortOrder::Featured => {}
            SortOrder::PriceAsc => matched.sort_by_key(|p| p.minimum_price()),
            SortOrder::PriceDesc => matched.sort_by_key(|p| std::cmp::Reverse(p.minimum_price())),
            SortOrder::Name => matched.sort_by_key(|p| p.name.to_lowercase()),
        }

        matched
    }
}

/// Product catalog (loaded from config)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    #[serde(default)]
    pub products: Vec<Product>,
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Add a product to the catalog
    pub fn add(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Builder: add a product
    pub fn with_product(mut self, product: Product) -> Self {
        self.add(product);
        self
    }

    /// Find a product by ID or slug
    pub fn get(&self, id_or_slug: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id_or_slug)
            .or_else(|| self.products.iter().find(|p| !p.slug.is_empty() && p.slug == id_or_slug))
    }

    /// Get all active products
    pub fn active_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.active)
    }

    /// Run a listing query
    pub fn query(&self, query: &CatalogQuery) -> Vec<&Product> {
        query.apply(&self.products)
    }

    /// Load catalog from TOML string
    pub fn from_toml(toml_str: &str) -> BookingResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
