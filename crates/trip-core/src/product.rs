//! # Product Types
//!
//! Catalog products for pawtrip: experiences, classes and trips.
//! Products are loaded from `config/products.toml` or any other
//! [`ProductSource`](crate::source::ProductSource).

use crate::pricing::{calculate_price, lenient, round0, PricingInput, PricingModel, PricingResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Day activity with a guide (hike, boat tour, tasting)
    #[default]
    Experience,
    /// Training or education session
    Class,
    /// Multi-day trip
    Trip,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Experience => "experience",
            Category::Class => "class",
            Category::Trip => "trip",
        }
    }

    /// Italian label used in emails
    pub fn label(&self) -> &'static str {
        match self {
            Category::Experience => "Esperienza",
            Category::Class => "Classe",
            Category::Trip => "Viaggio",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pricing fields as stored on a product row
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductPricing {
    #[serde(default)]
    pub model: PricingModel,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub provider_cost_adult_base: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub provider_cost_dog_base: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub margin_percentage: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub markup_adult: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub markup_dog: Decimal,
    /// Legacy flat price per adult
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price_adult: Decimal,
    /// Legacy flat price per dog
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price_dog: Decimal,
}

impl ProductPricing {
    /// Flat legacy pricing
    pub fn legacy(price_adult: Decimal, price_dog: Decimal) -> Self {
        Self {
            model: PricingModel::Legacy,
            price_adult,
            price_dog,
            ..Default::default()
        }
    }

    /// Provider cost plus margin percentage
    pub fn percentage(adult_cost: Decimal, dog_cost: Decimal, margin: Decimal) -> Self {
        Self {
            model: PricingModel::Percentage,
            provider_cost_adult_base: adult_cost,
            provider_cost_dog_base: dog_cost,
            margin_percentage: margin,
            ..Default::default()
        }
    }

    /// Provider cost plus fixed markups
    pub fn markup(adult_cost: Decimal, dog_cost: Decimal, markup_adult: Decimal, markup_dog: Decimal) -> Self {
        Self {
            model: PricingModel::Markup,
            provider_cost_adult_base: adult_cost,
            provider_cost_dog_base: dog_cost,
            markup_adult,
            markup_dog,
            ..Default::default()
        }
    }

    /// Calculator input for a party of `guests` adults and `dogs` dogs
    pub fn input(&self, guests: u32, dogs: u32) -> PricingInput {
        PricingInput {
            pricing_model: self.model,
            provider_cost_adult_base: self.provider_cost_adult_base,
            provider_cost_dog_base: self.provider_cost_dog_base,
            margin_percentage: self.margin_percentage,
            markup_adult: self.markup_adult,
            markup_dog: self.markup_dog,
            legacy_price_adult: self.price_adult,
            legacy_price_dog: self.price_dog,
            guests,
            dogs,
        }
    }
}

/// A bookable product in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    pub id: String,

    /// URL slug (e.g., "trekking-dolomiti")
    #[serde(default)]
    pub slug: String,

    /// Display name
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: Category,

    /// Where it takes place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Whether this product is listed and bookable
    #[serde(default = "default_true")]
    pub active: bool,

    /// Booked per dog only, no adult participants
    #[serde(default)]
    pub no_adults: bool,

    /// Upper bound on dogs per booking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_dogs: Option<u32>,

    #[serde(default)]
    pub pricing: ProductPricing,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Create a new product
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        pricing: ProductPricing,
    ) -> Self {
        let id = id.into();
        Self {
            slug: id.clone(),
            id,
            name: name.into(),
            description: String::new(),
            category,
            location: None,
            image_url: None,
            active: true,
            no_adults: false,
            max_dogs: None,
            pricing,
        }
    }

    /// Builder: set slug
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Builder: set location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder: mark as dog-only (no adult participants)
    pub fn dogs_only(mut self) -> Self {
        self.no_adults = true;
        self
    }

    /// Builder: cap dogs per booking
    pub fn with_max_dogs(mut self, max_dogs: u32) -> Self {
        self.max_dogs = Some(max_dogs);
        self
    }

    /// Builder: mark as inactive
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Priced per dog with no adults. Trips always count adults.
    pub fn is_dog_only(&self) -> bool {
        self.no_adults && matches!(self.category, Category::Class | Category::Experience)
    }

    /// Price this product for a party
    pub fn quote(&self, guests: u32, dogs: u32) -> PricingResult {
        calculate_price(&self.pricing.input(guests, dogs))
    }

    /// Lowest price a customer can pay: one dog for dog-only products,
    /// one adult with one dog otherwise.
    pub fn minimum_price(&self) -> Decimal {
        if self.is_dog_only() {
            self.quote(0, 1).price_per_dog
        } else {
            self.quote(1, 1).total_amount
        }
    }

    /// Whole-euro minimum price and its unit, for product cards
    pub fn price_and_unit_for_card(&self) -> (Decimal, &'static str) {
        let unit = if self.is_dog_only() { "/ cane" } else { "/ binomio" };
        (round0(self.minimum_price()), unit)
    }

    /// True if `needle` appears in name, description or location
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self
                .location
                .as_deref()
                .map(|l| l.to_lowercase().contains(&needle))
                .unwrap_or(false)
    }
}
