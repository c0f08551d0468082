//! # Booking Types
//!
//! Booking request and the priced checkout summary handed to the payment
//! processor. The summary is always priced server-side with
//! [`calculate_price`](crate::pricing::calculate_price).

use crate::error::{BookingError, BookingResult};
use crate::format::participants_label;
use crate::pricing::{to_cents, PricingResult};
use crate::product::Product;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Currency for every charge (ISO 4217, lowercase as processors expect)
pub const CURRENCY: &str = "eur";

/// Person making the booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Customer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    fn validate(&self) -> BookingResult<()> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(BookingError::InvalidRequest(
                "Customer first and last name are required".to_string(),
            ));
        }
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(BookingError::InvalidRequest(format!(
                "Invalid customer email: {}",
                email
            ))),
        }
    }
}

/// What the customer asked to book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub product_id: String,

    /// Adult participants
    #[serde(default)]
    pub guests: u32,

    #[serde(default)]
    pub dogs: u32,

    /// Activity date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    pub customer: Customer,
}

impl BookingRequest {
    pub fn new(product_id: impl Into<String>, guests: u32, dogs: u32, customer: Customer) -> Self {
        Self {
            product_id: product_id.into(),
            guests,
            dogs,
            date: None,
            customer,
        }
    }

    /// Builder: set activity date
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Check the request against the product it targets
    pub fn validate(&self, product: &Product) -> BookingResult<()> {
        if !product.active {
            return Err(BookingError::ProductUnavailable {
                product_id: product.id.clone(),
            });
        }

        if self.dogs == 0 {
            return Err(BookingError::participants("At least one dog is required"));
        }

        if product.is_dog_only() {
            if self.guests > 0 {
                return Err(BookingError::participants(format!(
                    "{} is booked per dog, adults cannot be added",
                    product.name
                )));
            }
        } else if self.guests == 0 {
            return Err(BookingError::participants("At least one adult is required"));
        }

        if let Some(max_dogs) = product.max_dogs {
            if self.dogs > max_dogs {
                return Err(BookingError::participants(format!(
                    "At most {} dogs per booking",
                    max_dogs
                )));
            }
        }

        self.customer.validate()
    }
}

/// A line item as sent to the payment processor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,

    /// Participants summary shown on the payment page
    pub description: String,

    /// Unit price in cents
    pub unit_amount_cents: i64,

    pub quantity: u32,
}

impl LineItem {
    /// Line total in cents
    pub fn total_cents(&self) -> i64 {
        self.unit_amount_cents * self.quantity as i64
    }
}

/// Authoritative priced booking, ready for payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSummary {
    /// Our booking ID (generated)
    pub booking_id: String,

    /// Idempotency key (prevents duplicate charges)
    pub idempotency_key: String,

    pub product_id: String,

    /// Product name (denormalized for display)
    pub product_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    pub guests: u32,

    pub dogs: u32,

    pub currency: String,

    pub pricing: PricingResult,

    pub line_items: Vec<LineItem>,

    /// What the processor charges, in cents
    pub amount_total_cents: i64,

    pub customer: Customer,

    pub created_at: DateTime<Utc>,
}

impl CheckoutSummary {
    /// Validate and price a booking
    pub fn build(product: &Product, request: &BookingRequest) -> BookingResult<Self> {
        request.validate(product)?;

        let pricing = product.quote(request.guests, request.dogs);
        let amount_total_cents = to_cents(pricing.total_amount).ok_or_else(|| {
            BookingError::InvalidRequest(format!("Amount out of range: {}", pricing.total_amount))
        })?;

        if amount_total_cents <= 0 {
            return Err(BookingError::InvalidRequest(format!(
                "{} has no price configured",
                product.name
            )));
        }

        // One line for the whole party: the processor must charge the
        // reconciled total, not unit price × quantity.
        let line_items = vec![LineItem {
            name: product.name.clone(),
            description: participants_label(request.guests, request.dogs),
            unit_amount_cents: amount_total_cents,
            quantity: 1,
        }];

        Ok(Self {
            booking_id: Uuid::new_v4().to_string(),
            idempotency_key: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            date: request.date,
            guests: request.guests,
            dogs: request.dogs,
            currency: CURRENCY.to_string(),
            pricing,
            line_items,
            amount_total_cents,
            customer: request.customer.clone(),
            created_at: Utc::now(),
        })
    }

    /// Sum of line items in cents
    pub fn line_items_total_cents(&self) -> i64 {
        self.line_items.iter().map(LineItem::total_cents).sum()
    }

    /// Metadata to attach to the payment so webhooks can find the booking
    pub fn metadata(&self) -> Vec<(String, String)> {
        let mut metadata = vec![
            ("booking_id".to_string(), self.booking_id.clone()),
            ("product_id".to_string(), self.product_id.clone()),
            ("guests".to_string(), self.guests.to_string()),
            ("dogs".to_string(), self.dogs.to_string()),
        ];
        if let Some(date) = self.date {
            metadata.push(("date".to_string(), date.to_string()));
        }
        metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{Category, ProductPricing};
    use rust_decimal_macros::dec;

    fn customer() -> Customer {
        Customer::new("Giulia", "Bianchi", "giulia@example.it")
    }

    fn hike() -> Product {
        Product::new(
            "hike",
            "Trekking Dolomiti",
            Category::Experience,
            ProductPricing::percentage(dec!(10), dec!(5), dec!(20)),
        )
        .with_max_dogs(2)
    }

    fn agility() -> Product {
        Product::new(
            "agility",
            "Agility base",
            Category::Class,
            ProductPricing::legacy(dec!(0), dec!(25)),
        )
        .dogs_only()
    }

    #[test]
    fn test_checkout_summary() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 14).unwrap();
        let request = BookingRequest::new("hike", 2, 1, customer()).on(date);
        let summary = CheckoutSummary::build(&hike(), &request).unwrap();

        assert_eq!(summary.pricing.total_amount, dec!(30.00));
        assert_eq!(summary.amount_total_cents, 3000);
        assert_eq!(summary.line_items_total_cents(), summary.amount_total_cents);
        assert_eq!(summary.line_items[0].description, "2 adulti, 1 cane");
        assert_eq!(summary.currency, "eur");
        assert_eq!(summary.date, Some(date));
        assert_ne!(summary.booking_id, summary.idempotency_key);
    }

    #[test]
    fn test_dog_only_checkout() {
        let request = BookingRequest::new("agility", 0, 2, customer());
        let summary = CheckoutSummary::build(&agility(), &request).unwrap();

        assert_eq!(summary.amount_total_cents, 5000);
        assert_eq!(summary.pricing.subtotal_adults, dec!(0));
        assert_eq!(summary.line_items[0].description, "2 cani");
    }

    #[test]
    fn test_participant_rules() {
        let no_dogs = BookingRequest::new("hike", 2, 0, customer());
        assert!(matches!(
            no_dogs.validate(&hike()),
            Err(BookingError::InvalidParticipants { .. })
        ));

        let no_adults = BookingRequest::new("hike", 0, 1, customer());
        assert!(no_adults.validate(&hike()).is_err());

        let adults_on_dog_only = BookingRequest::new("agility", 1, 1, customer());
        assert!(adults_on_dog_only.validate(&agility()).is_err());

        let too_many_dogs = BookingRequest::new("hike", 1, 3, customer());
        assert!(too_many_dogs.validate(&hike()).is_err());
    }

    #[test]
    fn test_inactive_product_rejected() {
        let request = BookingRequest::new("hike", 1, 1, customer());
        let err = CheckoutSummary::build(&hike().inactive(), &request).unwrap_err();

        assert!(matches!(err, BookingError::ProductUnavailable { .. }));
    }

    #[test]
    fn test_unpriced_product_rejected() {
        let free = Product::new("free", "Free", Category::Experience, ProductPricing::default());
        let request = BookingRequest::new("free", 1, 1, customer());

        assert!(matches!(
            CheckoutSummary::build(&free, &request),
            Err(BookingError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_customer_validation() {
        let mut bad = customer();
        bad.email = "not-an-email".to_string();
        let request = BookingRequest::new("hike", 1, 1, bad);
        assert!(request.validate(&hike()).is_err());

        let mut nameless = customer();
        nameless.last_name = "  ".to_string();
        let request = BookingRequest::new("hike", 1, 1, nameless);
        assert!(request.validate(&hike()).is_err());
    }

    #[test]
    fn test_metadata() {
        let request = BookingRequest::new("hike", 1, 1, customer());
        let summary = CheckoutSummary::build(&hike(), &request).unwrap();
        let metadata = summary.metadata();

        assert!(metadata.contains(&("product_id".to_string(), "hike".to_string())));
        assert!(metadata.iter().all(|(k, _)| k != "date"));
    }
}
