//! # Pricing Engine
//!
//! The one place where booking prices are computed. The API server charges
//! with it and the browser displays with it (through `trip-wasm`), so the
//! amount shown at checkout is the amount sent to the payment processor.
//!
//! ```text
//!  provider cost ──┬── percentage: cost × (1 + margin%)  ──┐
//!                  ├── markup:     cost + fixed markups   ──┼──► total, unit prices
//!  legacy prices ──┴── legacy:     flat adult/dog prices  ──┘          │
//!                                                                      ▼
//!                                           subtotals rounded, reconciled to total
//! ```
//!
//! All amounts are `rust_decimal::Decimal`. Rounding is half away from zero
//! on exact decimals.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};

/// Largest unit price or cost the calculator works with (one billion euros).
/// Inputs beyond it, in either sign, are clamped before any arithmetic so
/// intermediate products stay inside `Decimal`'s range for any party size.
pub const MAX_UNIT_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest margin percentage, in either sign
pub const MAX_MARGIN_PERCENTAGE: Decimal = MAX_UNIT_AMOUNT;

/// How a product turns provider cost into a customer price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingModel {
    /// Flat per-adult/per-dog prices with no cost basis
    #[default]
    Legacy,
    /// Provider cost plus a margin percentage
    Percentage,
    /// Provider cost plus a fixed markup per adult and per dog
    Markup,
}

impl PricingModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingModel::Legacy => "legacy",
            PricingModel::Percentage => "percentage",
            PricingModel::Markup => "markup",
        }
    }

    /// Parse a model name, falling back to `Legacy` for anything unknown
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "percentage" => PricingModel::Percentage,
            "markup" => PricingModel::Markup,
            _ => PricingModel::Legacy,
        }
    }
}

impl std::fmt::Display for PricingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PricingModel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match lenient::LooseText::deserialize(deserializer)? {
            lenient::LooseText::Text(name) => PricingModel::from_name(&name),
            lenient::LooseText::Other(_) => PricingModel::Legacy,
        })
    }
}

/// Everything needed to price one booking.
///
/// Every field defaults to zero (or `Legacy`) when missing, and junk values
/// deserialize to zero instead of failing: the calculator has no error path.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PricingInput {
    #[serde(default)]
    pub pricing_model: PricingModel,
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
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub legacy_price_adult: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub legacy_price_dog: Decimal,
    #[serde(default, deserialize_with = "lenient::count")]
    pub guests: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    pub dogs: u32,
}

impl PricingInput {
    /// Builder: set participant counts
    pub fn with_participants(mut self, guests: u32, dogs: u32) -> Self {
        self.guests = guests;
        self.dogs = dogs;
        self
    }

    /// Unrounded provider cost for the whole party
    pub fn provider_cost_total(&self) -> Decimal {
        self.provider_cost_adult_base * Decimal::from(self.guests)
            + self.provider_cost_dog_base * Decimal::from(self.dogs)
    }

    /// Copy with every amount clamped to the supported range
    fn bounded(&self) -> Self {
        let unit = |amount: Decimal| amount.clamp(-MAX_UNIT_AMOUNT, MAX_UNIT_AMOUNT);
        Self {
            pricing_model: self.pricing_model,
            provider_cost_adult_base: unit(self.provider_cost_adult_base),
            provider_cost_dog_base: unit(self.provider_cost_dog_base),
            margin_percentage: self
                .margin_percentage
                .clamp(-MAX_MARGIN_PERCENTAGE, MAX_MARGIN_PERCENTAGE),
            markup_adult: unit(self.markup_adult),
            markup_dog: unit(self.markup_dog),
            legacy_price_adult: unit(self.legacy_price_adult),
            legacy_price_dog: unit(self.legacy_price_dog),
            guests: self.guests,
            dogs: self.dogs,
        }
    }
}

/// Priced booking. `subtotal_adults + subtotal_dogs == total_amount` always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PricingResult {
    pub total_amount: Decimal,
    pub price_per_adult: Decimal,
    pub price_per_dog: Decimal,
    pub subtotal_adults: Decimal,
    pub subtotal_dogs: Decimal,
}

/// Round to cents, half away from zero. Always carries two decimal places
/// so amounts serialize as `"30.00"`, not `"30.0"`.
pub fn round2(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Round to whole euros, half away from zero
pub fn round0(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert an amount to cents for the payment processor.
///
/// Returns `None` only when the amount does not fit in an `i64`.
pub fn to_cents(amount: Decimal) -> Option<i64> {
    round2(amount).checked_mul(Decimal::ONE_HUNDRED)?.to_i64()
}

/// Convert cents back to a decimal amount
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Price a booking. Amounts beyond [`MAX_UNIT_AMOUNT`] are clamped first,
/// so this never panics.
pub fn calculate_price(input: &PricingInput) -> PricingResult {
    let input = &input.bounded();
    let guests = Decimal::from(input.guests);
    let dogs = Decimal::from(input.dogs);
    let provider_cost_total = input.provider_cost_total();

    let (total_amount, price_per_adult, price_per_dog) = match input.pricing_model {
        PricingModel::Percentage if provider_cost_total > Decimal::ZERO => {
            let multiplier = Decimal::ONE + input.margin_percentage / Decimal::ONE_HUNDRED;
            let total = round2(provider_cost_total * multiplier);
            let ratio = total / provider_cost_total;
            (
                total,
                round2(input.provider_cost_adult_base * ratio),
                round2(input.provider_cost_dog_base * ratio),
            )
        }
        PricingModel::Markup => (
            round2(provider_cost_total + input.markup_adult * guests + input.markup_dog * dogs),
            round2(input.provider_cost_adult_base + input.markup_adult),
            round2(input.provider_cost_dog_base + input.markup_dog),
        ),
        // Percentage without a cost basis lands here too
        PricingModel::Percentage | PricingModel::Legacy => legacy_prices(input, guests, dogs),
    };

    let (subtotal_adults, subtotal_dogs) = reconcile(
        total_amount,
        round2(price_per_adult * guests),
        round2(price_per_dog * dogs),
    );

    PricingResult {
        total_amount,
        price_per_adult,
        price_per_dog,
        subtotal_adults,
        subtotal_dogs,
    }
}

/// Total only
pub fn calculate_total(input: &PricingInput) -> Decimal {
    calculate_price(input).total_amount
}

fn legacy_prices(input: &PricingInput, guests: Decimal, dogs: Decimal) -> (Decimal, Decimal, Decimal) {
    let per_adult = input.legacy_price_adult;
    let per_dog = input.legacy_price_dog;
    (round2(per_adult * guests + per_dog * dogs), per_adult, per_dog)
}

/// Push the rounding difference into the larger subtotal so the pair sums to
/// `total` exactly. Ties go to adults.
fn reconcile(total: Decimal, adults: Decimal, dogs: Decimal) -> (Decimal, Decimal) {
    // 0.0001: below this the pair is already reconciled
    let epsilon = Decimal::new(1, 4);
    let cent = Decimal::new(1, 2);

    let diff = total - (adults + dogs);
    if diff.abs() <= epsilon {
        return (adults, dogs);
    }

    let adults_larger = adults.abs() >= dogs.abs();
    let (mut adults, mut dogs) = if adults_larger {
        (round2(adults + diff), dogs)
    } else {
        (adults, round2(dogs + diff))
    };

    if (total - (adults + dogs)).abs() > cent {
        if adults_larger {
            dogs = total - adults;
        } else {
            adults = total - dogs;
        }
    }

    (adults, dogs)
}

/// Forgiving deserializers for pricing fields that come from loosely typed
/// sources (database rows, browser forms).
pub(crate) mod lenient {
    use rust_decimal::Decimal;
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    pub(crate) enum LooseText {
        Text(String),
        Other(IgnoredAny),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LooseDecimal {
        Number(Decimal),
        Text(String),
        Other(IgnoredAny),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LooseCount {
        Count(u32),
        Float(f64),
        Text(String),
        Other(IgnoredAny),
    }

    pub(crate) fn decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        Ok(match LooseDecimal::deserialize(deserializer)? {
            LooseDecimal::Number(value) => value,
            LooseDecimal::Text(text) => text.trim().parse().unwrap_or(Decimal::ZERO),
            LooseDecimal::Other(_) => Decimal::ZERO,
        })
    }

    pub(crate) fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        Ok(match LooseCount::deserialize(deserializer)? {
            LooseCount::Count(value) => value,
            LooseCount::Float(value) => float_count(value),
            LooseCount::Text(text) => text.trim().parse::<f64>().map(float_count).unwrap_or(0),
            LooseCount::Other(_) => 0,
        })
    }

    fn float_count(value: f64) -> u32 {
        if value.is_finite() && value > 0.0 {
            value.trunc() as u32
        } else {
            0
        }
    }
}
