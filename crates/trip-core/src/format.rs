//! # Price Formatting
//!
//! Display strings for prices on cards, product pages and emails.
//! The storefront is Italian and prices are always in euro.

use crate::pricing::{round0, round2};
use rust_decimal::Decimal;

/// `€12.50`
pub fn format_price(amount: Decimal) -> String {
    format!("€{:.2}", round2(amount))
}

/// `Da €12.50`, or `Da €0` for free/unpriced products
pub fn format_price_from(amount: Decimal) -> String {
    if amount <= Decimal::ZERO {
        "Da €0".to_string()
    } else {
        format!("Da {}", format_price(amount))
    }
}

/// `€13` (nearest whole euro)
pub fn format_price_rounded(amount: Decimal) -> String {
    format!("€{}", round0(amount).normalize())
}

/// `Da €13`, or `Da €0` for free/unpriced products
pub fn format_price_from_rounded(amount: Decimal) -> String {
    if amount <= Decimal::ZERO {
        "Da €0".to_string()
    } else {
        format!("Da {}", format_price_rounded(amount))
    }
}

/// Italian participant summary, e.g. `2 adulti, 1 cane`.
/// Adults are left out when there are none (dog-only classes).
pub fn participants_label(guests: u32, dogs: u32) -> String {
    let dogs_label = match dogs {
        1 => "1 cane".to_string(),
        n => format!("{} cani", n),
    };

    match guests {
        0 => dogs_label,
        1 => format!("1 adulto, {}", dogs_label),
        n => format!("{} adulti, {}", n, dogs_label),
    }
}
