//! # Confirmation Emails
//!
//! Renders the transactional email a customer receives once a booking is
//! paid. Only content is produced here; delivery belongs to whichever mail
//! provider the deployment uses.

use crate::booking::CheckoutSummary;
use crate::format::{format_price, participants_label};
use serde::{Deserialize, Serialize};

/// Sender identity and links used in emails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailBranding {
    /// e.g. "Pawtrip"
    pub brand_name: String,
    /// Sender and reply-to address
    pub support_email: String,
    /// Public storefront URL
    pub base_url: String,
}

impl Default for EmailBranding {
    fn default() -> Self {
        Self {
            brand_name: "Pawtrip".to_string(),
            support_email: "info@pawtrip.it".to_string(),
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

/// A rendered email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationEmail {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl ConfirmationEmail {
    /// Render the booking confirmation for a paid checkout
    pub fn for_booking(summary: &CheckoutSummary, branding: &EmailBranding) -> Self {
        let subject = format!(
            "Conferma prenotazione: {} | {}",
            summary.product_name, branding.brand_name
        );
        let rows = summary_rows(summary);

        Self {
            from: format!("{} <{}>", branding.brand_name, branding.support_email),
            to: summary.customer.email.trim().to_string(),
            reply_to: branding.support_email.clone(),
            subject,
            text: render_text(summary, branding, &rows),
            html: render_html(summary, branding, &rows),
        }
    }
}

fn summary_rows(summary: &CheckoutSummary) -> Vec<(&'static str, String)> {
    let pricing = &summary.pricing;
    let mut rows = vec![("Esperienza", summary.product_name.clone())];

    if let Some(date) = summary.date {
        rows.push(("Data", date.format("%d/%m/%Y").to_string()));
    }
    rows.push(("Partecipanti", participants_label(summary.guests, summary.dogs)));

    if summary.guests > 0 {
        rows.push((
            "Adulti",
            format!(
                "{} × {} = {}",
                summary.guests,
                format_price(pricing.price_per_adult),
                format_price(pricing.subtotal_adults)
            ),
        ));
    }
    rows.push((
        "Cani",
        format!(
            "{} × {} = {}",
            summary.dogs,
            format_price(pricing.price_per_dog),
            format_price(pricing.subtotal_dogs)
        ),
    ));
    rows.push(("Totale pagato", format_price(pricing.total_amount)));
    rows.push(("Codice prenotazione", summary.booking_id.clone()));
    rows
}

fn render_text(summary: &CheckoutSummary, branding: &EmailBranding, rows: &[(&str, String)]) -> String {
    let mut out = format!(
        "Ciao {},\n\ngrazie per aver prenotato con {}! Ecco il riepilogo:\n\n",
        summary.customer.first_name.trim(),
        branding.brand_name
    );
    for (label, value) in rows {
        out.push_str(&format!("{}: {}\n", label, value));
    }
    out.push_str(&format!(
        "\nPer qualsiasi domanda scrivici a {}.\n\nA presto,\nIl team {}\n{}\n",
        branding.support_email, branding.brand_name, branding.base_url
    ));
    out
}

fn render_html(summary: &CheckoutSummary, branding: &EmailBranding, rows: &[(&str, String)]) -> String {
    let table_rows: String = rows
        .iter()
        .map(|(label, value)| {
            format!(
                "<tr><td style=\"padding: 6px 12px; color: #666;\">{}</td><td style=\"padding: 6px 12px;\"><strong>{}</strong></td></tr>",
                label,
                escape_html(value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{subject}</title></head>
<body style="font-family: system-ui; background: #f6f4ef; margin: 0; padding: 32px;">
    <div style="background: white; max-width: 560px; margin: 0 auto; padding: 40px; border-radius: 16px;">
        <h1 style="margin-top: 0;">Prenotazione confermata 🐾</h1>
        <p>Ciao {name},</p>
        <p>grazie per aver prenotato con {brand}! Ecco il riepilogo:</p>
        <table style="border-collapse: collapse; width: 100%;">
{rows}
        </table>
        <p style="color: #666;">Per qualsiasi domanda scrivici a <a href="mailto:{support}">{support}</a>.</p>
        <p>A presto,<br>Il team {brand}</p>
        <p><a href="{base_url}">{base_url}</a></p>
    </div>
</body>
</html>
"#,
        subject = escape_html(&summary.product_name),
        name = escape_html(summary.customer.first_name.trim()),
        brand = escape_html(&branding.brand_name),
        rows = table_rows,
        support = escape_html(&branding.support_email),
        base_url = escape_html(&branding.base_url),
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{BookingRequest, Customer};
    use crate::product::{Category, Product, ProductPricing};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn summary(first_name: &str, guests: u32) -> CheckoutSummary {
        let mut product = Product::new(
            "hike",
            "Trekking Dolomiti",
            Category::Experience,
            ProductPricing::percentage(dec!(10), dec!(5), dec!(20)),
        );
        if guests == 0 {
            product = product.dogs_only();
        }
        let request = BookingRequest::new(
            "hike",
            guests,
            1,
            Customer::new(first_name, "Rossi", "mario@example.it"),
        )
        .on(NaiveDate::from_ymd_opt(2026, 7, 3).unwrap());

        CheckoutSummary::build(&product, &request).unwrap()
    }

    #[test]
    fn test_confirmation_email() {
        let summary = summary("Mario", 2);
        let email = ConfirmationEmail::for_booking(&summary, &EmailBranding::default());

        assert_eq!(email.to, "mario@example.it");
        assert_eq!(email.from, "Pawtrip <info@pawtrip.it>");
        assert_eq!(email.subject, "Conferma prenotazione: Trekking Dolomiti | Pawtrip");
        assert!(email.text.contains("Ciao Mario"));
        assert!(email.text.contains("Data: 03/07/2026"));
        assert!(email.text.contains("Adulti: 2 × €12.00 = €24.00"));
        assert!(email.text.contains("Cani: 1 × €6.00 = €6.00"));
        assert!(email.text.contains("Totale pagato: €30.00"));
        assert!(email.html.contains(&summary.booking_id));
    }

    #[test]
    fn test_dog_only_email_has_no_adult_row() {
        let email = ConfirmationEmail::for_booking(&summary("Mario", 0), &EmailBranding::default());

        assert!(!email.text.contains("Adulti:"));
        assert!(email.text.contains("Partecipanti: 1 cane"));
    }

    #[test]
    fn test_customer_text_is_escaped() {
        let email = ConfirmationEmail::for_booking(&summary("<b>Mario</b>", 1), &EmailBranding::default());

        assert!(email.html.contains("&lt;b&gt;Mario&lt;/b&gt;"));
        assert!(!email.html.contains("<b>Mario</b>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"Tom & "Fido" l'amico <3"#),
            "Tom &amp; &quot;Fido&quot; l&#39;amico &lt;3"
        );
        assert_eq!(escape_html("Pawtrip"), "Pawtrip");
    }
}
