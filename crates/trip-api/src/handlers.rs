//! # Request Handlers
//!
//! Axum request handlers for the storefront API.
//! Every amount returned here comes from `trip_core::calculate_price`, the
//! same code the browser runs through `trip-wasm`.

use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use trip_core::{
    format_price, format_price_from, format_price_rounded, to_cents, BookingError, BookingRequest,
    CatalogQuery, CheckoutSummary, ConfirmationEmail, PricingResult, Product, ProductSource,
};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Product plus the prices shown on its card
#[derive(Debug, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub dog_only: bool,
    pub minimum_price: Decimal,
    /// e.g. "€45"
    pub card_price: String,
    /// "/ cane" or "/ binomio"
    pub card_unit: String,
    /// e.g. "Da €44.50"
    pub price_from: String,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        let minimum_price = product.minimum_price();
        let (card_amount, unit) = product.price_and_unit_for_card();
        Self {
            dog_only: product.is_dog_only(),
            minimum_price,
            card_price: format_price_rounded(card_amount),
            card_unit: unit.to_string(),
            price_from: format_price_from(minimum_price),
            product,
        }
    }
}

/// Quote request
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub product_id: String,
    #[serde(default)]
    pub guests: u32,
    #[serde(default)]
    pub dogs: u32,
}

/// Quote response
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub product_id: String,
    pub guests: u32,
    pub dogs: u32,
    pub pricing: PricingResult,
    pub amount_total_cents: i64,
    /// e.g. "€30.00"
    pub total_display: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn booking_error_to_response(err: BookingError) -> ApiError {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "pawtrip",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// List active products, filtered and sorted
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let products = state.products.search(&query).await.map_err(|e| {
        error!("Failed to list products from {}: {}", state.products.source_name(), e);
        booking_error_to_response(e)
    })?;

    let views: Vec<ProductView> = products.into_iter().map(ProductView::from).collect();
    Ok(Json(serde_json::json!({
        "count": views.len(),
        "products": views,
    })))
}

/// Get single product by ID or slug
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<ProductView>, ApiError> {
    let product = state
        .products
        .require_product(&product_id)
        .await
        .map_err(booking_error_to_response)?;

    Ok(Json(ProductView::from(product)))
}

/// Authoritative price for a party
#[instrument(skip(state, request), fields(product_id = %request.product_id))]
pub async fn quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let product = state
        .products
        .require_product(&request.product_id)
        .await
        .map_err(booking_error_to_response)?;

    if !product.active {
        return Err(booking_error_to_response(BookingError::ProductUnavailable {
            product_id: product.id,
        }));
    }

    // Dog-only products never charge adults
    let guests = if product.is_dog_only() { 0 } else { request.guests };
    let pricing = product.quote(guests, request.dogs);
    let amount_total_cents = to_cents(pricing.total_amount).ok_or_else(|| {
        booking_error_to_response(BookingError::InvalidRequest(format!(
            "Amount out of range: {}",
            pricing.total_amount
        )))
    })?;

    Ok(Json(QuoteResponse {
        product_id: product.id,
        guests,
        dogs: request.dogs,
        total_display: format_price(pricing.total_amount),
        pricing,
        amount_total_cents,
    }))
}

/// Validate a booking and return the priced checkout summary
#[instrument(skip(state, request), fields(product_id = %request.product_id))]
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<CheckoutSummary>, ApiError> {
    let summary = build_summary(&state, &request).await?;

    info!(
        "Created checkout: booking={}, product={}, guests={}, dogs={}, total={}",
        summary.booking_id,
        summary.product_id,
        summary.guests,
        summary.dogs,
        format_price(summary.pricing.total_amount)
    );

    Ok(Json(summary))
}

/// Render the confirmation email a booking would produce
#[instrument(skip(state, request), fields(product_id = %request.product_id))]
pub async fn confirmation_preview(
    State(state): State<AppState>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<ConfirmationEmail>, ApiError> {
    let summary = build_summary(&state, &request).await?;
    Ok(Json(ConfirmationEmail::for_booking(&summary, &state.branding)))
}

async fn build_summary(state: &AppState, request: &BookingRequest) -> Result<CheckoutSummary, ApiError> {
    let product = state
        .products
        .require_product(&request.product_id)
        .await
        .map_err(booking_error_to_response)?;

    CheckoutSummary::build(&product, request).map_err(|e| {
        if !e.is_client_error() {
            error!("Failed to build checkout: {}", e);
        }
        booking_error_to_response(e)
    })
}
