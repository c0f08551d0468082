//! # Routes
//!
//! Axum router configuration for the storefront API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Catalog:
///   - GET  /api/v1/products - List active products (category, search, dog_only, sort)
///   - GET  /api/v1/products/{id} - Get product by ID or slug
///
/// - Pricing & checkout:
///   - POST /api/v1/quote - Authoritative price for a party
///   - POST /api/v1/checkout - Validate and price a booking
///   - POST /api/v1/checkout/confirmation-preview - Render confirmation email
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Catalog
        .route("/products", get(handlers::list_products))
        .route("/products/{product_id}", get(handlers::get_product))
        // Pricing
        .route("/quote", post(handlers::quote))
        // Checkout
        .route("/checkout", post(handlers::create_checkout))
        .route(
            "/checkout/confirmation-preview",
            post(handlers::confirmation_preview),
        );

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // API v1
        .nest("/api/v1", api_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use trip_core::{Category, Product, ProductCatalog, ProductPricing};

    fn test_router() -> Router {
        let catalog = ProductCatalog::new()
            .with_product(
                Product::new(
                    "trekking-dolomiti",
                    "Trekking Dolomiti",
                    Category::Experience,
                    ProductPricing::percentage(dec!(10), dec!(5), dec!(20)),
                )
                .with_slug("trekking")
                .with_location("Cortina"),
            )
            .with_product(
                Product::new(
                    "agility-base",
                    "Agility base",
                    Category::Class,
                    ProductPricing::legacy(dec!(40), dec!(15)),
                )
                .dogs_only(),
            )
            .with_product(
                Product::new(
                    "sup-garda",
                    "SUP sul Garda",
                    Category::Experience,
                    ProductPricing::legacy(dec!(35), dec!(10)),
                )
                .inactive(),
            );

        create_router(AppState::with_source(AppConfig::default(), Arc::new(catalog)))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn booking(product_id: &str, guests: u32, dogs: u32) -> Value {
        json!({
            "product_id": product_id,
            "guests": guests,
            "dogs": dogs,
            "date": "2026-06-14",
            "customer": {
                "first_name": "Giulia",
                "last_name": "Bianchi",
                "email": "giulia@example.it"
            }
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(test_router(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_list_products() {
        let (status, body) = send(test_router(), get("/api/v1/products")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["products"][0]["id"], "trekking-dolomiti");
        assert_eq!(body["products"][0]["card_unit"], "/ binomio");
        assert_eq!(body["products"][1]["card_price"], "€15");
    }

    #[tokio::test]
    async fn test_list_products_with_filters() {
        let (status, body) = send(
            test_router(),
            get("/api/v1/products?category=class&dog_only=true&sort=price_asc"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["products"][0]["id"], "agility-base");

        let (_, body) = send(test_router(), get("/api/v1/products?search=cortina")).await;
        assert_eq!(body["count"], 1);
    }

    #[tokio::test]
    async fn test_get_product_by_slug() {
        let (status, body) = send(test_router(), get("/api/v1/products/trekking")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "trekking-dolomiti");
        assert_eq!(body["minimum_price"], "18.00");

        let (status, body) = send(test_router(), get("/api/v1/products/missing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
    }

    #[tokio::test]
    async fn test_quote() {
        let (status, body) = send(
            test_router(),
            post_json(
                "/api/v1/quote",
                json!({"product_id": "trekking-dolomiti", "guests": 2, "dogs": 1}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pricing"]["total_amount"], "30.00");
        assert_eq!(body["pricing"]["subtotal_adults"], "24.00");
        assert_eq!(body["pricing"]["subtotal_dogs"], "6.00");
        assert_eq!(body["amount_total_cents"], 3000);
        assert_eq!(body["total_display"], "€30.00");
    }

    #[tokio::test]
    async fn test_quote_dog_only_ignores_guests() {
        let (status, body) = send(
            test_router(),
            post_json(
                "/api/v1/quote",
                json!({"product_id": "agility-base", "guests": 3, "dogs": 1}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["guests"], 0);
        assert_eq!(body["amount_total_cents"], 1500);
    }

    #[tokio::test]
    async fn test_quote_inactive_product() {
        let (status, _) = send(
            test_router(),
            post_json("/api/v1/quote", json!({"product_id": "sup-garda", "guests": 1, "dogs": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_checkout() {
        let (status, body) = send(
            test_router(),
            post_json("/api/v1/checkout", booking("trekking-dolomiti", 2, 1)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["amount_total_cents"], 3000);
        assert_eq!(body["currency"], "eur");
        assert_eq!(body["line_items"][0]["unit_amount_cents"], 3000);
        assert_eq!(body["line_items"][0]["description"], "2 adulti, 1 cane");
        assert!(body["booking_id"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_checkout_rejects_bad_participants() {
        let (status, body) = send(
            test_router(),
            post_json("/api/v1/checkout", booking("trekking-dolomiti", 2, 0)),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], 422);
    }

    #[tokio::test]
    async fn test_confirmation_preview() {
        let (status, body) = send(
            test_router(),
            post_json(
                "/api/v1/checkout/confirmation-preview",
                booking("agility-base", 0, 2),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["to"], "giulia@example.it");
        assert!(body["text"].as_str().unwrap().contains("Totale pagato: €30.00"));
    }
}
