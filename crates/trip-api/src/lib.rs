//! # trip-api
//!
//! HTTP API layer for pawtrip-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for the catalog, quotes and checkout
//! - Confirmation email preview
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/v1/products` | List products |
//! | GET | `/api/v1/products/{id}` | Get product |
//! | POST | `/api/v1/quote` | Price a party |
//! | POST | `/api/v1/checkout` | Create checkout summary |
//! | POST | `/api/v1/checkout/confirmation-preview` | Render confirmation email |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState, StartupError};
