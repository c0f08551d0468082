//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the product source, configuration, and email branding.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use trip_core::{BookingError, EmailBranding, ProductCatalog, SharedProductSource};

/// Startup failures (bad config, unreadable catalog)
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid listen address {addr}: {source}")]
    InvalidAddress {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("Failed to read catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {source}")]
    CatalogParse { path: PathBuf, source: BookingError },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Public storefront URL
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Explicit catalog file; searched in `config/` when unset
    pub catalog_path: Option<PathBuf>,
    /// Brand shown in emails
    pub brand_name: String,
    /// Sender/reply-to for emails
    pub support_email: String,
}

impl AppConfig {
    /// Load from environment variables (and `.env` if present)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Missing keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT").and_then(|p| p.parse().ok()).unwrap_or(8080),
            base_url: lookup("BASE_URL").unwrap_or_else(|| "http://localhost:8080".to_string()),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            catalog_path: lookup("CATALOG_PATH").map(PathBuf::from),
            brand_name: lookup("BRAND_NAME").unwrap_or_else(|| "Pawtrip".to_string()),
            support_email: lookup("SUPPORT_EMAIL").unwrap_or_else(|| "info@pawtrip.it".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, StartupError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|source| StartupError::InvalidAddress { addr, source })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Branding for transactional emails
    pub fn branding(&self) -> EmailBranding {
        EmailBranding {
            brand_name: self.brand_name.clone(),
            support_email: self.support_email.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Where products come from
    pub products: SharedProductSource,
    /// Application config
    pub config: AppConfig,
    /// Email branding derived from config
    pub branding: EmailBranding,
}

impl AppState {
    /// Create AppState from environment, loading the TOML catalog
    pub fn new() -> Result<Self, StartupError> {
        let config = AppConfig::from_env();
        let catalog = load_product_catalog(config.catalog_path.as_deref())?;
        Ok(Self::with_source(config, Arc::new(catalog)))
    }

    /// Create AppState around an existing product source
    pub fn with_source(config: AppConfig, products: SharedProductSource) -> Self {
        let branding = config.branding();
        Self {
            products,
            config,
            branding,
        }
    }
}

/// Load product catalog from config file
fn load_product_catalog(explicit: Option<&std::path::Path>) -> Result<ProductCatalog, StartupError> {
    if let Some(path) = explicit {
        return read_catalog(path);
    }

    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        let path = std::path::Path::new(path);
        if path.exists() {
            return read_catalog(path);
        }
    }

    // Return empty catalog if no config found
    tracing::warn!("No product catalog found, using empty catalog");
    Ok(ProductCatalog::new())
}

fn read_catalog(path: &std::path::Path) -> Result<ProductCatalog, StartupError> {
    let content = std::fs::read_to_string(path).map_err(|source| StartupError::CatalogRead {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = ProductCatalog::from_toml(&content).map_err(|source| StartupError::CatalogParse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Loaded {} products from {}", catalog.len(), path.display());
    Ok(catalog)
}
