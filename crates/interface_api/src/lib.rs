//! HTTP API Layer
//!
//! This crate provides the REST API for the product catalog using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for categories, products and health
//! - **Middleware**: Request logging and request ids
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses, bare 404 for misses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let db = CatalogContext::new(pool).with_interceptor(AuditInterceptor);
//! let app = create_router(db, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    Router,
    routing::{get, post, put, delete},
    middleware as axum_middleware,
};
use infra_db::CatalogContext;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::middleware::request_logging;
use crate::handlers::{category, health, product};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: CatalogContext,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `db` - Catalog data-access context
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(db: CatalogContext, config: ApiConfig) -> Router {
    let state = AppState { db, config };

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let category_routes = Router::new()
        .route("/", get(category::list_categories))
        .route("/withproductsplit", get(category::list_with_products_split))
        .route("/:id", get(category::get_category));

    let product_routes = Router::new()
        .route("/", post(product::create_product))
        .route("/deleted", get(product::list_deleted))
        .route("/by-color/:color", get(product::find_by_color))
        .route("/bulk-update-price", put(product::bulk_update_price))
        .route("/bulk-delete", delete(product::bulk_delete))
        .route("/sp-insert", post(product::sp_insert))
        .route("/:id", get(product::get_product).put(product::update_product))
        .route("/:id/hard-delete", delete(product::hard_delete))
        .route("/:id/history", get(product::get_history))
        .route("/:id/as-of/:date", get(product::get_as_of))
        .route("/:id/sp-update", put(product::sp_update))
        .route("/:id/sp-delete", delete(product::sp_delete))
        .route("/:id/restore", put(product::restore_product));

    let api_routes = Router::new()
        .route("/getproducts", get(product::list_products))
        .route("/getproductsn", get(product::list_projected))
        .nest("/categories", category_routes)
        .nest("/products", product_routes)
        .layer(axum_middleware::from_fn(request_logging));

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
