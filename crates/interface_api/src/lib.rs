//! HTTP API Layer
//!
//! This crate provides the REST API for group expenses and settle-up using
//! Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for groups, expenses and settlements
//! - **Store**: In-memory adapter behind the expense ports
//! - **Middleware**: Request ids, tracing, request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(Arc::new(InMemoryGroupStore::new()), config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod store;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, delete},
    middleware as axum_middleware,
};
use domain_expense::{BalanceCalculator, SettleUpService, SettlementPlanner};
use tower_http::cors::{CorsLayer, Any};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::middleware::log_requests;
use crate::handlers::{expenses, groups, health, settlements};
use crate::store::InMemoryGroupStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InMemoryGroupStore>,
    pub service: Arc<SettleUpService>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the settle-up service to the store using the configured policies
    pub fn new(store: Arc<InMemoryGroupStore>, config: ApiConfig) -> Self {
        let calculator = BalanceCalculator::new(config.currency)
            .with_unknown_member_policy(config.unknown_member_policy)
            .with_split_policy(config.split_policy);
        let planner = SettlementPlanner::new(config.settlement_tolerance);
        let service = SettleUpService::new(store.clone(), calculator, planner);

        Self {
            store,
            service: Arc::new(service),
            config,
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `store` - Group store backing every stateful route
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(store: Arc<InMemoryGroupStore>, config: ApiConfig) -> Router {
    let state = AppState::new(store, config);

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check));

    // Group routes
    let group_routes = Router::new()
        .route("/", post(groups::create_group).get(groups::list_groups))
        .route(
            "/:id",
            get(groups::get_group)
                .put(groups::update_group)
                .delete(groups::delete_group),
        )
        .route("/:id/members", post(groups::add_member))
        .route("/:id/members/:name", delete(groups::remove_member))
        .route("/:id/expenses", get(expenses::list_expenses).post(expenses::create_expense))
        .route("/:id/expenses/:expense_id", delete(expenses::delete_expense))
        .route("/:id/balances", get(settlements::get_balances))
        .route("/:id/settlements", get(settlements::get_settlements))
        .route("/:id/report", get(settlements::get_report))
        .route("/:id/settle", post(settlements::settle_group));

    let api_routes = Router::new()
        .route("/settle-up", post(settlements::settle_up))
        .nest("/groups", group_routes);

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(axum_middleware::from_fn(log_requests))
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
