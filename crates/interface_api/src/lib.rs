//! HTTP API Layer
//!
//! This crate provides the REST API for the lost-and-found core using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for items, claims, admin review and notifications
//! - **Middleware**: JWT authentication, access logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! Handlers never talk to the database directly. They go through the domain
//! ports held in [`Ports`], so the same router runs over PostgreSQL in
//! production and over the in-memory mocks in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(pool, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
    middleware as axum_middleware,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use domain_claims::{
    AdminReviewService, ClaimHistoryPort, ClaimLifecycleService, ClaimLogPort, NotificationInbox,
    NotificationPort,
};
use domain_items::ItemPort;
use domain_users::UserPort;
use infra_db::{
    PostgresClaimHistoryAdapter, PostgresClaimLogAdapter, PostgresItemAdapter,
    PostgresNotificationAdapter, PostgresUserAdapter,
};

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, access_log_middleware};
use crate::handlers::{admin, claims, health, items, notifications};

/// The domain ports the API runs against
#[derive(Clone)]
pub struct Ports {
    pub items: Arc<dyn ItemPort>,
    pub users: Arc<dyn UserPort>,
    pub notifications: Arc<dyn NotificationPort>,
    pub claim_logs: Arc<dyn ClaimLogPort>,
    pub history: Arc<dyn ClaimHistoryPort>,
}

impl Ports {
    /// PostgreSQL adapters sharing one pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            items: Arc::new(PostgresItemAdapter::new(pool.clone())),
            users: Arc::new(PostgresUserAdapter::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationAdapter::new(pool.clone())),
            claim_logs: Arc::new(PostgresClaimLogAdapter::new(pool.clone())),
            history: Arc::new(PostgresClaimHistoryAdapter::new(pool)),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ports: Ports,
    pub claims: Arc<ClaimLifecycleService>,
    pub reviews: Arc<AdminReviewService>,
    pub inbox: Arc<NotificationInbox>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the claim services on top of the given ports
    pub fn new(ports: Ports, config: ApiConfig) -> Self {
        let claims = Arc::new(ClaimLifecycleService::new(
            ports.items.clone(),
            ports.users.clone(),
            ports.notifications.clone(),
            ports.history.clone(),
        ));
        let reviews = Arc::new(
            AdminReviewService::new(
                claims.clone(),
                ports.items.clone(),
                ports.users.clone(),
                ports.claim_logs.clone(),
                ports.history.clone(),
            )
            .with_claim_log_limit(config.claim_log_limit),
        );
        let inbox = Arc::new(NotificationInbox::new(ports.notifications.clone()));

        Self {
            ports,
            claims,
            reviews,
            inbox,
            config,
        }
    }
}

/// Creates the main API router over PostgreSQL
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    create_router_with_state(AppState::new(Ports::postgres(pool), config))
}

/// Creates the main API router over an already wired state
pub fn create_router_with_state(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Item routes, including the claim lifecycle
    let item_routes = Router::new()
        .route("/", post(items::create_item).get(items::list_items))
        .route(
            "/:id",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route("/:id/comments", post(items::add_comment))
        .route("/:id/claim", post(claims::submit_claim).delete(claims::cancel_claim));

    // Admin review routes
    let admin_routes = Router::new()
        .route("/claims", get(admin::list_pending_claims))
        .route("/claims/:id/:action", post(admin::review_claim))
        .route("/claim-logs", get(admin::list_claim_logs))
        .route("/high-value-items", get(admin::list_high_value_items))
        .route("/items/:id/claim-history", get(admin::claim_history));

    // Notification inbox routes
    let notification_routes = Router::new()
        .route("/", get(notifications::list_notifications))
        .route("/:id/read", put(notifications::mark_read));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/items", item_routes)
        .nest("/admin", admin_routes)
        .nest("/notifications", notification_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), access_log_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
