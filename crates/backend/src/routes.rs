use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{api, system};

/// Configure all application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // A001 Cost sheets
        // ========================================
        .route(
            "/api/cost-sheets",
            get(api::handlers::a001_cost_sheet::list_paginated)
                .post(api::handlers::a001_cost_sheet::create),
        )
        .route(
            "/api/cost-sheets/check-style",
            get(api::handlers::a001_cost_sheet::check_style),
        )
        .route(
            "/api/cost-sheets/:id",
            get(api::handlers::a001_cost_sheet::get_by_id)
                .put(api::handlers::a001_cost_sheet::update)
                .delete(api::handlers::a001_cost_sheet::delete),
        )
        // ========================================
        // A002 TNA schedules
        // ========================================
        .route(
            "/api/tna-schedules",
            get(api::handlers::a002_tna_schedule::list_paginated)
                .post(api::handlers::a002_tna_schedule::upsert),
        )
        .route(
            "/api/tna-schedules/:id",
            get(api::handlers::a002_tna_schedule::get_by_id)
                .delete(api::handlers::a002_tna_schedule::delete),
        )
}
