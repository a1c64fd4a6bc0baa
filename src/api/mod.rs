pub mod calculator;
pub mod commissions;
pub mod forecast;
pub mod health;
pub mod nudges;
pub mod partners;
pub mod referrals;

use crate::db::Repository;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
}

impl AppState {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/partners", post(partners::create_partner))
        .route("/v1/partners/:id", get(partners::get_partner))
        .route("/v1/partners/:id/forecast", get(forecast::get_forecast))
        .route("/v1/partners/:id/nudges", get(nudges::get_nudges))
        .route(
            "/v1/referrals",
            post(referrals::create_referral).get(referrals::list_referrals),
        )
        .route("/v1/referrals/:id", get(referrals::get_referral))
        .route("/v1/referrals/:id/stage", put(referrals::update_stage))
        .route(
            "/v1/referrals/:id/activity",
            post(referrals::append_activity),
        )
        .route("/v1/commissions", get(commissions::list_commissions))
        .route("/v1/commissions/:id", get(commissions::get_commission))
        .route(
            "/v1/commissions/:id/status",
            put(commissions::update_status),
        )
        .route(
            "/v1/commissions/calculate",
            post(calculator::calculate_commission),
        )
        .layer(cors)
        .with_state(state)
}
