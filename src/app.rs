use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(handlers::PAGE_PATH, get(handlers::reward_page))
        .route("/signin_reward/claim/", post(handlers::claim))
        .route("/api/state", get(handlers::get_state).post(handlers::update_state))
        .route("/pkg/:file", get(handlers::pkg_file))
        .with_state(state)
}
