use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/login", get(handlers::show_login).post(handlers::submit_login))
        .route("/logout", post(handlers::submit_logout))
        .route("/signup", post(handlers::submit_signup))
        .route("/cards/signup", post(handlers::card_signup))
        .route("/unregister", post(handlers::unregister))
        .route("/api/view", get(handlers::get_view))
        .with_state(state)
}
