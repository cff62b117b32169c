use axum::{
    Router,
    middleware,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use diesel_migrations::MigrationHarness;
use tower_http::trace::TraceLayer;

use crate::{
    MIGRATIONS,
    auth::{
        login::{do_login, login_page},
        register::{do_register, register_page},
    },
    state::{AppState, DbPool, tx_commit_middleware},
    tournament::{
        scores::{reset_match, score_entry_page, submit_score},
        stableford::stableford_standings_page,
        standings::division_standings_page,
        view::{home, match_page, matches_page},
    },
};

pub fn create_app(pool: DbPool) -> Router {
    {
        let mut conn = pool.get().unwrap();
        conn.run_pending_migrations(MIGRATIONS).unwrap();
    }

    let key = match std::env::var("SECRET_KEY") {
        Ok(secret) => Key::derive_from(secret.as_bytes()),
        Err(_) => Key::generate(),
    };

    let state = AppState { pool, key };

    Router::new()
        .route("/", get(home))
        .route("/login", get(login_page).post(do_login))
        .route("/register", get(register_page).post(do_register))
        .route("/matches", get(matches_page))
        .route("/matches/:match_id", get(match_page))
        .route(
            "/matches/:match_id/scores",
            get(score_entry_page).post(submit_score),
        )
        .route("/matches/:match_id/reset", post(reset_match))
        .route("/standings/:division", get(division_standings_page))
        .route("/stableford", get(stableford_standings_page))
        .layer(middleware::from_fn(tx_commit_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
