use axum::{
    routing::{get, post},
    Router,
};
use sqlx::sqlite::SqlitePool;

mod extract;
pub mod health;
pub mod heroes;
pub mod players;

/// Health and `/api` routes. Collection paths answer with and without the
/// trailing slash.
pub fn api_router() -> Router<SqlitePool> {
    Router::new()
        .route("/health", get(health::health_check))

        // Hero endpoints
        .route("/api/heroes", get(heroes::get_heroes).post(heroes::create_hero))
        .route("/api/heroes/", get(heroes::get_heroes).post(heroes::create_hero))
        .route(
            "/api/heroes/{id}",
            get(heroes::get_hero_by_id)
                .patch(heroes::update_hero)
                .delete(heroes::delete_hero),
        )

        // Player endpoints
        .route("/api/players", get(players::get_players).post(players::create_player))
        .route("/api/players/", get(players::get_players).post(players::create_player))
        .route(
            "/api/players/{id}",
            get(players::get_player_by_id)
                .patch(players::update_player)
                .delete(players::delete_player),
        )
        .route("/api/players/{id}/favourite-heroes", post(players::add_favourite_hero))
}
