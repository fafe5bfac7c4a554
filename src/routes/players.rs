use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sqlx::sqlite::SqlitePool;

use super::extract::{ListParams, ValidatedJson};
use crate::error::ApiError;
use crate::models::{
    DataResponse, NewFavouriteHero, NewPlayer, PaginatedResponse, Player, PlayerUpdate,
};
use crate::services::players;

// GET /api/players/?page=1&per_page=10 - List players with their favourite heroes
pub async fn get_players(
    State(pool): State<SqlitePool>,
    ListParams(page): ListParams,
) -> Result<Json<PaginatedResponse<Player>>, ApiError> {
    let (players, total) = players::list(&pool, page).await?;

    Ok(Json(PaginatedResponse {
        message: "Players retrieved successfully".to_string(),
        data: players,
        pagination: page.page_info(total),
    }))
}

// GET /api/players/:id - Get player by ID
pub async fn get_player_by_id(
    State(pool): State<SqlitePool>,
    Path(player_id): Path<String>,
) -> Result<Json<DataResponse<Player>>, ApiError> {
    let player = players::get(&pool, &player_id).await?;
    Ok(Json(DataResponse { data: player }))
}

// POST /api/players/ - Create a player
pub async fn create_player(
    State(pool): State<SqlitePool>,
    ValidatedJson(body): ValidatedJson<NewPlayer>,
) -> Result<(StatusCode, Json<DataResponse<Player>>), ApiError> {
    let player = players::create(&pool, body).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: player })))
}

// PATCH /api/players/:id - Update the given fields of a player
pub async fn update_player(
    State(pool): State<SqlitePool>,
    Path(player_id): Path<String>,
    ValidatedJson(body): ValidatedJson<PlayerUpdate>,
) -> Result<Json<DataResponse<Player>>, ApiError> {
    let player = players::update(&pool, &player_id, body).await?;
    Ok(Json(DataResponse { data: player }))
}

// DELETE /api/players/:id - Delete a player and its favourites
pub async fn delete_player(
    State(pool): State<SqlitePool>,
    Path(player_id): Path<String>,
) -> Result<Json<bool>, ApiError> {
    players::delete(&pool, &player_id).await?;
    Ok(Json(true))
}

// POST /api/players/:id/favourite-heroes - Add a hero to a player's favourites
pub async fn add_favourite_hero(
    State(pool): State<SqlitePool>,
    Path(player_id): Path<String>,
    ValidatedJson(body): ValidatedJson<NewFavouriteHero>,
) -> Result<Json<DataResponse<Player>>, ApiError> {
    let player = players::add_favourite_hero(&pool, &player_id, &body.hero_id).await?;
    Ok(Json(DataResponse { data: player }))
}
