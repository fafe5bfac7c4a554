use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sqlx::sqlite::SqlitePool;

use super::extract::{ListParams, ValidatedJson};
use crate::error::ApiError;
use crate::models::{DataResponse, Hero, HeroUpdate, NewHero, PaginatedResponse};
use crate::services::heroes;

// GET /api/heroes/?page=1&per_page=10 - List heroes
pub async fn get_heroes(
    State(pool): State<SqlitePool>,
    ListParams(page): ListParams,
) -> Result<Json<PaginatedResponse<Hero>>, ApiError> {
    let (heroes, total) = heroes::list(&pool, page).await?;

    Ok(Json(PaginatedResponse {
        message: "Heroes retrieved successfully".to_string(),
        data: heroes,
        pagination: page.page_info(total),
    }))
}

// GET /api/heroes/:id - Get hero by ID
pub async fn get_hero_by_id(
    State(pool): State<SqlitePool>,
    Path(hero_id): Path<String>,
) -> Result<Json<DataResponse<Hero>>, ApiError> {
    let hero = heroes::get(&pool, &hero_id).await?;
    Ok(Json(DataResponse { data: hero }))
}

// POST /api/heroes/ - Create a hero
pub async fn create_hero(
    State(pool): State<SqlitePool>,
    ValidatedJson(body): ValidatedJson<NewHero>,
) -> Result<(StatusCode, Json<DataResponse<Hero>>), ApiError> {
    let hero = heroes::create(&pool, body).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: hero })))
}

// PATCH /api/heroes/:id - Update the given fields of a hero
pub async fn update_hero(
    State(pool): State<SqlitePool>,
    Path(hero_id): Path<String>,
    ValidatedJson(body): ValidatedJson<HeroUpdate>,
) -> Result<Json<DataResponse<Hero>>, ApiError> {
    let hero = heroes::update(&pool, &hero_id, body).await?;
    Ok(Json(DataResponse { data: hero }))
}

// DELETE /api/heroes/:id - Delete a hero (no request body)
pub async fn delete_hero(
    State(pool): State<SqlitePool>,
    Path(hero_id): Path<String>,
) -> Result<Json<bool>, ApiError> {
    heroes::delete(&pool, &hero_id).await?;
    Ok(Json(true))
}
