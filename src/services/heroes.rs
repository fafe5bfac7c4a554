use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

use crate::db;
use crate::error::ApiError;
use crate::models::{Hero, HeroUpdate, NewHero, Pagination};

const HERO_NOT_FOUND: &str = "Hero not found";

pub async fn list(pool: &SqlitePool, page: Pagination) -> Result<(Vec<Hero>, i64), ApiError> {
    let mut tx = pool.begin().await?;

    let heroes = db::list_heroes(&mut tx, page).await?;
    let total = db::count_heroes(&mut tx).await?;

    tx.commit().await?;
    Ok((heroes, total))
}

pub async fn get(pool: &SqlitePool, hero_id: &str) -> Result<Hero, ApiError> {
    let mut tx = pool.begin().await?;

    let hero = db::get_hero_by_id(&mut tx, hero_id)
        .await?
        .ok_or(ApiError::NotFound(HERO_NOT_FOUND))?;

    tx.commit().await?;
    Ok(hero)
}

pub async fn create(pool: &SqlitePool, new_hero: NewHero) -> Result<Hero, ApiError> {
    let hero = Hero {
        id: Uuid::new_v4().to_string(),
        name: new_hero.name,
        hero_type: new_hero.hero_type,
        difficulty: new_hero.difficulty,
    };

    let mut tx = pool.begin().await?;
    db::insert_hero(&mut tx, &hero).await?;
    tx.commit().await?;

    tracing::info!(hero_id = %hero.id, name = %hero.name, "Created hero");
    Ok(hero)
}

pub async fn update(pool: &SqlitePool, hero_id: &str, changes: HeroUpdate) -> Result<Hero, ApiError> {
    let mut tx = pool.begin().await?;

    let mut hero = db::get_hero_by_id(&mut tx, hero_id)
        .await?
        .ok_or(ApiError::NotFound(HERO_NOT_FOUND))?;

    changes.apply_to(&mut hero);
    db::update_hero(&mut tx, &hero).await?;

    tx.commit().await?;
    tracing::debug!(hero_id = %hero.id, "Updated hero");
    Ok(hero)
}

/// Removes the hero from every player's favourites, then the hero itself.
pub async fn delete(pool: &SqlitePool, hero_id: &str) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;

    if db::get_hero_by_id(&mut tx, hero_id).await?.is_none() {
        return Err(ApiError::NotFound(HERO_NOT_FOUND));
    }

    let unlinked = db::delete_favourites_of_hero(&mut tx, hero_id).await?;
    db::delete_hero(&mut tx, hero_id).await?;

    tx.commit().await?;
    tracing::info!(hero_id, unlinked, "Deleted hero");
    Ok(())
}
