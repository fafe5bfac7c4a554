use std::collections::HashMap;

use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

use crate::db;
use crate::error::ApiError;
use crate::models::{Hero, NewPlayer, Pagination, Player, PlayerRow, PlayerUpdate};

const PLAYER_NOT_FOUND: &str = "Player not found";
const HERO_NOT_FOUND: &str = "Hero not found";
const ALREADY_FAVOURITE: &str = "Hero is already in player's favourites";

pub async fn list(pool: &SqlitePool, page: Pagination) -> Result<(Vec<Player>, i64), ApiError> {
    let mut tx = pool.begin().await?;

    let rows = db::list_players(&mut tx, page).await?;
    let total = db::count_players(&mut tx).await?;

    let mut favourites: HashMap<String, Vec<Hero>> = HashMap::new();
    for row in db::list_favourite_heroes_for_page(&mut tx, page).await? {
        favourites.entry(row.player_id).or_default().push(row.hero);
    }

    tx.commit().await?;

    let players = rows
        .into_iter()
        .map(|row| {
            let heroes = favourites.remove(&row.id).unwrap_or_default();
            row.into_player(heroes)
        })
        .collect();

    Ok((players, total))
}

pub async fn get(pool: &SqlitePool, player_id: &str) -> Result<Player, ApiError> {
    let mut tx = pool.begin().await?;

    let row = db::get_player_by_id(&mut tx, player_id)
        .await?
        .ok_or(ApiError::NotFound(PLAYER_NOT_FOUND))?;
    let heroes = db::get_favourite_heroes(&mut tx, player_id).await?;

    tx.commit().await?;
    Ok(row.into_player(heroes))
}

pub async fn create(pool: &SqlitePool, new_player: NewPlayer) -> Result<Player, ApiError> {
    let row = PlayerRow {
        id: Uuid::new_v4().to_string(),
        username: new_player.username,
        rank: new_player.rank,
    };

    let mut tx = pool.begin().await?;
    db::insert_player(&mut tx, &row).await?;
    tx.commit().await?;

    tracing::info!(player_id = %row.id, username = %row.username, "Created player");
    Ok(row.into_player(Vec::new()))
}

pub async fn update(pool: &SqlitePool, player_id: &str, changes: PlayerUpdate) -> Result<Player, ApiError> {
    let mut tx = pool.begin().await?;

    let mut row = db::get_player_by_id(&mut tx, player_id)
        .await?
        .ok_or(ApiError::NotFound(PLAYER_NOT_FOUND))?;

    changes.apply_to(&mut row);
    db::update_player(&mut tx, &row).await?;
    let heroes = db::get_favourite_heroes(&mut tx, player_id).await?;

    tx.commit().await?;
    tracing::debug!(player_id = %row.id, "Updated player");
    Ok(row.into_player(heroes))
}

/// Association rows go first; the schema does not cascade.
pub async fn delete(pool: &SqlitePool, player_id: &str) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;

    if db::get_player_by_id(&mut tx, player_id).await?.is_none() {
        return Err(ApiError::NotFound(PLAYER_NOT_FOUND));
    }

    let unlinked = db::delete_favourites_of_player(&mut tx, player_id).await?;
    db::delete_player(&mut tx, player_id).await?;

    tx.commit().await?;
    tracing::info!(player_id, unlinked, "Deleted player");
    Ok(())
}

/// Checks run in order: player exists, hero exists, pair not yet present.
pub async fn add_favourite_hero(pool: &SqlitePool, player_id: &str, hero_id: &str) -> Result<Player, ApiError> {
    let mut tx = pool.begin().await?;

    let row = db::get_player_by_id(&mut tx, player_id)
        .await?
        .ok_or(ApiError::NotFound(PLAYER_NOT_FOUND))?;

    if db::get_hero_by_id(&mut tx, hero_id).await?.is_none() {
        return Err(ApiError::NotFound(HERO_NOT_FOUND));
    }

    match db::insert_favourite_hero(&mut tx, player_id, hero_id).await {
        Ok(true) => {}
        Ok(false) => return Err(ApiError::Conflict(ALREADY_FAVOURITE)),
        // Player or hero removed since the lookups above
        Err(sqlx::Error::Database(err)) if err.is_foreign_key_violation() => {
            return Err(ApiError::NotFound(PLAYER_NOT_FOUND));
        }
        Err(err) => return Err(err.into()),
    }

    let heroes = db::get_favourite_heroes(&mut tx, player_id).await?;

    tx.commit().await?;
    tracing::info!(player_id, hero_id, "Added favourite hero");
    Ok(row.into_player(heroes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewHero;
    use crate::services::heroes;

    async fn seed_player(pool: &SqlitePool, username: &str) -> Player {
        create(
            pool,
            NewPlayer {
                username: username.to_string(),
                rank: "Legend".to_string(),
            },
        )
        .await
        .unwrap()
    }

    async fn seed_hero(pool: &SqlitePool, name: &str) -> Hero {
        heroes::create(
            pool,
            NewHero {
                name: name.to_string(),
                hero_type: "Strength".to_string(),
                difficulty: "Easy".to_string(),
            },
        )
        .await
        .unwrap()
    }

    async fn favourite_rows(pool: &SqlitePool, player_id: &str, hero_id: &str) -> i64 {
        sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM player_favourite_hero WHERE player_id = ? AND hero_id = ?"#,
        )
        .bind(player_id)
        .bind(hero_id)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn created_player_has_no_favourites() {
        let pool = db::test_pool().await;
        let player = seed_player(&pool, "dendi").await;

        assert!(!player.id.is_empty());
        assert!(player.favourite_heroes.is_empty());
        assert_eq!(get(&pool, &player.id).await.unwrap(), player);
    }

    #[tokio::test]
    async fn favourites_are_resolved_in_order() {
        let pool = db::test_pool().await;
        let player = seed_player(&pool, "puppey").await;
        let axe = seed_hero(&pool, "Axe").await;
        let io = seed_hero(&pool, "Io").await;

        add_favourite_hero(&pool, &player.id, &io.id).await.unwrap();
        let updated = add_favourite_hero(&pool, &player.id, &axe.id).await.unwrap();
        assert_eq!(updated.favourite_heroes, vec![io.clone(), axe.clone()]);

        let fetched = get(&pool, &player.id).await.unwrap();
        assert_eq!(fetched.favourite_heroes, vec![io, axe]);
    }

    #[tokio::test]
    async fn duplicate_favourite_conflicts_and_keeps_one_row() {
        let pool = db::test_pool().await;
        let player = seed_player(&pool, "miracle").await;
        let hero = seed_hero(&pool, "Invoker").await;

        add_favourite_hero(&pool, &player.id, &hero.id).await.unwrap();
        let second = add_favourite_hero(&pool, &player.id, &hero.id).await;

        assert!(matches!(second, Err(ApiError::Conflict(ALREADY_FAVOURITE))));
        assert_eq!(favourite_rows(&pool, &player.id, &hero.id).await, 1);
    }

    #[tokio::test]
    async fn favourite_checks_player_before_hero_before_duplicate() {
        let pool = db::test_pool().await;
        let player = seed_player(&pool, "n0tail").await;
        let hero = seed_hero(&pool, "Io").await;
        add_favourite_hero(&pool, &player.id, &hero.id).await.unwrap();

        assert!(matches!(
            add_favourite_hero(&pool, "ghost", "also-ghost").await,
            Err(ApiError::NotFound(PLAYER_NOT_FOUND))
        ));
        assert!(matches!(
            add_favourite_hero(&pool, "ghost", &hero.id).await,
            Err(ApiError::NotFound(PLAYER_NOT_FOUND))
        ));
        assert!(matches!(
            add_favourite_hero(&pool, &player.id, "also-ghost").await,
            Err(ApiError::NotFound(HERO_NOT_FOUND))
        ));
    }

    #[tokio::test]
    async fn delete_removes_player_and_associations() {
        let pool = db::test_pool().await;
        let player = seed_player(&pool, "ceb").await;
        let hero = seed_hero(&pool, "Axe").await;
        add_favourite_hero(&pool, &player.id, &hero.id).await.unwrap();

        delete(&pool, &player.id).await.unwrap();

        assert_eq!(favourite_rows(&pool, &player.id, &hero.id).await, 0);
        assert!(matches!(get(&pool, &player.id).await, Err(ApiError::NotFound(_))));
        // The hero itself is untouched
        assert!(heroes::get(&pool, &hero.id).await.is_ok());
    }

    #[tokio::test]
    async fn delete_unknown_player_is_not_found() {
        let pool = db::test_pool().await;
        assert!(matches!(delete(&pool, "nobody").await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn deleting_hero_drops_it_from_favourites() {
        let pool = db::test_pool().await;
        let player = seed_player(&pool, "topson").await;
        let hero = seed_hero(&pool, "Monkey King").await;
        add_favourite_hero(&pool, &player.id, &hero.id).await.unwrap();

        heroes::delete(&pool, &hero.id).await.unwrap();

        let fetched = get(&pool, &player.id).await.unwrap();
        assert!(fetched.favourite_heroes.is_empty());
    }

    #[tokio::test]
    async fn update_changes_only_given_fields_and_keeps_favourites() {
        let pool = db::test_pool().await;
        let player = seed_player(&pool, "sumail").await;
        let hero = seed_hero(&pool, "Storm Spirit").await;
        add_favourite_hero(&pool, &player.id, &hero.id).await.unwrap();

        let changes = PlayerUpdate {
            rank: Some("Immortal".to_string()),
            ..Default::default()
        };
        let updated = update(&pool, &player.id, changes).await.unwrap();

        assert_eq!(updated.username, "sumail");
        assert_eq!(updated.rank, "Immortal");
        assert_eq!(updated.favourite_heroes, vec![hero]);

        let unchanged = update(&pool, &player.id, PlayerUpdate::default()).await.unwrap();
        assert_eq!(unchanged, updated);
    }

    #[tokio::test]
    async fn list_attaches_favourites_per_player() {
        let pool = db::test_pool().await;
        let first = seed_player(&pool, "first").await;
        let second = seed_player(&pool, "second").await;
        let third = seed_player(&pool, "third").await;
        let hero = seed_hero(&pool, "Axe").await;
        add_favourite_hero(&pool, &first.id, &hero.id).await.unwrap();
        add_favourite_hero(&pool, &third.id, &hero.id).await.unwrap();

        let (players, total) = list(&pool, Pagination::new(1, 10)).await.unwrap();
        assert_eq!(total, 3);
        let ids: Vec<&str> = players.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, [first.id.as_str(), second.id.as_str(), third.id.as_str()]);
        assert_eq!(players[0].favourite_heroes.len(), 1);
        assert!(players[1].favourite_heroes.is_empty());
        assert_eq!(players[2].favourite_heroes.len(), 1);

        let (page_two, _) = list(&pool, Pagination::new(2, 2)).await.unwrap();
        assert_eq!(page_two.len(), 1);
        assert_eq!(page_two[0].favourite_heroes, vec![hero]);
    }
}
