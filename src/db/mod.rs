use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions};

use crate::config::Config;
use crate::models::*;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open the pool; the database file is created on first run.
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect_with(options)
        .await
}

/// Single-connection in-memory database with the schema applied.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");

    MIGRATOR.run(&pool).await.expect("migrations");
    pool
}

// Hero queries
pub async fn count_heroes(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM heroes"#)
        .fetch_one(conn)
        .await
}

pub async fn list_heroes(conn: &mut SqliteConnection, page: Pagination) -> Result<Vec<Hero>, sqlx::Error> {
    sqlx::query_as::<_, Hero>(
        r#"SELECT id, name, type, difficulty FROM heroes
           ORDER BY rowid
           LIMIT ? OFFSET ?"#
    )
    .bind(page.sql_limit())
    .bind(page.offset)
    .fetch_all(conn)
    .await
}

pub async fn get_hero_by_id(conn: &mut SqliteConnection, hero_id: &str) -> Result<Option<Hero>, sqlx::Error> {
    sqlx::query_as::<_, Hero>(
        r#"SELECT id, name, type, difficulty FROM heroes WHERE id = ?"#
    )
    .bind(hero_id)
    .fetch_optional(conn)
    .await
}

pub async fn insert_hero(conn: &mut SqliteConnection, hero: &Hero) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO heroes (id, name, type, difficulty) VALUES (?, ?, ?, ?)"#
    )
    .bind(&hero.id)
    .bind(&hero.name)
    .bind(&hero.hero_type)
    .bind(&hero.difficulty)
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn update_hero(conn: &mut SqliteConnection, hero: &Hero) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"UPDATE heroes SET name = ?, type = ?, difficulty = ? WHERE id = ?"#
    )
    .bind(&hero.name)
    .bind(&hero.hero_type)
    .bind(&hero.difficulty)
    .bind(&hero.id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

pub async fn delete_hero(conn: &mut SqliteConnection, hero_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM heroes WHERE id = ?"#)
        .bind(hero_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

// Player queries
pub async fn count_players(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM players"#)
        .fetch_one(conn)
        .await
}

pub async fn list_players(conn: &mut SqliteConnection, page: Pagination) -> Result<Vec<PlayerRow>, sqlx::Error> {
    sqlx::query_as::<_, PlayerRow>(
        r#"SELECT id, username, rank FROM players
           ORDER BY rowid
           LIMIT ? OFFSET ?"#
    )
    .bind(page.sql_limit())
    .bind(page.offset)
    .fetch_all(conn)
    .await
}

pub async fn get_player_by_id(conn: &mut SqliteConnection, player_id: &str) -> Result<Option<PlayerRow>, sqlx::Error> {
    sqlx::query_as::<_, PlayerRow>(
        r#"SELECT id, username, rank FROM players WHERE id = ?"#
    )
    .bind(player_id)
    .fetch_optional(conn)
    .await
}

pub async fn insert_player(conn: &mut SqliteConnection, player: &PlayerRow) -> Result<(), sqlx::Error> {
    sqlx::query(r#"INSERT INTO players (id, username, rank) VALUES (?, ?, ?)"#)
        .bind(&player.id)
        .bind(&player.username)
        .bind(&player.rank)
        .execute(conn)
        .await?;

    Ok(())
}

pub async fn update_player(conn: &mut SqliteConnection, player: &PlayerRow) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"UPDATE players SET username = ?, rank = ? WHERE id = ?"#)
        .bind(&player.username)
        .bind(&player.rank)
        .bind(&player.id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete_player(conn: &mut SqliteConnection, player_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM players WHERE id = ?"#)
        .bind(player_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

// Favourite hero queries, ordered by when the hero was added
pub async fn get_favourite_heroes(conn: &mut SqliteConnection, player_id: &str) -> Result<Vec<Hero>, sqlx::Error> {
    sqlx::query_as::<_, Hero>(
        r#"SELECT h.id, h.name, h.type, h.difficulty
           FROM player_favourite_hero f
           JOIN heroes h ON h.id = f.hero_id
           WHERE f.player_id = ?
           ORDER BY f.rowid"#
    )
    .bind(player_id)
    .fetch_all(conn)
    .await
}

/// Favourites of every player on the given page of `list_players`.
pub async fn list_favourite_heroes_for_page(
    conn: &mut SqliteConnection,
    page: Pagination,
) -> Result<Vec<FavouriteHeroRow>, sqlx::Error> {
    sqlx::query_as::<_, FavouriteHeroRow>(
        r#"SELECT f.player_id, h.id, h.name, h.type, h.difficulty
           FROM player_favourite_hero f
           JOIN heroes h ON h.id = f.hero_id
           WHERE f.player_id IN (
               SELECT id FROM players ORDER BY rowid LIMIT ? OFFSET ?
           )
           ORDER BY f.rowid"#
    )
    .bind(page.sql_limit())
    .bind(page.offset)
    .fetch_all(conn)
    .await
}

/// Returns false when the pair is already present.
pub async fn insert_favourite_hero(
    conn: &mut SqliteConnection,
    player_id: &str,
    hero_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"INSERT INTO player_favourite_hero (player_id, hero_id) VALUES (?, ?)
           ON CONFLICT (player_id, hero_id) DO NOTHING"#
    )
    .bind(player_id)
    .bind(hero_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn delete_favourites_of_player(conn: &mut SqliteConnection, player_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM player_favourite_hero WHERE player_id = ?"#)
        .bind(player_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete_favourites_of_hero(conn: &mut SqliteConnection, hero_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM player_favourite_hero WHERE hero_id = ?"#)
        .bind(hero_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
