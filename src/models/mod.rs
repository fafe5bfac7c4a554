use serde::{Deserialize, Serialize};

pub mod pagination;
pub mod validation;

pub use pagination::{ListQuery, PageInfo, Pagination};
pub use validation::{Validate, ValidationError};

use validation::{optional_non_empty, required_non_empty};

/// Hero row, also used as the API representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Hero {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub hero_type: String,
    pub difficulty: String,
}

/// Row from the players table, without favourites
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlayerRow {
    pub id: String,
    pub username: String,
    pub rank: String,
}

impl PlayerRow {
    pub fn into_player(self, favourite_heroes: Vec<Hero>) -> Player {
        Player {
            id: self.id,
            username: self.username,
            rank: self.rank,
            favourite_heroes,
        }
    }
}

/// Player with its favourite heroes resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: String,
    pub username: String,
    pub rank: String,
    pub favourite_heroes: Vec<Hero>,
}

/// Favourite hero joined with the player it belongs to
#[derive(Debug, sqlx::FromRow)]
pub struct FavouriteHeroRow {
    pub player_id: String,
    #[sqlx(flatten)]
    pub hero: Hero,
}

/// Body of POST /api/heroes
#[derive(Debug, Deserialize)]
pub struct NewHero {
    pub name: String,
    #[serde(rename = "type")]
    pub hero_type: String,
    pub difficulty: String,
}

impl Validate for NewHero {
    fn validate(&self) -> Result<(), ValidationError> {
        required_non_empty("name", &self.name)?;
        required_non_empty("type", &self.hero_type)?;
        required_non_empty("difficulty", &self.difficulty)
    }
}

/// Body of PATCH /api/heroes/{id}. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct HeroUpdate {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub hero_type: Option<String>,
    pub difficulty: Option<String>,
}

impl HeroUpdate {
    pub fn apply_to(self, hero: &mut Hero) {
        if let Some(name) = self.name {
            hero.name = name;
        }
        if let Some(hero_type) = self.hero_type {
            hero.hero_type = hero_type;
        }
        if let Some(difficulty) = self.difficulty {
            hero.difficulty = difficulty;
        }
    }
}

impl Validate for HeroUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        optional_non_empty("name", self.name.as_deref())?;
        optional_non_empty("type", self.hero_type.as_deref())?;
        optional_non_empty("difficulty", self.difficulty.as_deref())
    }
}

/// Body of POST /api/players
#[derive(Debug, Deserialize)]
pub struct NewPlayer {
    pub username: String,
    pub rank: String,
}

impl Validate for NewPlayer {
    fn validate(&self) -> Result<(), ValidationError> {
        required_non_empty("username", &self.username)?;
        required_non_empty("rank", &self.rank)
    }
}

/// Body of PATCH /api/players/{id}. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct PlayerUpdate {
    pub username: Option<String>,
    pub rank: Option<String>,
}

impl PlayerUpdate {
    pub fn apply_to(self, player: &mut PlayerRow) {
        if let Some(username) = self.username {
            player.username = username;
        }
        if let Some(rank) = self.rank {
            player.rank = rank;
        }
    }
}

impl Validate for PlayerUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        optional_non_empty("username", self.username.as_deref())?;
        optional_non_empty("rank", self.rank.as_deref())
    }
}

/// Body of POST /api/players/{id}/favourite-heroes
#[derive(Debug, Deserialize)]
pub struct NewFavouriteHero {
    pub hero_id: String,
}

impl Validate for NewFavouriteHero {
    fn validate(&self) -> Result<(), ValidationError> {
        required_non_empty("hero_id", &self.hero_id)
    }
}

/// Response wrapper for single-item endpoints
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Response wrapper for list endpoints
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub message: String,
    pub data: Vec<T>,
    pub pagination: PageInfo,
}
