/// Ad model
///
/// Ads are authored by users and managed outside this service. Userhub only
/// needs to count them per author for the user list.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE ads (
///     id BIGSERIAL PRIMARY KEY,
///     author_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
///     name VARCHAR(255) NOT NULL,
///     price INTEGER NOT NULL DEFAULT 0,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// An ad posted by a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ad {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    pub price: i32,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an ad
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAd {
    pub author_id: i64,
    pub name: String,
    pub price: i32,
}

impl Ad {
    /// Inserts a new ad
    ///
    /// # Errors
    ///
    /// Returns an error if the author does not exist or the database
    /// connection fails.
    pub async fn create(pool: &PgPool, data: CreateAd) -> Result<Self, sqlx::Error> {
        let ad = sqlx::query_as::<_, Ad>(
            r#"
            INSERT INTO ads (author_id, name, price)
            VALUES ($1, $2, $3)
            RETURNING id, author_id, name, price, created_at
            "#,
        )
        .bind(data.author_id)
        .bind(data.name)
        .bind(data.price)
        .fetch_one(pool)
        .await?;

        Ok(ad)
    }

    /// Counts the ads written by one user
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn count_by_author(pool: &PgPool, author_id: i64) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ads WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
