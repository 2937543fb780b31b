/// Location model and the user ↔ location association
///
/// Locations are shared between users and identified by name. They are
/// created on demand when a user references a name that does not exist yet,
/// and are never deleted by this service.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE locations (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(200) NOT NULL,
///     CONSTRAINT locations_name_key UNIQUE (name)
/// );
///
/// CREATE TABLE user_locations (
///     user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
///     location_id BIGINT NOT NULL REFERENCES locations (id) ON DELETE CASCADE,
///     PRIMARY KEY (user_id, location_id)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use userhub_shared::models::location::Location;
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, user_id: i64) -> Result<(), sqlx::Error> {
/// let moscow = Location::resolve_or_create(&pool, "Moscow").await?;
/// let again = Location::resolve_or_create(&pool, "Moscow").await?;
/// assert_eq!(moscow.id, again.id);
///
/// Location::attach_to_user(&pool, user_id, moscow.id).await?;
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use tracing::debug;

/// A named place shared across users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Location {
    /// Unique location ID
    pub id: i64,

    /// Natural key, unique across all locations
    pub name: String,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Location {
    /// Finds the location called `name`, creating it if it does not exist
    ///
    /// This is a single `INSERT .. ON CONFLICT` statement, so two concurrent
    /// callers with the same name always end up with the same row. The no-op
    /// `DO UPDATE` is what makes `RETURNING` yield the existing row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn resolve_or_create(pool: &PgPool, name: &str) -> Result<Self, sqlx::Error> {
        let location = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (name)
            VALUES ($1)
            ON CONFLICT ON CONSTRAINT locations_name_key
            DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(pool)
        .await?;

        debug!(location_id = location.id, name, "Resolved location");
        Ok(location)
    }

    /// Finds a location by its exact name
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Self>, sqlx::Error> {
        let location = sqlx::query_as::<_, Location>(
            "SELECT id, name FROM locations WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(location)
    }

    /// Links a location to a user
    ///
    /// Linking a pair that is already linked is a no-op.
    ///
    /// # Returns
    ///
    /// True if a new association row was written
    ///
    /// # Errors
    ///
    /// Returns an error if either ID does not exist or the database
    /// connection fails.
    pub async fn attach_to_user(
        pool: &PgPool,
        user_id: i64,
        location_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_locations (user_id, location_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, location_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(location_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Resolves every name in `names` and links each location to the user
    ///
    /// Existing links are kept; nothing is ever unlinked. The writes are not
    /// wrapped in a transaction.
    ///
    /// # Errors
    ///
    /// Returns the first database error; locations linked before it stay
    /// linked.
    pub async fn attach_names_to_user(
        pool: &PgPool,
        user_id: i64,
        names: &[String],
    ) -> Result<(), sqlx::Error> {
        for name in names {
            let location = Self::resolve_or_create(pool, name).await?;
            Self::attach_to_user(pool, user_id, location.id).await?;
        }

        Ok(())
    }

    /// Lists the locations linked to a user, oldest location first
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let locations = sqlx::query_as::<_, Location>(
            r#"
            SELECT l.id, l.name
            FROM locations l
            JOIN user_locations ul ON ul.location_id = l.id
            WHERE ul.user_id = $1
            ORDER BY l.id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(locations)
    }

    /// Counts all locations
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM locations")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
