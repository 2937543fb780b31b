/// User model and database operations
///
/// This module provides the User model and the CRUD operations behind the
/// `/users` endpoints. Users are linked to shared locations through the
/// `user_locations` table and own zero or more ads.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     username VARCHAR(150) NOT NULL,
///     password VARCHAR(255) NOT NULL,
///     first_name VARCHAR(150) NOT NULL,
///     last_name VARCHAR(150) NOT NULL,
///     age INTEGER NOT NULL,
///     role VARCHAR(50) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Usernames are not unique and passwords are stored exactly as given.
///
/// # Example
///
/// ```no_run
/// use userhub_shared::models::user::{CreateUser, User};
/// use userhub_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     username: "bob".to_string(),
///     password: "x".to_string(),
///     first_name: "B".to_string(),
///     last_name: "C".to_string(),
///     age: 20,
///     role: "user".to_string(),
///     locations: vec!["NY".to_string()],
/// }).await?;
///
/// let names = User::location_names(&pool, user.id).await?;
/// assert_eq!(names, vec!["NY".to_string()]);
/// # Ok(())
/// # }
/// ```

use crate::models::location::Location;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;

/// User model representing one managed account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID, assigned by the database
    pub id: i64,

    /// Login name (not unique)
    pub username: String,

    /// Password as supplied by the client
    pub password: String,

    pub first_name: String,

    pub last_name: String,

    pub age: i32,

    /// Free-form role name, e.g. "member" or "admin"
    pub role: String,

    /// When the user was created
    pub created_at: DateTime<Utc>,

    /// When any scalar field was last changed
    pub updated_at: DateTime<Utc>,
}

/// One row of the user list, with related counts already aggregated
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub age: i32,

    /// Number of ads authored by the user
    pub ads_count: i64,

    /// Names of linked locations, oldest location first
    pub locations: Vec<String>,
}

/// Input for creating a new user
///
/// Every location name is resolved (or created) and linked to the new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub role: String,
    pub locations: Vec<String>,
}

/// Input for a partial update
///
/// Only `Some` fields are written. `locations` adds links; it never removes
/// the ones the user already has.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub role: Option<String>,
    pub locations: Option<Vec<String>>,
}

const USER_COLUMNS: &str =
    "id, username, password, first_name, last_name, age, role, created_at, updated_at";

impl User {
    /// Creates a new user and links its locations
    ///
    /// The user row is inserted first; each location name is then resolved
    /// with [`Location::resolve_or_create`] and linked. These writes do not
    /// share a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, password, first_name, last_name, age, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(data.username)
        .bind(data.password)
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.age)
        .bind(data.role)
        .fetch_one(pool)
        .await?;

        Location::attach_names_to_user(pool, user.id, &data.locations).await?;

        debug!(user_id = user.id, locations = data.locations.len(), "Created user");
        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Applies a partial update
    ///
    /// Only `Some` fields in `data` are written; `updated_at` is always
    /// refreshed. When `data.locations` is present each name is resolved and
    /// added to the user's locations.
    ///
    /// # Returns
    ///
    /// The updated user, or None if no user has this ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use userhub_shared::models::user::{UpdateUser, User};
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool, user_id: i64) -> Result<(), sqlx::Error> {
    /// let update = UpdateUser {
    ///     age: Some(30),
    ///     ..Default::default()
    /// };
    ///
    /// if let Some(user) = User::update(&pool, user_id, update).await? {
    ///     println!("{} is now {}", user.username, user.age);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build the SET list from whichever fields are present
        let mut query = String::from("UPDATE users SET updated_at = NOW()");
        let mut bind_count = 1;

        let text_columns = [
            ("username", data.username.is_some()),
            ("password", data.password.is_some()),
            ("first_name", data.first_name.is_some()),
            ("last_name", data.last_name.is_some()),
        ];
        for (column, present) in text_columns {
            if present {
                bind_count += 1;
                query.push_str(&format!(", {column} = ${bind_count}"));
            }
        }
        if data.age.is_some() {
            bind_count += 1;
            query.push_str(&format!(", age = ${bind_count}"));
        }
        if data.role.is_some() {
            bind_count += 1;
            query.push_str(&format!(", role = ${bind_count}"));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {USER_COLUMNS}"));

        // Bind in the same order the placeholders were pushed
        let mut q = sqlx::query_as::<_, User>(&query).bind(id);

        for value in [data.username, data.password, data.first_name, data.last_name]
            .into_iter()
            .flatten()
        {
            q = q.bind(value);
        }
        if let Some(age) = data.age {
            q = q.bind(age);
        }
        if let Some(role) = data.role {
            q = q.bind(role);
        }

        let Some(user) = q.fetch_optional(pool).await? else {
            return Ok(None);
        };

        if let Some(names) = data.locations {
            Location::attach_names_to_user(pool, user.id, &names).await?;
        }

        debug!(user_id = user.id, "Updated user");
        Ok(Some(user))
    }

    /// Deletes a user by ID
    ///
    /// Location links and the user's ads go with it; the locations
    /// themselves stay.
    ///
    /// # Returns
    ///
    /// True if a user was deleted, false if it didn't exist
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists the names of a user's locations, oldest location first
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn location_names(pool: &PgPool, id: i64) -> Result<Vec<String>, sqlx::Error> {
        let locations = Location::list_for_user(pool, id).await?;

        Ok(locations.into_iter().map(|location| location.name).collect())
    }

    /// Lists one slice of users ordered by username
    ///
    /// Ties on username are broken by ID so pages never overlap. Ad counts
    /// and location names are aggregated in the same query.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `limit` - Maximum number of users to return
    /// * `offset` - Number of users to skip
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use userhub_shared::models::user::User;
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
    /// // Second page of ten
    /// let users = User::list_page(&pool, 10, 10).await?;
    /// for user in users {
    ///     println!("{} has {} ads", user.username, user.ads_count);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_page(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserSummary>, sqlx::Error> {
        let users = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT u.id, u.username, u.first_name, u.last_name, u.role, u.age,
                   (SELECT COUNT(*) FROM ads a WHERE a.author_id = u.id) AS ads_count,
                   COALESCE(
                       (SELECT ARRAY_AGG(l.name::TEXT ORDER BY l.id)
                        FROM user_locations ul
                        JOIN locations l ON l.id = ul.location_id
                        WHERE ul.user_id = u.id),
                       ARRAY[]::TEXT[]
                   ) AS locations
            FROM users u
            ORDER BY u.username ASC, u.id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Counts total number of users
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
