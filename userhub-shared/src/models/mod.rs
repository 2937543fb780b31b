/// Database models for Userhub
///
/// Each model owns the SQL for its table.
///
/// - `user`: managed user accounts (list, create, read, partial update, delete)
/// - `location`: shared named places and the user ↔ location association
/// - `ad`: ads authored by users, counted in the user list
///
/// # Example
///
/// ```no_run
/// use userhub_shared::models::user::User;
/// use userhub_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let total = User::count(&pool).await?;
/// let first_page = User::list_page(&pool, 10, 0).await?;
/// # Ok(())
/// # }
/// ```

pub mod ad;
pub mod location;
pub mod user;
