/// Database layer for Userhub
///
/// - `pool`: PostgreSQL connection pool with a startup health check
/// - `migrations`: schema migrations embedded from `migrations/`
///
/// Table models live in the crate-level `models` module.

pub mod migrations;
pub mod pool;
