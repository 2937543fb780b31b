/// API route handlers
///
/// - `health`: Health check endpoint
/// - `users`: User list, create, retrieve, partial update and delete

pub mod health;
pub mod users;
