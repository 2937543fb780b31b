/// User endpoints
///
/// Plain CRUD over the `users` table with locations resolved by name.
///
/// # Endpoints
///
/// - `GET /users/?page=<n>` - List users, ordered by username
/// - `POST /users/` - Create user
/// - `GET /users/:id/` - Retrieve user
/// - `PATCH /users/:id/` - Partial update
/// - `DELETE /users/:id/` - Delete user

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath},
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use userhub_shared::{
    models::user::{CreateUser, UpdateUser, User, UserSummary},
    pagination::Paginator,
};

/// Query string for the list endpoint
///
/// `page` stays a string so junk values fall back to the first page instead
/// of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<String>,
}

/// One user in the list response
#[derive(Debug, Serialize)]
pub struct UserListItem {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub age: i32,
    pub ads_count: i64,
    pub location: Vec<String>,
}

impl From<UserSummary> for UserListItem {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            age: user.age,
            ads_count: user.ads_count,
            location: user.locations,
        }
    }
}

/// List users response
#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    /// Users on the returned page
    pub users: Vec<UserListItem>,

    /// Number of the page actually returned (not the page count)
    pub pages: u64,

    /// Number of users across all pages
    pub total: u64,
}

/// Create user request; every key is required
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub password: String,
    pub age: i32,
    pub location: Vec<String>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            age: req.age,
            role: req.role,
            locations: req.location,
        }
    }
}

/// Partial update request; absent keys are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub role: Option<String>,

    /// Location names to add; existing locations are never removed
    pub location: Option<Vec<String>>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            age: req.age,
            role: req.role,
            locations: req.location,
        }
    }
}

/// Full user representation returned by create and retrieve
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub age: i32,
    pub location: Vec<String>,
}

impl UserResponse {
    fn new(user: User, location: Vec<String>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            age: user.age,
            location,
        }
    }
}

/// Partial update response
#[derive(Debug, Serialize)]
pub struct UpdateUserResponse {
    pub id: i64,
    pub username: String,
}

/// List users
///
/// # Endpoint
///
/// ```text
/// GET /users/?page=2
/// ```
///
/// # Response
///
/// ```json
/// {
///   "users": [
///     {
///       "id": 4,
///       "username": "bob",
///       "first_name": "Bob",
///       "last_name": "Smith",
///       "role": "member",
///       "age": 20,
///       "ads_count": 3,
///       "location": ["Moscow"]
///     }
///   ],
///   "pages": 2,
///   "total": 14
/// }
/// ```
///
/// A missing or non-numeric `page` yields page 1; any number outside the
/// valid range yields the last page. Never fails on bad input.
pub async fn list_users(
    State(state): State<AppState>,
    query: Option<Query<ListUsersQuery>>,
) -> ApiResult<Json<ListUsersResponse>> {
    let requested = query.as_ref().and_then(|Query(q)| q.page.as_deref());

    let total = u64::try_from(User::count(&state.db).await?).unwrap_or_default();
    let page = Paginator::new(total, state.page_size()).get_page(requested);

    let users = User::list_page(&state.db, page.limit(), page.offset()).await?;

    tracing::debug!(
        page = page.number,
        returned = users.len(),
        total,
        "Listed users"
    );

    Ok(Json(ListUsersResponse {
        users: users.into_iter().map(UserListItem::from).collect(),
        pages: page.number,
        total,
    }))
}

/// Create user
///
/// # Endpoint
///
/// ```text
/// POST /users/
/// Content-Type: application/json
///
/// {
///   "username": "bob",
///   "first_name": "B",
///   "last_name": "C",
///   "role": "user",
///   "password": "x",
///   "age": 20,
///   "location": ["NY"]
/// }
/// ```
///
/// # Response (201)
///
/// ```json
/// {"id": 1, "username": "bob", "first_name": "B", "last_name": "C",
///  "role": "user", "age": 20, "location": ["NY"]}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: a key is missing or the body is not valid JSON
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = User::create(&state.db, req.into()).await?;
    let location = User::location_names(&state.db, user.id).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User created");

    Ok((StatusCode::CREATED, Json(UserResponse::new(user, location))))
}

/// Retrieve user
///
/// # Endpoint
///
/// ```text
/// GET /users/1/
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no user with this ID
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<UserResponse>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::user_not_found(id))?;
    let location = User::location_names(&state.db, user.id).await?;

    Ok(Json(UserResponse::new(user, location)))
}

/// Partial update
///
/// # Endpoint
///
/// ```text
/// PATCH /users/1/
/// Content-Type: application/json
///
/// {"age": 30, "location": ["Kazan"]}
/// ```
///
/// # Response
///
/// ```json
/// {"id": 1, "username": "bob"}
/// ```
///
/// Only keys present in the body are written. `location` adds to the user's
/// locations and never removes any.
///
/// # Errors
///
/// - `400 Bad Request`: body is not valid JSON or a value has the wrong type
/// - `404 Not Found`: no user with this ID
pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> ApiResult<Json<UpdateUserResponse>> {
    let user = User::update(&state.db, id, req.into())
        .await?
        .ok_or_else(|| ApiError::user_not_found(id))?;

    tracing::info!(user_id = user.id, "User updated");

    Ok(Json(UpdateUserResponse {
        id: user.id,
        username: user.username,
    }))
}

/// Delete user
///
/// # Endpoint
///
/// ```text
/// DELETE /users/1/
/// ```
///
/// Answers `204 No Content` with an empty body. The user's locations stay.
///
/// # Errors
///
/// - `404 Not Found`: no user with this ID
pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    if !User::delete(&state.db, id).await? {
        return Err(ApiError::user_not_found(id));
    }

    tracing::info!(user_id = id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
