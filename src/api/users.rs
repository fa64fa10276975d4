//! User management endpoints

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde_json::Value;
use tracing::{debug, info};

use super::middleware::{RequireAdmin, RequireUser};
use super::resources::UserResource;
use super::state::AppState;
use super::types::{ApiError, Json, UserInput, UserListQuery, UserListResponse};
use crate::domain::{Operation, ResourceShape};

/// Create the users router, mounted under `/api`
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireUser(identity): RequireUser,
    query: Result<Query<UserListQuery>, QueryRejection>,
) -> Result<axum::Json<UserListResponse<UserResource>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let filter = query.into_filter()?;

    debug!(user_id = %identity.user().id(), page = filter.page(), "Listing users");

    let users = state.user_service.list(&filter).await?;
    let total_items = state.user_service.count(&filter).await?;

    Ok(axum::Json(UserListResponse {
        items: users.iter().map(UserResource::from).collect(),
        total_items,
        page: filter.page(),
        items_per_page: filter.per_page(),
    }))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(id): Path<String>,
) -> Result<axum::Json<UserResource>, ApiError> {
    debug!(user_id = %id, "Getting user");

    let user = state.user_service.require(&id).await?;

    Ok(axum::Json(UserResource::from(&user)))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(identity): RequireAdmin,
    Json(input): Json<UserInput>,
) -> Result<(StatusCode, axum::Json<UserResource>), ApiError> {
    let request = input.into_create_request()?;
    let user = state.user_service.create(request).await?;

    info!(
        user_id = %user.id(),
        created_by = %identity.identifier(),
        "User created"
    );

    Ok((StatusCode::CREATED, axum::Json(UserResource::from(&user))))
}

/// PATCH /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(identity): RequireAdmin,
    Path(id): Path<String>,
    Json(input): Json<UserInput>,
) -> Result<axum::Json<UserResource>, ApiError> {
    let request = input.into_update_request()?;
    let user = state.user_service.update(&id, request).await?;

    info!(
        user_id = %user.id(),
        updated_by = %identity.identifier(),
        "User updated"
    );

    Ok(axum::Json(UserResource::from(&user)))
}

/// DELETE /api/users/{id}
///
/// Marks the user as deleted and answers with its final state.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(identity): RequireAdmin,
    Path(id): Path<String>,
) -> Result<axum::Json<Value>, ApiError> {
    let user = state.user_service.require(&id).await?;
    let operation = Operation::new("delete_user").with_output(ResourceShape::User);

    let resource = state
        .soft_delete_processor
        .process(Box::new(user), &operation)
        .await?;

    info!(user_id = %id, deleted_by = %identity.identifier(), "User deleted");

    Ok(axum::Json(resource.to_json()?))
}
