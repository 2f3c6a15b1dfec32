use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    state::AppState,
    users::{
        dto::{
            ChangePasswordRequest, CreateUserRequest, ListUsersQuery, ListUsersResponse,
            MessageResponse, UpdateUserRequest, UserRecord,
        },
        error::UserResult,
        repo_types::{DeleteAck, UpdateAck},
        services::UserService,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/:id/change-password", post(change_password))
}

#[instrument(skip(svc))]
pub async fn list_users(
    State(svc): State<UserService>,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> UserResult<Json<ListUsersResponse>> {
    let Query(query) = query?;
    Ok(Json(svc.get_users(query).await?))
}

#[instrument(skip(svc))]
pub async fn get_user(
    State(svc): State<UserService>,
    Path(id): Path<String>,
) -> UserResult<Json<UserRecord>> {
    Ok(Json(svc.get_user(&id).await?))
}

#[instrument(skip(svc, payload))]
pub async fn create_user(
    State(svc): State<UserService>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> UserResult<Json<UserRecord>> {
    let Json(payload) = payload?;
    Ok(Json(svc.create_user(payload).await?))
}

#[instrument(skip(svc, payload))]
pub async fn update_user(
    State(svc): State<UserService>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> UserResult<Json<UpdateAck>> {
    let Json(payload) = payload?;
    Ok(Json(svc.update_user(&id, payload).await?))
}

#[instrument(skip(svc))]
pub async fn delete_user(
    State(svc): State<UserService>,
    Path(id): Path<String>,
) -> UserResult<Json<DeleteAck>> {
    Ok(Json(svc.delete_user(&id).await?))
}

#[instrument(skip(svc, payload))]
pub async fn change_password(
    State(svc): State<UserService>,
    Path(id): Path<String>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> UserResult<Json<MessageResponse>> {
    let Json(payload) = payload?;
    Ok(Json(svc.change_password(&id, payload).await?))
}
