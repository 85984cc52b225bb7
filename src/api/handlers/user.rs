use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreateUserRequest, UpdateUserRequest},
    responses::UserResponse,
};
use crate::domain::models::user::{NewUser, UserPatch};
use std::sync::Arc;
use crate::error::AppError;
use tracing::info;

pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_service.list_users().await?;
    let views: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(views))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_service.get_user(&id).await?;
    Ok(Json(UserResponse::from(user)))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let created = state
        .user_service
        .create_user(NewUser {
            name: payload.name,
            email: payload.email,
            phone: payload.phone.filter(|p| !p.is_empty()),
        })
        .await?;

    info!("User created: {}", created.id);
    Ok((StatusCode::CREATED, Json(UserResponse::from(created))))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let updated = state
        .user_service
        .update_user(
            &id,
            UserPatch {
                name: payload.name,
                email: payload.email,
                phone: payload.phone,
            },
        )
        .await?;

    info!("User updated: {}", updated.id);
    Ok(Json(UserResponse::from(updated)))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.user_service.delete_user(&id).await?;

    info!("User deleted: {}", id);
    Ok(StatusCode::NO_CONTENT)
}
