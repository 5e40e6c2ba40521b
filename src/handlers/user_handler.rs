use actix_web::{delete, get, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::UpdateUserRequest,
        response::{DataResponse, MessageResponse},
    },
};

#[get("/all")]
pub async fn get_all_users(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let actor = state.auth_service.resolve_actor(&auth.0).await?;
    let users = state.user_service.get_all_users(&actor).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(users)))
}

#[get("/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let actor = state.auth_service.resolve_actor(&auth.0).await?;
    let user = state.user_service.get_user(&actor, &id).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(user)))
}

#[put("/{id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let actor = state.auth_service.resolve_actor(&auth.0).await?;
    let user = state
        .user_service
        .update_user(&actor, &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        msg: format!("User {} updated", user.username),
        data: user,
    }))
}

#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let actor = state.auth_service.resolve_actor(&auth.0).await?;
    let id = id.into_inner();
    state.user_service.delete_user(&actor, &id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        msg: format!("User {} deleted", id),
        data: id,
    }))
}

/// Mounted as a bare resource at `/seedBasicUsers` rather than under `/users`.
pub async fn seed_basic_users(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let actor = state.auth_service.resolve_actor(&auth.0).await?;
    let users = state.user_service.seed_basic_users(&actor).await?;
    Ok(HttpResponse::Created().json(MessageResponse {
        msg: format!("{} users seeded", users.len()),
        data: users,
    }))
}
