use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{
            CreateAnswersRequest, CreateParticipationRequest, CreateQuizRequest,
            CreateScoreRequest, UpdateQuizRequest, UserAnswersQuery,
        },
        response::{DataResponse, MessageResponse},
    },
};

#[post("/create")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let actor = state.auth_service.resolve_actor(&auth.0).await?;
    let quiz = state
        .quiz_service
        .create_quiz(&actor, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(MessageResponse {
        msg: format!("Quiz {} created", quiz.name),
        data: quiz,
    }))
}

#[post("/scores")]
pub async fn create_score(
    state: web::Data<AppState>,
    request: web::Json<CreateScoreRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let actor = state.auth_service.resolve_actor(&auth.0).await?;
    let score = state
        .quiz_service
        .record_score(&actor, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(DataResponse::new(score)))
}

#[post("/participation")]
pub async fn create_participation(
    state: web::Data<AppState>,
    request: web::Json<CreateParticipationRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let actor = state.auth_service.resolve_actor(&auth.0).await?;
    let participation = state
        .quiz_service
        .record_participation(&actor, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(DataResponse::new(participation)))
}

#[get("/userAnswers")]
pub async fn get_user_answers(
    state: web::Data<AppState>,
    query: web::Query<UserAnswersQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let actor = state.auth_service.resolve_actor(&auth.0).await?;
    let answers = state
        .quiz_service
        .user_answers(&actor, query.quiz_id.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(answers)))
}

#[post("/createAnswers")]
pub async fn create_answers(
    state: web::Data<AppState>,
    request: web::Json<CreateAnswersRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let actor = state.auth_service.resolve_actor(&auth.0).await?;
    let answers = state
        .quiz_service
        .create_answers(&actor, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(DataResponse::new(answers)))
}

#[delete("/delete/{id}")]
pub async fn delete_quiz_legacy(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    remove_quiz(state, id.into_inner(), auth).await
}

#[get("/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    // Any authenticated account may read; the lookup still rejects deleted accounts.
    state.auth_service.resolve_actor(&auth.0).await?;
    let quiz = state.quiz_service.get_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(quiz)))
}

#[put("/{id}")]
pub async fn update_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let actor = state.auth_service.resolve_actor(&auth.0).await?;
    let quiz = state
        .quiz_service
        .update_quiz(&actor, &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        msg: format!("Quiz {} updated", quiz.name),
        data: quiz,
    }))
}

#[delete("/{id}")]
pub async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    remove_quiz(state, id.into_inner(), auth).await
}

async fn remove_quiz(
    state: web::Data<AppState>,
    id: String,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let actor = state.auth_service.resolve_actor(&auth.0).await?;
    state.quiz_service.delete_quiz(&actor, &id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        msg: format!("Quiz {} deleted", id),
        data: id,
    }))
}
