use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::response::DataResponse};

#[get("/all")]
pub async fn get_all_quizzes(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list_public().await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(quizzes)))
}

#[get("/{id}")]
pub async fn get_average_score(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let average = state.quiz_service.average_score(&id).await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(average)))
}
