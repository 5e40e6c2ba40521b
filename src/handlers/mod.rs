pub mod auth_handler;
pub mod health_handler;
pub mod public_handler;
pub mod quiz_handler;
pub mod user_handler;

use actix_web::{error::InternalError, web, HttpResponse};

use crate::{auth::AuthMiddleware, errors::ErrorResponse};

/// Mounts the health endpoints and the versioned API.
///
/// `/api/v1/public` and `/api/v1/auth` are open; `/users`, `/quizzes` and
/// `/seedBasicUsers` sit behind [`AuthMiddleware`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health_handler::health_check)
        .service(health_handler::health_check_ready)
        .service(health_handler::health_check_live)
        .service(
            web::scope("/api/v1")
                .service(health_handler::index)
                .service(
                    web::scope("/public")
                        .service(public_handler::get_all_quizzes)
                        .service(public_handler::get_average_score),
                )
                .service(
                    web::scope("/auth")
                        .service(auth_handler::login)
                        .service(auth_handler::register),
                )
                .service(
                    web::resource("/seedBasicUsers")
                        .wrap(AuthMiddleware)
                        .route(web::post().to(user_handler::seed_basic_users)),
                )
                .service(
                    web::scope("/users")
                        .wrap(AuthMiddleware)
                        .service(user_handler::get_all_users)
                        .service(user_handler::get_user)
                        .service(user_handler::update_user)
                        .service(user_handler::delete_user),
                )
                .service(
                    web::scope("/quizzes")
                        .wrap(AuthMiddleware)
                        .service(quiz_handler::create_quiz)
                        .service(quiz_handler::create_score)
                        .service(quiz_handler::create_participation)
                        .service(quiz_handler::get_user_answers)
                        .service(quiz_handler::create_answers)
                        .service(quiz_handler::delete_quiz_legacy)
                        .service(quiz_handler::get_quiz)
                        .service(quiz_handler::update_quiz)
                        .service(quiz_handler::delete_quiz),
                ),
        );
}

/// Malformed JSON bodies get the same `{ "error": ... }` envelope as every other failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse {
            error: format!("Invalid request body: {}", err),
        });
        InternalError::from_response(err, response).into()
    })
}
