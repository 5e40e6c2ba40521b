use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, models::dto::response::DataResponse};

const ROUTES: [&str; 15] = [
    "Welcome! Here are all the available routes",
    "Home: GET /api/v1/",
    "Get Quizzes (no auth): GET /api/v1/public/all",
    "Get Quiz Average Score (no auth): GET /api/v1/public/:id",
    "Seed basic users (admin only): POST /api/v1/seedBasicUsers",
    "Login: POST /api/v1/auth/login",
    "Register: POST /api/v1/auth/register",
    "Get All Users (admin only): GET /api/v1/users/all",
    "Get/Put/Del User by ID: /api/v1/users/:id",
    "Create Quiz (admin only): POST /api/v1/quizzes/create",
    "Get/Del/Put Quiz: /api/v1/quizzes/:id",
    "Create Score: POST /api/v1/quizzes/scores",
    "Create Participation: POST /api/v1/quizzes/participation",
    "Get User Answers: GET /api/v1/quizzes/userAnswers",
    "Create User Answers: POST /api/v1/quizzes/createAnswers",
];

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(DataResponse::new(ROUTES))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
pub async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let mongodb = match &state.db {
        Some(db) => match db.health_check().await {
            Ok(()) => "ok",
            Err(e) => {
                log::warn!("Readiness check failed: {}", e);
                "error"
            }
        },
        None => "not_configured",
    };
    let ready = mongodb != "error";

    let response = serde_json::json!({
        "status": if ready { "ready" } else { "not_ready" },
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "mongodb": mongodb
        }
    });

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[get("/health/live")]
pub async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;

        let req = test::TestRequest::get().uri("/health").to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_index_lists_routes() {
        let app = test::init_service(App::new().service(index)).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let routes = body["data"].as_array().unwrap();
        assert_eq!(routes.len(), ROUTES.len());
        assert!(routes
            .iter()
            .any(|r| r.as_str().unwrap().contains("/public/all")));
    }
}
