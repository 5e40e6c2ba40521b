use std::{env, path::PathBuf};

use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::password::{BCRYPT_COST, MIN_BCRYPT_COST},
    errors::{AppError, AppResult},
};

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";
const DEFAULT_SEED_USER_PASSWORD: &str = "password123";
const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Clone, Debug)]
pub struct Config {
    pub app_env: String,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: Option<String>,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    /// Password given to accounts created by the seed endpoint.
    pub seed_user_password: SecretString,
    /// bcrypt cost for new password hashes.
    pub password_cost: u32,
    pub api_base_url: String,
    pub session_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "quiz-app".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok(),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
            seed_user_password: SecretString::from(
                env::var("SEED_USER_PASSWORD")
                    .unwrap_or_else(|_| DEFAULT_SEED_USER_PASSWORD.to_string()),
            ),
            password_cost: env::var("BCRYPT_COST")
                .ok()
                .and_then(|c| c.parse().ok())
                .filter(|c| (MIN_BCRYPT_COST..=31).contains(c))
                .unwrap_or(BCRYPT_COST),
            api_base_url: env::var("QUIZ_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api/v1".to_string()),
            session_file: env::var("QUIZ_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".quiz-session.json")),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Rejects the development JWT secret, secrets too short to sign with and
    /// the development seed password.
    pub fn validate_for_production(&self) -> AppResult<()> {
        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::InternalError(
                "JWT_SECRET is using the default value; set it to a secure random string"
                    .to_string(),
            ));
        }

        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET is too short ({}); it must be at least {} characters",
                jwt_secret.len(),
                MIN_JWT_SECRET_LEN
            )));
        }

        if self.seed_user_password.expose_secret() == DEFAULT_SEED_USER_PASSWORD {
            return Err(AppError::InternalError(
                "SEED_USER_PASSWORD is using the default value; set it before seeding users"
                    .to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            app_env: "test".to_string(),
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quiz-app-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: None,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            seed_user_password: SecretString::from("seed-password".to_string()),
            password_cost: MIN_BCRYPT_COST,
            api_base_url: "http://localhost:8080/api/v1".to_string(),
            session_file: PathBuf::from("test-session.json"),
        }
    }
}
