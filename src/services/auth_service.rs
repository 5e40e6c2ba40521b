use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{
        password::{hash_password, verify_password},
        Claims, JwtService,
    },
    errors::{AppError, AppResult},
    models::{
        domain::{User, UserRole},
        dto::{
            request::{LoginRequest, RegisterRequest},
            response::{LoginResponse, UserDto},
        },
    },
    repositories::UserRepository,
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub struct AuthService {
    repository: Arc<dyn UserRepository>,
    jwt_service: Arc<JwtService>,
    password_cost: u32,
}

impl AuthService {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        jwt_service: Arc<JwtService>,
        password_cost: u32,
    ) -> Self {
        Self {
            repository,
            jwt_service,
            password_cost,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let user = self
            .repository
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(&request.password, &user.password_hash).await? {
            log::info!("Failed login attempt for '{}'", request.username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.jwt_service.create_token(&user)?;
        log::info!("User '{}' logged in", user.username);

        Ok(LoginResponse {
            token,
            msg: format!("{} logged in successfully", user.username),
            data: user.into(),
        })
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserDto> {
        request.validate()?;

        let hash = hash_password(&request.password, Some(self.password_cost)).await?;
        let user = User::new(
            &request.first_name,
            &request.last_name,
            &request.username,
            &request.email,
            UserRole::Standard,
            hash,
        );

        let created = self.repository.create(user).await?;
        log::info!("Registered user '{}'", created.username);
        Ok(created.into())
    }

    /// Loads the account behind a verified token. The stored record, not the
    /// token, is the source of the caller's role.
    pub async fn resolve_actor(&self, claims: &Claims) -> AppResult<User> {
        self.repository
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Account no longer exists".to_string()))
    }
}
