use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use validator::Validate;

use crate::{
    auth::{password::hash_password, require_admin, require_owner_or_admin},
    errors::{AppError, AppResult},
    models::{
        domain::{User, UserRole},
        dto::{request::UpdateUserRequest, response::UserDto},
    },
    repositories::UserRepository,
};

/// Accounts created by the seed endpoint: (first name, last name, username).
const BASIC_USERS: [(&str, &str, &str); 3] = [
    ("Ada", "Lovelace", "ada"),
    ("Alan", "Turing", "alan"),
    ("Grace", "Hopper", "grace"),
];

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    seed_password: SecretString,
    password_cost: u32,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        seed_password: SecretString,
        password_cost: u32,
    ) -> Self {
        Self {
            repository,
            seed_password,
            password_cost,
        }
    }

    async fn find(&self, id: &str) -> AppResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))
    }

    pub async fn get_user(&self, actor: &User, id: &str) -> AppResult<UserDto> {
        require_owner_or_admin(actor, id)?;
        Ok(self.find(id).await?.into())
    }

    pub async fn get_all_users(&self, actor: &User) -> AppResult<Vec<UserDto>> {
        require_admin(actor)?;

        let users = self.repository.find_all().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    pub async fn update_user(
        &self,
        actor: &User,
        id: &str,
        request: UpdateUserRequest,
    ) -> AppResult<UserDto> {
        require_owner_or_admin(actor, id)?;
        request.validate()?;

        let mut user = self.find(id).await?;

        if let Some(role) = request.role {
            if role != user.role {
                require_admin(actor)?;
                log::info!(
                    "'{}' changed role of '{}' from {} to {}",
                    actor.username,
                    user.username,
                    user.role,
                    role
                );
                user.role = role;
            }
        }
        if let Some(first_name) = request.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = request.email {
            user.email = email;
        }
        if let Some(password) = request.password {
            user.password_hash = hash_password(&password, Some(self.password_cost)).await?;
        }

        let updated = self.repository.update(user).await?;
        Ok(updated.into())
    }

    pub async fn delete_user(&self, actor: &User, id: &str) -> AppResult<()> {
        require_owner_or_admin(actor, id)?;

        let user = self.find(id).await?;
        if user.role == UserRole::Admin {
            return Err(AppError::Forbidden(
                "Admin accounts cannot be deleted".to_string(),
            ));
        }

        self.repository.delete(id).await?;
        log::info!("'{}' deleted user '{}'", actor.username, user.username);
        Ok(())
    }

    /// Creates the fixed set of standard accounts, skipping usernames that
    /// are already taken. Returns only the accounts created by this call.
    pub async fn seed_basic_users(&self, actor: &User) -> AppResult<Vec<UserDto>> {
        require_admin(actor)?;

        let mut created = Vec::new();
        for (first_name, last_name, username) in BASIC_USERS {
            if self.repository.find_by_username(username).await?.is_some() {
                continue;
            }

            let hash =
                hash_password(self.seed_password.expose_secret(), Some(self.password_cost)).await?;
            let user = User::new(
                first_name,
                last_name,
                username,
                &format!("{}@quiz.app", username),
                UserRole::Standard,
                hash,
            );
            created.push(self.repository.create(user).await?.into());
        }

        log::info!("Seeded {} basic users", created.len());
        Ok(created)
    }
}
