use std::sync::Arc;
use crate::domain::{
    models::user::{NewUser, User, UserPatch},
    ports::UserRepository,
};
use crate::error::AppError;

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn create_user(&self, params: NewUser) -> Result<User, AppError> {
        if self.users.find_by_email(&params.email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "A user with email {} already exists",
                params.email
            )));
        }

        let user = User::new(params.name, params.email, params.phone);
        self.users.create(&user).await
    }

    pub async fn get_user(&self, id: &str) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }

    pub async fn update_user(&self, id: &str, patch: UserPatch) -> Result<User, AppError> {
        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;

        if let Some(email) = patch.email {
            if email != user.email {
                if let Some(other) = self.users.find_by_email(&email).await? {
                    if other.id != user.id {
                        return Err(AppError::Conflict(format!(
                            "A user with email {} already exists",
                            email
                        )));
                    }
                }
            }
            user.email = email;
        }
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(phone) = patch.phone {
            // An empty string clears the phone number.
            user.phone = if phone.is_empty() { None } else { Some(phone) };
        }

        self.users.update(&user).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        self.users.delete(id).await
    }
}
