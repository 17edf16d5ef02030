use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::user::schema::{Gender, UserEntity};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate)]
pub struct FullName {
    #[validate(length(min = 1, message = "First name cannot be empty"))]
    pub firstname: String,
    #[validate(length(min = 1, message = "Last name cannot be empty"))]
    pub lastname: String,
}

#[derive(Deserialize, Serialize, Validate)]
pub struct RegisterModel {
    #[validate(nested)]
    pub fullname: FullName,
    #[validate(length(min = 3, message = "Username must be at least 3 characters long"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    pub gender: Gender,
}

#[derive(Deserialize, Serialize, Validate)]
pub struct LoginModel {
    #[validate(length(min = 1, message = "Email cannot be empty"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

pub struct InsertUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub hash_password: String,
    pub gender: Gender,
}

/// Public view of an account. The credential hash never leaves the store.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UserResponse {
    pub id: uuid::Uuid,
    pub fullname: FullName,
    pub username: String,
    pub email: String,
    pub gender: Gender,
}

impl From<UserEntity> for UserResponse {
    fn from(entity: UserEntity) -> Self {
        UserResponse {
            id: entity.id,
            fullname: FullName { firstname: entity.first_name, lastname: entity.last_name },
            username: entity.username,
            email: entity.email,
            gender: entity.gender,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
}
