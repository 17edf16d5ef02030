use actix_web::{post, web};

use crate::modules::user::{model, service::UserService};
use crate::{
    api::{error, success},
    utils::ValidatedJson,
};

#[post("/register")]
pub async fn register(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<model::RegisterModel>,
) -> Result<success::Success<model::AuthResponse>, error::Error> {
    let response = user_service.register(user_data.0).await?;
    Ok(success::Success::created(response))
}

#[post("/login")]
pub async fn login(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<model::LoginModel>,
) -> Result<success::Success<model::AuthResponse>, error::Error> {
    let response = user_service.login(user_data.0).await?;
    Ok(success::Success::ok(response))
}
