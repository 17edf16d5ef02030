use actix_web::{get, middleware::from_fn, web, HttpRequest};

use crate::{
    api::{error, success},
    middlewares::{authentication, get_extensions, AuthUser},
    modules::{
        discovery::{model::SearchQuery, service::DiscoveryService},
        user::model::UserResponse,
    },
    utils::ValidatedQuery,
};

/// Served on both `/api/users` and `/api/users/`, see `route::configure`.
pub async fn list_users(
    discovery_service: web::Data<DiscoveryService>,
) -> Result<success::Success<Vec<UserResponse>>, error::Error> {
    let users = discovery_service.list_all().await?;
    Ok(success::Success::ok(users))
}

#[get("/search", wrap = "from_fn(authentication)")]
pub async fn search_users(
    discovery_service: web::Data<DiscoveryService>,
    query: ValidatedQuery<SearchQuery>,
) -> Result<success::Success<Vec<UserResponse>>, error::Error> {
    let users = discovery_service.search(&query.0.query).await?;
    Ok(success::Success::ok(users))
}

#[get("/recommendations", wrap = "from_fn(authentication)")]
pub async fn recommendations(
    discovery_service: web::Data<DiscoveryService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<UserResponse>>, error::Error> {
    let user_id = get_extensions::<AuthUser>(&req)?.id;
    let users = discovery_service.recommend(user_id).await?;
    Ok(success::Success::ok(users))
}
