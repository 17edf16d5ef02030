use actix_web::{self, middleware::Logger, web, App, HttpServer};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::{connect_database, cors},
    modules::{
        discovery::service::DiscoveryService,
        friend::{
            repository::FriendRepository, repository_pg::FriendRepositoryPg,
            service::FriendService,
        },
        user::{
            repository::UserRepository, repository_mem::UserRepositoryMem,
            repository_pg::UserRepositoryPg, service::UserService,
        },
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

type Repositories =
    (Arc<dyn UserRepository + Send + Sync>, Arc<dyn FriendRepository + Send + Sync>);

async fn repositories() -> std::io::Result<Repositories> {
    if ENV.database_url == "memory" {
        log::warn!("DATABASE_URL=memory, accounts will not survive a restart");
        let store = UserRepositoryMem::new();
        let user_repo: Arc<dyn UserRepository + Send + Sync> = Arc::new(store.clone());
        let friend_repo: Arc<dyn FriendRepository + Send + Sync> = Arc::new(store);
        return Ok((user_repo, friend_repo));
    }

    let db_pool = connect_database().await.map_err(|e| {
        log::error!("Database connection error: {e:?}");
        std::io::Error::other("Database connection error")
    })?;

    let user_repo: Arc<dyn UserRepository + Send + Sync> =
        Arc::new(UserRepositoryPg::new(db_pool.clone()));
    let friend_repo: Arc<dyn FriendRepository + Send + Sync> =
        Arc::new(FriendRepositoryPg::new(db_pool));
    Ok((user_repo, friend_repo))
}

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "API is running..."
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let (user_repo, friend_repo) = repositories().await?;

    let user_service = UserService::with_dependencies(user_repo.clone(), ENV.jwt_secret.as_str());
    let friend_service = FriendService::with_dependencies(friend_repo, user_repo.clone());
    let discovery_service = DiscoveryService::with_dependencies(user_repo);

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(&ENV.frontend_url))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(friend_service.clone()))
            .app_data(web::Data::new(discovery_service.clone()))
            .service(health_check)
            .configure(modules::configure)
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
