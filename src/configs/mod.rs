use actix_cors::Cors;
use actix_web::http::{header, Method};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{api::error, ENV};

pub async fn connect_database() -> Result<PgPool, error::SystemError> {
    let database_url = &ENV.database_url;
    let pool = PgPoolOptions::new()
        .max_connections(ENV.database_max_connections)
        .min_connections(1)
        .acquire_slow_threshold(std::time::Duration::from_secs(3))
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("Database connected and migrations applied");

    Ok(pool)
}

pub fn cors(frontend_url: &str) -> Cors {
    let cors = if frontend_url == "*" {
        Cors::default().allow_any_origin()
    } else {
        Cors::default().allowed_origin(frontend_url)
    };

    cors.allowed_methods(vec![
        Method::GET,
        Method::HEAD,
        Method::PUT,
        Method::PATCH,
        Method::POST,
        Method::DELETE,
    ])
    .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
    .max_age(3600)
}
