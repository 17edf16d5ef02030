use actix_web::web::{self, ServiceConfig};

pub mod user {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod repository_mem;
    pub mod handle;
    pub mod service;
    pub mod route;
}

pub mod friend {
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod repository_mem;
    pub mod handle;
    pub mod service;
    pub mod route;
}

pub mod discovery {
    pub mod model;
    pub mod handle;
    pub mod service;
    pub mod route;
}

/// Mounts every route under `/api/users`. Each route other than register and login carries
/// the `authentication` middleware itself, so unknown paths fall through to a plain 404.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .configure(user::route::public_api_configure)
            .configure(discovery::route::configure)
            .configure(friend::route::configure),
    );
}
