use crate::{middlewares::authentication, modules::discovery::handle::*};
use actix_web::{
    middleware::from_fn,
    web::{get, resource, ServiceConfig},
};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        resource(vec!["", "/"]).wrap(from_fn(authentication)).route(get().to(list_users)),
    )
    .service(search_users)
    .service(recommendations);
}
