use crate::modules::friend::handle::*;
use actix_web::web::ServiceConfig;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(send_friend_request)
        .service(handle_friend_request)
        .service(list_friends)
        .service(list_pending_requests);
}
