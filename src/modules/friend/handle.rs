use actix_web::{get, middleware::from_fn, post, web, HttpRequest};

use crate::{
    api::{error, success},
    middlewares::{authentication, get_extensions, AuthUser},
    modules::{
        friend::{
            model::{FriendResponse, HandleRequestBody, SendRequestBody},
            service::FriendService,
        },
        user::model::UserResponse,
    },
    utils::ValidatedJson,
};

#[post("/send-request", wrap = "from_fn(authentication)")]
pub async fn send_friend_request(
    friend_service: web::Data<FriendService>,
    body: ValidatedJson<SendRequestBody>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let sender_id = get_extensions::<AuthUser>(&req)?.id;
    friend_service.send_friend_request(sender_id, body.0.to_user_id).await?;

    Ok(success::Success::message("Friend request sent"))
}

#[post("/handle-request", wrap = "from_fn(authentication)")]
pub async fn handle_friend_request(
    friend_service: web::Data<FriendService>,
    body: ValidatedJson<HandleRequestBody>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let owner_id = get_extensions::<AuthUser>(&req)?.id;
    let HandleRequestBody { from_user_id, action } = body.0;
    friend_service.handle_friend_request(owner_id, from_user_id, action).await?;

    Ok(success::Success::message(format!("Friend request {action}")))
}

#[get("/friends", wrap = "from_fn(authentication)")]
pub async fn list_friends(
    friend_service: web::Data<FriendService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendResponse>>, error::Error> {
    let user_id = get_extensions::<AuthUser>(&req)?.id;
    let friends = friend_service.get_friends(user_id).await?;

    Ok(success::Success::ok(friends))
}

#[get("/getPendingRequests", wrap = "from_fn(authentication)")]
pub async fn list_pending_requests(
    friend_service: web::Data<FriendService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<UserResponse>>, error::Error> {
    let user_id = get_extensions::<AuthUser>(&req)?.id;
    let requests = friend_service.get_pending_requests(user_id).await?;

    if requests.is_empty() {
        return Ok(success::Success::message("No pending requests"));
    }
    Ok(success::Success::ok(requests))
}
