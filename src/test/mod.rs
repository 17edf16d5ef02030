use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};

use crate::modules::{
    self,
    discovery::service::DiscoveryService,
    friend::service::FriendService,
    user::{repository_mem::UserRepositoryMem, service::UserService},
};

const SECRET: &str = "integration-secret";

macro_rules! app {
    () => {{
        let store = UserRepositoryMem::new();
        test::init_service(
            App::new()
                .app_data(web::Data::new(UserService::with_dependencies(
                    Arc::new(store.clone()),
                    SECRET,
                )))
                .app_data(web::Data::new(FriendService::with_dependencies(
                    Arc::new(store.clone()),
                    Arc::new(store.clone()),
                )))
                .app_data(web::Data::new(DiscoveryService::with_dependencies(Arc::new(store))))
                .configure(modules::configure),
        )
        .await
    }};
}

macro_rules! call {
    ($app:expr, $req:expr) => {{
        // Middleware failures come back as `Err`, handler failures as error responses.
        match test::try_call_service(&$app, $req.to_request()).await {
            Ok(resp) => {
                let status = resp.status();
                let body: Value = test::read_body_json(resp).await;
                (status, body)
            }
            Err(err) => {
                let resp = err.error_response();
                let status = resp.status();
                let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
                let body: Value = serde_json::from_slice(&bytes).unwrap();
                (status, body)
            }
        }
    }};
}

macro_rules! register {
    ($app:expr, $username:expr, $first:expr, $last:expr) => {{
        let (status, body) = call!(
            $app,
            test::TestRequest::post().uri("/api/users/register").set_json(json!({
                "fullname": { "firstname": $first, "lastname": $last },
                "username": $username,
                "email": format!("{}@example.com", $username),
                "password": "secret-pass",
                "gender": "female",
            }))
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }};
}

fn authed(req: test::TestRequest, token: &Value) -> test::TestRequest {
    let token = token.as_str().unwrap_or_default();
    req.insert_header(("Authorization", format!("Bearer {token}")))
}

fn usernames(body: &Value) -> Vec<String> {
    body.as_array()
        .map(|users| {
            users.iter().filter_map(|u| u["username"].as_str().map(str::to_owned)).collect()
        })
        .unwrap_or_default()
}

#[actix_web::test]
async fn friend_request_accept_scenario() {
    let app = app!();
    let alice = register!(app, "alice", "Alice", "Liddell");
    let bob = register!(app, "bob", "Bob", "Builder");

    assert!(alice["token"].is_string());
    assert_eq!(alice["fullname"]["firstname"], "Alice");
    assert!(alice.get("password").is_none());
    assert!(alice.get("hash_password").is_none());

    let (status, body) = call!(
        app,
        authed(test::TestRequest::post().uri("/api/users/send-request"), &alice["token"])
            .set_json(json!({ "toUserId": bob["id"] }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Friend request sent");

    let (status, pending) = call!(
        app,
        authed(test::TestRequest::get().uri("/api/users/getPendingRequests"), &bob["token"])
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(usernames(&pending), vec!["alice"]);

    let (status, body) = call!(
        app,
        authed(test::TestRequest::post().uri("/api/users/handle-request"), &bob["token"])
            .set_json(json!({ "fromUserId": alice["id"], "action": "accept" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Friend request accepted");

    let (_, bob_friends) =
        call!(app, authed(test::TestRequest::get().uri("/api/users/friends"), &bob["token"]));
    assert_eq!(usernames(&bob_friends), vec!["alice"]);
    assert_eq!(bob_friends[0]["displayName"], "Alice Liddell");
    assert_eq!(bob_friends[0]["id"], alice["id"]);

    let (_, alice_friends) =
        call!(app, authed(test::TestRequest::get().uri("/api/users/friends"), &alice["token"]));
    assert_eq!(usernames(&alice_friends), vec!["bob"]);

    let (status, body) = call!(
        app,
        authed(test::TestRequest::get().uri("/api/users/getPendingRequests"), &bob["token"])
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "No pending requests" }));
}

#[actix_web::test]
async fn reject_leaves_friend_lists_empty() {
    let app = app!();
    let alice = register!(app, "alice", "Alice", "Liddell");
    let bob = register!(app, "bob", "Bob", "Builder");

    call!(
        app,
        authed(test::TestRequest::post().uri("/api/users/send-request"), &alice["token"])
            .set_json(json!({ "toUserId": bob["id"] }))
    );
    let (status, body) = call!(
        app,
        authed(test::TestRequest::post().uri("/api/users/handle-request"), &bob["token"])
            .set_json(json!({ "fromUserId": alice["id"], "action": "reject" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Friend request rejected");

    let (_, friends) =
        call!(app, authed(test::TestRequest::get().uri("/api/users/friends"), &bob["token"]));
    assert_eq!(friends, json!([]));

    let (status, body) = call!(
        app,
        authed(test::TestRequest::post().uri("/api/users/handle-request"), &bob["token"])
            .set_json(json!({ "fromUserId": alice["id"], "action": "reject" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No such friend request");
}

#[actix_web::test]
async fn duplicate_registration_is_rejected() {
    let app = app!();
    register!(app, "alice", "Alice", "Liddell");

    let (status, body) = call!(
        app,
        test::TestRequest::post().uri("/api/users/register").set_json(json!({
            "fullname": { "firstname": "Other", "lastname": "Alice" },
            "username": "alice2",
            "email": "alice@example.com",
            "password": "secret-pass",
            "gender": "other",
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already exists");

    let (status, body) = call!(
        app,
        test::TestRequest::post().uri("/api/users/register").set_json(json!({
            "fullname": { "firstname": "Other", "lastname": "Alice" },
            "username": "alice",
            "email": "alice2@example.com",
            "password": "secret-pass",
            "gender": "other",
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username already exists");
}

#[actix_web::test]
async fn register_validates_payload() {
    let app = app!();
    let (status, _) = call!(
        app,
        test::TestRequest::post().uri("/api/users/register").set_json(json!({
            "fullname": { "firstname": "", "lastname": "Nobody" },
            "username": "nobody",
            "email": "not-an-email",
            "password": "123",
            "gender": "male",
        }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn login_with_wrong_password_leaves_account_usable() {
    let app = app!();
    let alice = register!(app, "alice", "Alice", "Liddell");

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({ "email": "alice@example.com", "password": "wrong-pass" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({ "email": "nobody@example.com", "password": "secret-pass" }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({ "email": "alice@example.com", "password": "secret-pass" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], alice["id"]);
    assert!(body["token"].is_string());
}

#[actix_web::test]
async fn login_accepts_any_non_empty_email() {
    let app = app!();
    register!(app, "alice", "Alice", "Liddell");

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({ "email": "nobody", "password": "secret-pass" }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({ "email": "", "password": "secret-pass" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
}

#[actix_web::test]
async fn user_list_is_served_with_and_without_trailing_slash() {
    let app = app!();
    let alice = register!(app, "alice", "Alice", "Liddell");
    register!(app, "bob", "Bob", "Builder");

    for uri in ["/api/users", "/api/users/"] {
        let (status, all) =
            call!(app, authed(test::TestRequest::get().uri(uri), &alice["token"]));
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(usernames(&all), vec!["alice", "bob"], "{uri}");
    }

    let (status, body) = call!(app, test::TestRequest::get().uri("/api/users"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token, authorization denied");
}

#[actix_web::test]
async fn unknown_paths_are_not_found_even_without_token() {
    let app = app!();

    for uri in ["/api/users/nope", "/api/users/friends/extra", "/elsewhere"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[actix_web::test]
async fn protected_routes_require_valid_token() {
    let app = app!();

    let (status, body) = call!(app, test::TestRequest::get().uri("/api/users/friends"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token, authorization denied");

    let (status, body) = call!(
        app,
        authed(test::TestRequest::get().uri("/api/users/recommendations"), &json!("garbage"))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");
}

#[actix_web::test]
async fn send_request_errors_surface_as_http_status() {
    let app = app!();
    let alice = register!(app, "alice", "Alice", "Liddell");
    let bob = register!(app, "bob", "Bob", "Builder");

    let send = |to: &Value| {
        authed(test::TestRequest::post().uri("/api/users/send-request"), &alice["token"])
            .set_json(json!({ "toUserId": to }))
    };

    let (status, _) = call!(app, send(&bob["id"]));
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call!(app, send(&bob["id"]));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Request already sent");

    let (status, body) = call!(app, send(&json!("01890a5d-ac96-774b-bcce-b302099a8057")));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, _) = call!(app, send(&json!("not-a-uuid")));
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn search_list_and_recommendations() {
    let app = app!();
    let alice = register!(app, "alice", "Alice", "Liddell");
    let bob = register!(app, "bob", "Bob", "Builder");
    register!(app, "carol", "Carol", "Danvers");

    call!(
        app,
        authed(test::TestRequest::post().uri("/api/users/send-request"), &bob["token"])
            .set_json(json!({ "toUserId": alice["id"] }))
    );

    let (status, found) = call!(
        app,
        authed(test::TestRequest::get().uri("/api/users/search?query=BUILD"), &alice["token"])
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(usernames(&found), vec!["bob"]);

    let (status, _) =
        call!(app, authed(test::TestRequest::get().uri("/api/users/search"), &alice["token"]));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, all) =
        call!(app, authed(test::TestRequest::get().uri("/api/users/"), &alice["token"]));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(usernames(&all), vec!["alice", "bob", "carol"]);
    for user in all.as_array().into_iter().flatten() {
        assert!(user.get("password").is_none());
        assert!(user.get("hash_password").is_none());
        assert!(user["email"].is_string());
        assert!(user["gender"].is_string());
    }

    let (_, recommended) = call!(
        app,
        authed(test::TestRequest::get().uri("/api/users/recommendations"), &alice["token"])
    );
    assert_eq!(usernames(&recommended), vec!["carol"]);

    let (_, recommended) = call!(
        app,
        authed(test::TestRequest::get().uri("/api/users/recommendations"), &bob["token"])
    );
    assert_eq!(usernames(&recommended), vec!["carol"]);
}
