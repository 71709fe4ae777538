#[macro_use]
mod common;

use actix_web::http::{Method, StatusCode};
use actix_web::test;
use chrono::{Duration, Utc};
use serde_json::Value;

use campus_server::models::users::entities::UserRole;
use campus_server::storage::UserStorage;

use common::{PASSWORD, cookie, field, setup};

#[actix_web::test]
async fn login_sets_both_cookies_and_returns_user() {
    let state = setup().await;
    let app = campus_app!(state.storage, state.cache);

    let resp = test::call_service(
        &app,
        state
            .login_request(&state.admin_email(), &state.admin_password())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let access = cookie(&resp, "accessToken").expect("access cookie");
    let refresh = cookie(&resp, "refreshToken").expect("refresh cookie");
    assert_eq!(access.http_only(), Some(true));
    assert_eq!(refresh.http_only(), Some(true));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(field(&body, &["data", "user", "email"]), &Value::from(state.admin_email()));
    assert_eq!(field(&body, &["data", "user", "role"]), "ADMIN");
    assert!(field(&body, &["data", "user", "password_hash"]).is_null());

    let me = test::call_service(
        &app,
        state
            .request()
            .uri("/api/v1/auth/me")
            .cookie(access)
            .to_request(),
    )
    .await;
    assert_eq!(me.status(), StatusCode::OK);
}

#[actix_web::test]
async fn bearer_header_is_accepted_without_cookie() {
    let state = setup().await;
    let app = campus_app!(state.storage, state.cache);

    let resp = test::call_service(
        &app,
        state
            .login_request(&state.admin_email(), &state.admin_password())
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["access_token"].as_str().expect("token").to_string();

    let me = test::call_service(
        &app,
        state
            .request()
            .uri("/api/v1/auth/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(me.status(), StatusCode::OK);
}

#[actix_web::test]
async fn missing_and_malformed_tokens_are_unauthorized() {
    let state = setup().await;
    let app = campus_app!(state.storage, state.cache);

    let missing = test::call_service(
        &app,
        state.request().uri("/api/v1/auth/me").to_request(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let malformed = test::call_service(
        &app,
        state
            .request()
            .uri("/api/v1/users")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request(),
    )
    .await;
    assert_eq!(malformed.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn wrong_password_and_unknown_email_share_a_message() {
    let state = setup().await;
    let app = campus_app!(state.storage, state.cache);

    let wrong = test::call_service(
        &app,
        state
            .login_request(&state.admin_email(), "not-the-password")
            .to_request(),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong: Value = test::read_body_json(wrong).await;

    let unknown = test::call_service(
        &app,
        state
            .login_request("nobody@campus.local", "whatever")
            .to_request(),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown: Value = test::read_body_json(unknown).await;

    assert_eq!(wrong["message"], unknown["message"]);
}

#[actix_web::test]
async fn five_failures_lock_the_account() {
    let state = setup().await;
    let user_id = state.create_user("locked@campus.local", UserRole::Student).await;
    let app = campus_app!(state.storage, state.cache);

    for attempt in 1..=4 {
        let resp = test::call_service(
            &app,
            state
                .login_request("locked@campus.local", "wrong-password")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "attempt {attempt}");
    }

    let fifth = test::call_service(
        &app,
        state
            .login_request("locked@campus.local", "wrong-password")
            .to_request(),
    )
    .await;
    assert_eq!(fifth.status(), StatusCode::LOCKED);

    // 锁定期内正确密码也被拒绝
    let correct = test::call_service(
        &app,
        state
            .login_request("locked@campus.local", PASSWORD)
            .to_request(),
    )
    .await;
    assert_eq!(correct.status(), StatusCode::LOCKED);

    let user = state
        .storage
        .get_user_by_id(user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.failed_login_attempts, 5);
    assert!(user.locked_until.is_some_and(|until| until > Utc::now()));
}

#[actix_web::test]
async fn login_succeeds_after_lock_window_and_resets_counter() {
    let state = setup().await;
    let user_id = state.create_user("expired@campus.local", UserRole::Lecturer).await;
    state
        .storage
        .record_login_failure(user_id, 5, Some(Utc::now() - Duration::minutes(1)))
        .await
        .unwrap();
    let app = campus_app!(state.storage, state.cache);

    let resp = test::call_service(
        &app,
        state
            .login_request("expired@campus.local", PASSWORD)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let user = state
        .storage
        .get_user_by_id(user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.failed_login_attempts, 0);
    assert!(user.locked_until.is_none());
    assert!(user.last_login.is_some());
}

#[actix_web::test]
async fn refresh_rotates_cookies_and_logout_clears_them() {
    let state = setup().await;
    let app = campus_app!(state.storage, state.cache);

    let login = test::call_service(
        &app,
        state
            .login_request(&state.admin_email(), &state.admin_password())
            .to_request(),
    )
    .await;
    let refresh = cookie(&login, "refreshToken").expect("refresh cookie");

    let refreshed = test::call_service(
        &app,
        state
            .request()
            .method(Method::POST)
            .uri("/api/v1/auth/refresh")
            .cookie(refresh)
            .to_request(),
    )
    .await;
    assert_eq!(refreshed.status(), StatusCode::OK);
    assert!(cookie(&refreshed, "accessToken").is_some());
    assert!(cookie(&refreshed, "refreshToken").is_some());

    let logout = test::call_service(
        &app,
        state
            .request()
            .method(Method::POST)
            .uri("/api/v1/auth/logout")
            .to_request(),
    )
    .await;
    assert_eq!(logout.status(), StatusCode::OK);
    let cleared = cookie(&logout, "accessToken").expect("expired access cookie");
    assert_eq!(cleared.value(), "");
}

#[actix_web::test]
async fn refresh_without_cookie_is_unauthorized() {
    let state = setup().await;
    let app = campus_app!(state.storage, state.cache);

    let resp = test::call_service(
        &app,
        state
            .request()
            .method(Method::POST)
            .uri("/api/v1/auth/refresh")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn response_envelope_carries_request_id_header() {
    let state = setup().await;
    let app = campus_app!(state.storage, state.cache);

    let resp = test::call_service(
        &app,
        state
            .request()
            .uri("/health")
            .insert_header(("X-Request-Id", "trace-abc-123"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("x-request-id").unwrap().to_str().unwrap(),
        "trace-abc-123"
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["requestId"], "trace-abc-123");
    assert_eq!(body["data"]["database"], "up");
    assert!(body["timestamp"].is_string());
}

#[actix_web::test]
async fn student_cannot_list_users() {
    let state = setup().await;
    state.create_user("student@campus.local", UserRole::Student).await;
    let app = campus_app!(state.storage, state.cache);

    let login = test::call_service(
        &app,
        state
            .login_request("student@campus.local", PASSWORD)
            .to_request(),
    )
    .await;
    let access = cookie(&login, "accessToken").expect("access cookie");

    let resp = test::call_service(
        &app,
        state
            .request()
            .uri("/api/v1/users")
            .cookie(access)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn role_and_status_changes_apply_to_existing_sessions() {
    let state = setup().await;
    let it_id = state.create_user("it@campus.local", UserRole::It).await;
    let app = campus_app!(state.storage, state.cache);

    let admin_login = test::call_service(
        &app,
        state
            .login_request(&state.admin_email(), &state.admin_password())
            .to_request(),
    )
    .await;
    let admin = cookie(&admin_login, "accessToken").expect("admin session");

    let it_login = test::call_service(
        &app,
        state.login_request("it@campus.local", PASSWORD).to_request(),
    )
    .await;
    let it = cookie(&it_login, "accessToken").expect("it session");

    let list = |session: actix_web::cookie::Cookie<'static>| {
        state.request().uri("/api/v1/users").cookie(session).to_request()
    };
    // 第一次请求把用户写入缓存
    assert_eq!(test::call_service(&app, list(it.clone())).await.status(), StatusCode::OK);

    let demote = test::call_service(
        &app,
        state
            .request()
            .method(Method::PUT)
            .uri(&format!("/api/v1/users/{it_id}"))
            .cookie(admin.clone())
            .set_json(serde_json::json!({ "role": "STUDENT" }))
            .to_request(),
    )
    .await;
    assert_eq!(demote.status(), StatusCode::OK);
    assert_eq!(test::call_service(&app, list(it.clone())).await.status(), StatusCode::FORBIDDEN);

    let suspend = test::call_service(
        &app,
        state
            .request()
            .method(Method::PUT)
            .uri(&format!("/api/v1/users/{it_id}"))
            .cookie(admin)
            .set_json(serde_json::json!({ "status": "suspended" }))
            .to_request(),
    )
    .await;
    assert_eq!(suspend.status(), StatusCode::OK);
    assert_eq!(test::call_service(&app, list(it)).await.status(), StatusCode::UNAUTHORIZED);
}
