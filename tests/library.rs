#[macro_use]
mod common;

use actix_web::cookie::Cookie;
use actix_web::http::{Method, StatusCode};
use actix_web::test;
use serde_json::{Value, json};

use campus_server::models::users::entities::UserRole;

use common::{PASSWORD, TestState, cookie, setup};

fn send(
    state: &TestState,
    method: Method,
    uri: &str,
    session: &Cookie<'static>,
    body: Option<Value>,
) -> test::TestRequest {
    let req = state
        .request()
        .method(method)
        .uri(uri)
        .cookie(session.clone());
    match body {
        Some(body) => req.set_json(body),
        None => req,
    }
}

#[actix_web::test]
async fn checkout_and_return_track_available_copies() {
    let state = setup().await;
    state
        .create_user("librarian@campus.local", UserRole::Librarian)
        .await;
    let borrower_id = state
        .create_user("borrower@campus.local", UserRole::Student)
        .await;
    let other_id = state
        .create_user("other@campus.local", UserRole::Student)
        .await;
    let app = campus_app!(state.storage, state.cache);

    let login = test::call_service(
        &app,
        state
            .login_request("librarian@campus.local", PASSWORD)
            .to_request(),
    )
    .await;
    let librarian = cookie(&login, "accessToken").expect("librarian session");
    let login = test::call_service(
        &app,
        state
            .login_request("borrower@campus.local", PASSWORD)
            .to_request(),
    )
    .await;
    let student = cookie(&login, "accessToken").expect("student session");

    let item = test::call_service(
        &app,
        send(
            &state,
            Method::POST,
            "/api/v1/library/items",
            &librarian,
            Some(json!({
                "isbn": "978-0131103627",
                "title": "The C Programming Language",
                "author": "Kernighan and Ritchie",
                "total_copies": 1
            })),
        )
        .to_request(),
    )
    .await;
    assert_eq!(item.status(), StatusCode::CREATED);
    let item: Value = test::read_body_json(item).await;
    let item_id = item["data"]["id"].as_i64().expect("item id");
    assert_eq!(item["data"]["available_copies"], 1);

    // 学生不能办理借出
    let forbidden = test::call_service(
        &app,
        send(
            &state,
            Method::POST,
            "/api/v1/library/loans",
            &student,
            Some(json!({ "library_item_id": item_id, "borrower_id": borrower_id })),
        )
        .to_request(),
    )
    .await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let loan = test::call_service(
        &app,
        send(
            &state,
            Method::POST,
            "/api/v1/library/loans",
            &librarian,
            Some(json!({ "library_item_id": item_id, "borrower_id": borrower_id })),
        )
        .to_request(),
    )
    .await;
    assert_eq!(loan.status(), StatusCode::CREATED);
    let loan: Value = test::read_body_json(loan).await;
    let loan_id = loan["data"]["id"].as_i64().expect("loan id");
    assert_eq!(loan["data"]["status"], "active");

    let no_copies = test::call_service(
        &app,
        send(
            &state,
            Method::POST,
            "/api/v1/library/loans",
            &librarian,
            Some(json!({ "library_item_id": item_id, "borrower_id": other_id })),
        )
        .to_request(),
    )
    .await;
    assert_eq!(no_copies.status(), StatusCode::CONFLICT);

    let shrink = test::call_service(
        &app,
        send(
            &state,
            Method::PUT,
            &format!("/api/v1/library/items/{item_id}"),
            &librarian,
            Some(json!({ "total_copies": 0 })),
        )
        .to_request(),
    )
    .await;
    assert_eq!(shrink.status(), StatusCode::CONFLICT);

    // 借阅人只能看到自己的借阅
    let own = test::call_service(
        &app,
        send(&state, Method::GET, "/api/v1/library/loans", &student, None).to_request(),
    )
    .await;
    assert_eq!(own.status(), StatusCode::OK);
    let own: Value = test::read_body_json(own).await;
    assert_eq!(own["data"]["pagination"]["total"], 1);
    assert_eq!(own["data"]["items"][0]["borrower_id"], borrower_id);

    let returned = test::call_service(
        &app,
        send(
            &state,
            Method::POST,
            &format!("/api/v1/library/loans/{loan_id}/return"),
            &librarian,
            None,
        )
        .to_request(),
    )
    .await;
    assert_eq!(returned.status(), StatusCode::OK);
    let returned: Value = test::read_body_json(returned).await;
    assert_eq!(returned["data"]["status"], "returned");
    assert_eq!(returned["data"]["fine_amount"], 0.0);

    let again = test::call_service(
        &app,
        send(
            &state,
            Method::POST,
            &format!("/api/v1/library/loans/{loan_id}/return"),
            &librarian,
            None,
        )
        .to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let item = test::call_service(
        &app,
        send(
            &state,
            Method::GET,
            &format!("/api/v1/library/items/{item_id}"),
            &librarian,
            None,
        )
        .to_request(),
    )
    .await;
    let item: Value = test::read_body_json(item).await;
    assert_eq!(item["data"]["available_copies"], 1);
}

#[actix_web::test]
async fn items_with_loan_history_cannot_be_deleted() {
    let state = setup().await;
    state
        .create_user("librarian@campus.local", UserRole::Librarian)
        .await;
    let borrower_id = state
        .create_user("borrower@campus.local", UserRole::Lecturer)
        .await;
    let app = campus_app!(state.storage, state.cache);

    let login = test::call_service(
        &app,
        state
            .login_request("librarian@campus.local", PASSWORD)
            .to_request(),
    )
    .await;
    let librarian = cookie(&login, "accessToken").expect("librarian session");

    let item = test::call_service(
        &app,
        send(
            &state,
            Method::POST,
            "/api/v1/library/items",
            &librarian,
            Some(json!({
                "isbn": "978-0262033848",
                "title": "Introduction to Algorithms",
                "author": "Cormen et al.",
                "total_copies": 2
            })),
        )
        .to_request(),
    )
    .await;
    let item: Value = test::read_body_json(item).await;
    let item_id = item["data"]["id"].as_i64().expect("item id");

    let duplicate = test::call_service(
        &app,
        send(
            &state,
            Method::POST,
            "/api/v1/library/items",
            &librarian,
            Some(json!({
                "isbn": "978-0262033848",
                "title": "Another title",
                "author": "Someone",
                "total_copies": 1
            })),
        )
        .to_request(),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let loan = test::call_service(
        &app,
        send(
            &state,
            Method::POST,
            "/api/v1/library/loans",
            &librarian,
            Some(json!({ "library_item_id": item_id, "borrower_id": borrower_id })),
        )
        .to_request(),
    )
    .await;
    assert_eq!(loan.status(), StatusCode::CREATED);

    let delete = test::call_service(
        &app,
        send(
            &state,
            Method::DELETE,
            &format!("/api/v1/library/items/{item_id}"),
            &librarian,
            None,
        )
        .to_request(),
    )
    .await;
    assert_eq!(delete.status(), StatusCode::CONFLICT);
}
