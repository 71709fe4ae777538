#[macro_use]
mod common;

use actix_web::cookie::Cookie;
use actix_web::http::{Method, StatusCode};
use actix_web::test;
use serde_json::{Value, json};

use campus_server::models::users::entities::UserRole;

use common::{PASSWORD, TestState, cookie, setup};

fn post(state: &TestState, uri: &str, session: &Cookie<'static>, body: Value) -> test::TestRequest {
    state
        .request()
        .method(Method::POST)
        .uri(uri)
        .cookie(session.clone())
        .set_json(body)
}

fn get(state: &TestState, uri: &str, session: &Cookie<'static>) -> test::TestRequest {
    state.request().uri(uri).cookie(session.clone())
}

fn delete(state: &TestState, uri: &str, session: &Cookie<'static>) -> test::TestRequest {
    state
        .request()
        .method(Method::DELETE)
        .uri(uri)
        .cookie(session.clone())
}

#[actix_web::test]
async fn duplicate_codes_conflict_without_mutation() {
    let state = setup().await;
    let app = campus_app!(state.storage, state.cache);
    let login = test::call_service(
        &app,
        state
            .login_request(&state.admin_email(), &state.admin_password())
            .to_request(),
    )
    .await;
    let admin = cookie(&login, "accessToken").expect("admin session");

    let created = test::call_service(
        &app,
        post(&state, "/api/v1/faculties", &admin, json!({ "code": "ENG", "name": "Engineering" }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let duplicate = test::call_service(
        &app,
        post(&state, "/api/v1/faculties", &admin, json!({ "code": "ENG", "name": "Other" }))
            .to_request(),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(duplicate).await;
    assert_eq!(body["success"], false);

    let list = test::call_service(&app, get(&state, "/api/v1/faculties", &admin).to_request()).await;
    let list: Value = test::read_body_json(list).await;
    assert_eq!(list["data"]["pagination"]["total"], 1);
    assert_eq!(list["data"]["items"][0]["name"], "Engineering");
}

#[actix_web::test]
async fn deleting_parents_with_dependents_conflicts() {
    let state = setup().await;
    let app = campus_app!(state.storage, state.cache);
    let login = test::call_service(
        &app,
        state
            .login_request(&state.admin_email(), &state.admin_password())
            .to_request(),
    )
    .await;
    let admin = cookie(&login, "accessToken").expect("admin session");

    let faculty = test::call_service(
        &app,
        post(&state, "/api/v1/faculties", &admin, json!({ "code": "SCI", "name": "Science" }))
            .to_request(),
    )
    .await;
    let faculty: Value = test::read_body_json(faculty).await;
    let faculty_id = faculty["data"]["id"].as_i64().expect("faculty id");

    let department = test::call_service(
        &app,
        post(
            &state,
            "/api/v1/departments",
            &admin,
            json!({ "faculty_id": faculty_id, "code": "CS", "name": "Computer Science" }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(department.status(), StatusCode::CREATED);
    let department: Value = test::read_body_json(department).await;
    let department_id = department["data"]["id"].as_i64().expect("department id");

    let program = test::call_service(
        &app,
        post(
            &state,
            "/api/v1/programs",
            &admin,
            json!({
                "department_id": department_id,
                "code": "ND-CS",
                "name": "National Diploma in Computer Science",
                "level": "diploma",
                "duration_years": 2
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(program.status(), StatusCode::CREATED);
    let program: Value = test::read_body_json(program).await;
    let program_id = program["data"]["id"].as_i64().expect("program id");

    let course = test::call_service(
        &app,
        post(
            &state,
            "/api/v1/courses",
            &admin,
            json!({
                "program_id": program_id,
                "code": "CSC101",
                "title": "Introduction to Computing",
                "credits": 3,
                "semester": 1
            }),
        )
        .to_request(),
    )
    .await;
    assert_eq!(course.status(), StatusCode::CREATED);

    let faculty_delete = test::call_service(
        &app,
        delete(&state, &format!("/api/v1/faculties/{faculty_id}"), &admin).to_request(),
    )
    .await;
    assert_eq!(faculty_delete.status(), StatusCode::CONFLICT);

    let program_delete = test::call_service(
        &app,
        delete(&state, &format!("/api/v1/programs/{program_id}"), &admin).to_request(),
    )
    .await;
    assert_eq!(program_delete.status(), StatusCode::CONFLICT);

    // 依赖仍在
    let still_there = test::call_service(
        &app,
        get(&state, &format!("/api/v1/programs/{program_id}"), &admin).to_request(),
    )
    .await;
    assert_eq!(still_there.status(), StatusCode::OK);
}

#[actix_web::test]
async fn pagination_reports_total_pages() {
    let state = setup().await;
    let app = campus_app!(state.storage, state.cache);
    let login = test::call_service(
        &app,
        state
            .login_request(&state.admin_email(), &state.admin_password())
            .to_request(),
    )
    .await;
    let admin = cookie(&login, "accessToken").expect("admin session");

    for i in 0..5 {
        let resp = test::call_service(
            &app,
            post(
                &state,
                "/api/v1/faculties",
                &admin,
                json!({ "code": format!("F{i}"), "name": format!("Faculty {i}") }),
            )
            .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let page = test::call_service(
        &app,
        get(&state, "/api/v1/faculties?page=3&limit=2", &admin).to_request(),
    )
    .await;
    assert_eq!(page.status(), StatusCode::OK);
    let page: Value = test::read_body_json(page).await;
    assert_eq!(page["data"]["pagination"]["total"], 5);
    assert_eq!(page["data"]["pagination"]["total_pages"], 3);
    assert_eq!(page["data"]["items"].as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn students_may_read_but_not_create_faculties() {
    let state = setup().await;
    state.create_user("reader@campus.local", UserRole::Student).await;
    let app = campus_app!(state.storage, state.cache);
    let login = test::call_service(
        &app,
        state
            .login_request("reader@campus.local", PASSWORD)
            .to_request(),
    )
    .await;
    let student = cookie(&login, "accessToken").expect("student session");

    let list = test::call_service(&app, get(&state, "/api/v1/faculties", &student).to_request()).await;
    assert_eq!(list.status(), StatusCode::OK);

    let create = test::call_service(
        &app,
        post(&state, "/api/v1/faculties", &student, json!({ "code": "ART", "name": "Arts" }))
            .to_request(),
    )
    .await;
    assert_eq!(create.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn invalid_codes_report_field_errors() {
    let state = setup().await;
    let app = campus_app!(state.storage, state.cache);
    let login = test::call_service(
        &app,
        state
            .login_request(&state.admin_email(), &state.admin_password())
            .to_request(),
    )
    .await;
    let admin = cookie(&login, "accessToken").expect("admin session");

    let resp = test::call_service(
        &app,
        post(&state, "/api/v1/faculties", &admin, json!({ "code": "eng lower", "name": "E" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("field errors")
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert!(fields.contains(&"code"));
    assert!(fields.contains(&"name"));
}
