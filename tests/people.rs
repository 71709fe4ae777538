#[macro_use]
mod common;

use actix_web::http::{Method, StatusCode};
use serde_json::json;

use campus_server::models::users::{entities::UserRole, requests::NewUser};
use campus_server::storage::UserStorage;

use common::{PASSWORD, send, setup};

#[actix_web::test]
async fn student_numbers_continue_after_a_delete() {
    let state = setup().await;
    let campus = state.seed_campus().await;
    let app = campus_app!(state.storage, state.cache);
    let admin = session!(app, state, state.admin_email(), state.admin_password());

    // 基础数据里已有 DIT/0001/2025
    let mut created = Vec::new();
    for i in 2..=3 {
        let (status, body) = send(
            &app,
            state
                .json(
                    Method::POST,
                    "/api/v1/students",
                    &admin,
                    json!({
                        "email": format!("admit{i}@campus.local"),
                        "password": PASSWORD,
                        "first_name": "Amina",
                        "last_name": "Otieno",
                        "program_id": campus.program_id,
                        "admission_date": "2025-09-01"
                    }),
                )
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["student_number"], format!("DIT/000{i}/2025"));
        created.push(body["data"]["id"].as_i64().expect("student id"));
    }

    let (status, _) = send(
        &app,
        state
            .delete(&format!("/api/v1/students/{}", campus.student_id), &admin)
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // 删除一条后新学号接在最大值之后，而不是与已有学号重复
    for expected in ["DIT/0004/2025", "DIT/0005/2025"] {
        let (status, body) = send(
            &app,
            state
                .json(
                    Method::POST,
                    "/api/v1/students",
                    &admin,
                    json!({
                        "email": format!("{}@campus.local", expected.replace('/', "-").to_lowercase()),
                        "password": PASSWORD,
                        "first_name": "Brian",
                        "last_name": "Mwangi",
                        "program_id": campus.program_id,
                        "admission_date": "2025-09-01"
                    }),
                )
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["data"]["student_number"], expected);
    }

    // 其他年份从 1 开始
    let (status, body) = send(
        &app,
        state
            .json(
                Method::POST,
                "/api/v1/students",
                &admin,
                json!({
                    "email": "next-intake@campus.local",
                    "password": PASSWORD,
                    "first_name": "Cheruto",
                    "last_name": "Kiptoo",
                    "program_id": campus.program_id,
                    "admission_date": "2026-01-10"
                }),
            )
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["student_number"], "DIT/0001/2026");
}

#[actix_web::test]
async fn staff_numbers_continue_after_a_delete() {
    let state = setup().await;
    let campus = state.seed_campus().await;
    let app = campus_app!(state.storage, state.cache);
    let admin = session!(app, state, state.admin_email(), state.admin_password());

    let create = |email: &str| {
        state
            .json(
                Method::POST,
                "/api/v1/lecturers",
                &admin,
                json!({
                    "email": email,
                    "password": PASSWORD,
                    "first_name": "Grace",
                    "last_name": "Wanjiru",
                    "department_id": campus.department_id
                }),
            )
            .to_request()
    };

    let (status, second) = send(&app, create("second@campus.local")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["data"]["staff_number"], "LEC/0002");

    // 删掉基础数据里的 LEC/0001
    let (status, _) = send(
        &app,
        state
            .delete(&format!("/api/v1/users/{}", campus.lecturer_id), &admin)
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, third) = send(&app, create("third@campus.local")).await;
    assert_eq!(status, StatusCode::CREATED, "{third}");
    assert_eq!(third["data"]["staff_number"], "LEC/0003");
}

#[actix_web::test]
async fn constraint_conflicts_do_not_leak_sql() {
    let state = setup().await;
    state.create_user("taken@campus.local", UserRole::Librarian).await;

    let err = state
        .storage
        .create_user(NewUser {
            email: "taken@campus.local".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role: UserRole::Librarian,
            first_name: "Dup".to_string(),
            last_name: "User".to_string(),
            phone: None,
            gender: None,
            date_of_birth: None,
        })
        .await
        .expect_err("duplicate email should be rejected");

    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert_eq!(err.public_message(), "Resource already exists");
    assert!(!err.message().contains("users"));
    assert!(!err.message().to_uppercase().contains("UNIQUE"));
}
