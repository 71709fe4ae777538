#[macro_use]
mod common;

use actix_web::http::{Method, StatusCode};
use serde_json::json;

use common::{PASSWORD, send, setup};

#[actix_web::test]
async fn enrollment_respects_capacity_and_reactivates_drops() {
    let state = setup().await;
    let campus = state.seed_campus().await;
    let app = campus_app!(state.storage, state.cache);
    let admin = session!(app, state, state.admin_email(), state.admin_password());
    let lecturer = session!(app, state, "lecturer@campus.local", PASSWORD);

    // 讲师为自己开一个只有一个名额的班
    let (status, body) = send(
        &app,
        state
            .json(
                Method::POST,
                "/api/v1/class-sections",
                &lecturer,
                json!({
                    "course_id": campus.course_id,
                    "lecturer_id": campus.lecturer_id,
                    "section_code": "S1",
                    "academic_year": "2025/2026",
                    "semester": 1,
                    "capacity": 1
                }),
            )
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let section_id = body["data"]["id"].as_i64().expect("section id");

    // 课程下还有班级
    let (status, _) = send(
        &app,
        state
            .delete(&format!("/api/v1/courses/{}", campus.course_id), &admin)
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let enroll = |student_id: i64| {
        state
            .json(
                Method::POST,
                "/api/v1/enrollments",
                &admin,
                json!({ "class_section_id": section_id, "student_id": student_id }),
            )
            .to_request()
    };

    let (status, body) = send(&app, enroll(campus.student_id)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let first_enrollment = body["data"]["id"].as_i64().expect("enrollment id");

    let (status, _) = send(&app, enroll(campus.student_id)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let second = state
        .create_student("second@campus.local", campus.program_id, "DIT/0002/2025")
        .await;
    let (status, body) = send(&app, enroll(second)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().is_some_and(|m| m.contains("full")));

    // 退课释放名额
    let (status, body) = send(
        &app,
        state
            .delete(&format!("/api/v1/enrollments/{first_enrollment}"), &admin)
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "dropped");

    let (status, body) = send(&app, enroll(second)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let second_enrollment = body["data"]["id"].as_i64().expect("enrollment id");

    let (status, _) = send(
        &app,
        state
            .delete(&format!("/api/v1/enrollments/{second_enrollment}"), &admin)
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // 重新选课沿用原来的记录
    let (status, body) = send(&app, enroll(campus.student_id)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["id"], first_enrollment);
    assert_eq!(body["data"]["status"], "enrolled");
}

#[actix_web::test]
async fn grades_follow_assessment_lifecycle() {
    let state = setup().await;
    let campus = state.seed_campus().await;
    let app = campus_app!(state.storage, state.cache);
    let admin = session!(app, state, state.admin_email(), state.admin_password());
    let lecturer = session!(app, state, "lecturer@campus.local", PASSWORD);

    let (status, body) = send(
        &app,
        state
            .json(
                Method::POST,
                "/api/v1/class-sections",
                &lecturer,
                json!({
                    "course_id": campus.course_id,
                    "lecturer_id": campus.lecturer_id,
                    "section_code": "S1",
                    "academic_year": "2025/2026",
                    "semester": 1,
                    "capacity": 40
                }),
            )
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let section_id = body["data"]["id"].as_i64().expect("section id");

    let dropped = state
        .create_student("dropped@campus.local", campus.program_id, "DIT/0002/2025")
        .await;
    let mut enrollments = Vec::new();
    for student_id in [campus.student_id, dropped] {
        let (status, body) = send(
            &app,
            state
                .json(
                    Method::POST,
                    "/api/v1/enrollments",
                    &admin,
                    json!({ "class_section_id": section_id, "student_id": student_id }),
                )
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        enrollments.push(body["data"]["id"].as_i64().expect("enrollment id"));
    }
    let (status, _) = send(
        &app,
        state
            .delete(&format!("/api/v1/enrollments/{}", enrollments[1]), &admin)
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        state
            .json(
                Method::POST,
                "/api/v1/assessments",
                &lecturer,
                json!({
                    "class_section_id": section_id,
                    "title": "CAT 1",
                    "kind": "cat",
                    "max_score": 30.0,
                    "weight": 15.0
                }),
            )
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["status"], "draft");
    let assessment_id = body["data"]["id"].as_i64().expect("assessment id");

    let grade = |student_id: i64, score: f64| {
        state
            .json(
                Method::POST,
                "/api/v1/grades",
                &lecturer,
                json!({ "assessment_id": assessment_id, "student_id": student_id, "score": score }),
            )
            .to_request()
    };
    let transition = |target: &str| {
        state
            .json(
                Method::PATCH,
                &format!("/api/v1/assessments/{assessment_id}/status"),
                &lecturer,
                json!({ "status": target }),
            )
            .to_request()
    };

    // 草稿状态不接收成绩
    let (status, _) = send(&app, grade(campus.student_id, 20.0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 不能跳过发布
    let (status, _) = send(&app, transition("grading")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, transition("published")).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "published");

    let (status, _) = send(&app, grade(campus.student_id, 35.0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, grade(campus.student_id, 24.0)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["letter"], "A");
    let grade_id = body["data"]["id"].as_i64().expect("grade id");

    // 重复录入覆盖原成绩
    let (status, body) = send(&app, grade(campus.student_id, 15.0)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["id"], grade_id);
    assert_eq!(body["data"]["letter"], "C");

    let (status, _) = send(&app, grade(dropped, 20.0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for target in ["grading", "completed"] {
        let (status, body) = send(&app, transition(target)).await;
        assert_eq!(status, StatusCode::OK, "{target}: {body}");
        assert_eq!(body["data"]["status"], target);
    }

    let (status, _) = send(&app, transition("published")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, grade(campus.student_id, 20.0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
