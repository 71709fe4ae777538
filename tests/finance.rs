#[macro_use]
mod common;

use actix_web::http::{Method, StatusCode};
use serde_json::{Value, json};

use campus_server::storage::FinanceStorage;

use common::{send, setup};

fn payment(invoice_id: i64, amount: f64, reference: &str) -> Value {
    json!({
        "invoice_id": invoice_id,
        "amount": amount,
        "method": "mpesa",
        "reference": reference
    })
}

#[actix_web::test]
async fn payments_move_invoice_through_its_states() {
    let state = setup().await;
    let campus = state.seed_campus().await;
    let app = campus_app!(state.storage, state.cache);
    let admin = session!(app, state, state.admin_email(), state.admin_password());

    let (status, body) = send(
        &app,
        state
            .json(
                Method::POST,
                "/api/v1/invoices",
                &admin,
                json!({
                    "student_id": campus.student_id,
                    "due_date": "2099-12-31",
                    "description": "Semester one",
                    "items": [
                        { "description": "Tuition", "quantity": 1, "unit_amount": 28000.0 },
                        { "description": "Lab fee", "quantity": 2, "unit_amount": 1500.0 }
                    ]
                }),
            )
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let invoice = &body["data"];
    let invoice_id = invoice["id"].as_i64().expect("invoice id");
    assert_eq!(invoice["total_amount"], 31000.0);
    assert_eq!(invoice["status"], "unpaid");
    assert_eq!(invoice["items"].as_array().map(Vec::len), Some(2));
    assert!(
        invoice["invoice_number"]
            .as_str()
            .is_some_and(|n| n.starts_with("INV-"))
    );

    // 非正数与超额都是 402
    for (amount, reference) in [(0.0, "ZERO-0001"), (-5.0, "NEG-0001"), (40000.0, "OVER-0001")] {
        let (status, body) = send(
            &app,
            state
                .json(Method::POST, "/api/v1/payments", &admin, payment(invoice_id, amount, reference))
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED, "{amount}: {body}");
    }

    let (status, body) = send(
        &app,
        state
            .json(Method::POST, "/api/v1/payments", &admin, payment(invoice_id, 1000.0, "MPESA-0001"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["amount"], 1000.0);

    let (status, body) = send(
        &app,
        state.get(&format!("/api/v1/invoices/{invoice_id}"), &admin).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "partial");
    assert_eq!(body["data"]["balance"], 30000.0);

    // 流水号不能重复，且不改动账单
    let (status, _) = send(
        &app,
        state
            .json(Method::POST, "/api/v1/payments", &admin, payment(invoice_id, 500.0, "MPESA-0001"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        state
            .json(Method::POST, "/api/v1/payments", &admin, payment(invoice_id, 30000.0, "MPESA-0002"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (_, body) = send(
        &app,
        state.get(&format!("/api/v1/invoices/{invoice_id}"), &admin).to_request(),
    )
    .await;
    assert_eq!(body["data"]["status"], "paid");
    assert_eq!(body["data"]["amount_paid"], 31000.0);
    assert_eq!(body["data"]["balance"], 0.0);

    let (status, _) = send(
        &app,
        state
            .json(Method::POST, "/api/v1/payments", &admin, payment(invoice_id, 1.0, "MPESA-0003"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);

    // 存储层同样拒绝超出总额的累加
    let rejected = state
        .storage
        .apply_invoice_payment(invoice_id, 1.0)
        .await
        .expect("storage call");
    assert!(rejected.is_none());

    // 已有缴费的账单不能取消
    let (status, _) = send(
        &app,
        state
            .json(Method::POST, &format!("/api/v1/invoices/{invoice_id}/cancel"), &admin, json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn cancelled_invoices_refuse_payments() {
    let state = setup().await;
    let campus = state.seed_campus().await;
    let app = campus_app!(state.storage, state.cache);
    let admin = session!(app, state, state.admin_email(), state.admin_password());

    let (status, body) = send(
        &app,
        state
            .json(
                Method::POST,
                "/api/v1/invoices",
                &admin,
                json!({
                    "student_id": campus.student_id,
                    "due_date": "2099-12-31",
                    "items": [{ "description": "Hostel", "unit_amount": 9000.0 }]
                }),
            )
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let invoice_id = body["data"]["id"].as_i64().expect("invoice id");

    let cancel = format!("/api/v1/invoices/{invoice_id}/cancel");
    let (status, body) = send(
        &app,
        state.json(Method::POST, &cancel, &admin, json!({})).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "cancelled");

    let (status, _) = send(
        &app,
        state.json(Method::POST, &cancel, &admin, json!({})).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        state
            .json(Method::POST, "/api/v1/payments", &admin, payment(invoice_id, 100.0, "BANK-0001"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);

    let untouched = state
        .storage
        .apply_invoice_payment(invoice_id, 100.0)
        .await
        .expect("storage call");
    assert!(untouched.is_none());
}

#[actix_web::test]
async fn generated_invoices_follow_the_student_program() {
    let state = setup().await;
    let campus = state.seed_campus().await;
    let app = campus_app!(state.storage, state.cache);
    let admin = session!(app, state, state.admin_email(), state.admin_password());

    let mut fees = Vec::new();
    for (program_id, amount) in [(campus.other_program_id, 45000.0), (campus.program_id, 52000.0)] {
        let (status, body) = send(
            &app,
            state
                .json(
                    Method::POST,
                    "/api/v1/fee-structures",
                    &admin,
                    json!({
                        "program_id": program_id,
                        "academic_year": "2025/2026",
                        "semester": 1,
                        "amount": amount
                    }),
                )
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        fees.push(body["data"]["id"].as_i64().expect("fee id"));
    }

    // 收费标准属于其他专业
    let (status, _) = send(
        &app,
        state
            .json(
                Method::POST,
                "/api/v1/invoices/generate",
                &admin,
                json!({ "student_id": campus.student_id, "fee_structure_id": fees[0] }),
            )
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        state
            .json(
                Method::POST,
                "/api/v1/invoices/generate",
                &admin,
                json!({ "student_id": campus.student_id, "fee_structure_id": fees[1] }),
            )
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["total_amount"], 52000.0);
    assert_eq!(body["data"]["fee_structure_id"], fees[1]);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"]["status"], "unpaid");
}
