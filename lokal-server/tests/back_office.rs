//! Products, customers, transactions, setup and dashboard over HTTP

mod common;

use common::{Call, app, initialize, register, send, state};
use http::{Method, StatusCode};
use lokal_server::AuthPolicy;
use serde_json::{Value, json};

fn number(v: &Value) -> f64 {
    v.as_f64().unwrap()
}

async fn create_product(app: &axum::Router, token: &str, body: Value) -> Value {
    let reply = send(app, Call::post("/products").token(token).json(body)).await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    reply.body["data"].clone()
}

async fn create_customer(app: &axum::Router, token: &str, name: &str) -> String {
    let reply = send(
        app,
        Call::post("/customers").token(token).json(json!({"name": name, "phone": "0812"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    reply.body["data"]["id"].as_str().unwrap().to_string()
}

async fn stock_of(app: &axum::Router, token: &str, id: &str) -> i64 {
    let uri = format!("/products/{id}");
    let reply = send(app, Call::get(&uri).token(token)).await;
    reply.body["data"]["stock"].as_i64().unwrap()
}

#[tokio::test]
async fn test_product_crud() {
    let app = app(&state(AuthPolicy::Enforced));
    let token = register(&app, "admin@toko.id").await;

    let product = create_product(
        &app,
        &token,
        json!({"sku": "IDM-GRG", "name": "Indomie Goreng", "category": "Makanan", "price": 3500, "stock": 40}),
    )
    .await;
    let id = product["id"].as_str().unwrap().to_string();
    assert_eq!(product["unit"], "pcs");

    // Duplicate SKU (case-insensitive)
    let reply = send(
        &app,
        Call::post("/products")
            .token(&token)
            .json(json!({"sku": "idm-grg", "name": "Lain", "price": 1})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CONFLICT);

    // Validation
    let reply = send(
        &app,
        Call::post("/products").token(&token).json(json!({"name": "", "price": 1})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    let uri = format!("/products/{id}");
    let reply = send(
        &app,
        Call::new(Method::PUT, &uri).token(&token).json(json!({"price": "3750.50"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(number(&reply.body["data"]["price"]), 3750.5);
    assert_eq!(reply.body["data"]["name"], "Indomie Goreng");

    let reply = send(&app, Call::get("/products?search=indo").token(&token)).await;
    assert_eq!(reply.body["data"].as_array().unwrap().len(), 1);
    let reply = send(&app, Call::get("/products.php?category=minuman").token(&token)).await;
    assert!(reply.body["data"].as_array().unwrap().is_empty());

    let reply = send(&app, Call::new(Method::DELETE, &uri).token(&token)).await;
    assert_eq!(reply.status, StatusCode::OK);
    let reply = send(&app, Call::new(Method::DELETE, &uri).token(&token)).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["code"], 6001);
    let reply = send(&app, Call::get(&uri).token(&token)).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cash_sale_decrements_stock() {
    let app = app(&state(AuthPolicy::Enforced));
    let token = register(&app, "kasir@toko.id").await;
    let gula = create_product(&app, &token, json!({"name": "Gula", "price": 17500, "stock": 10})).await;
    let gula_id = gula["id"].as_str().unwrap();

    let reply = send(
        &app,
        Call::post("/transactions").token(&token).json(json!({
            "items": [{"product_id": gula_id, "quantity": 2}],
            "payment_method": "cash",
            "paid_amount": 50000,
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    let sale = &reply.body["data"];
    assert_eq!(number(&sale["total"]), 35000.0);
    assert_eq!(number(&sale["change_amount"]), 15000.0);
    assert!(sale["invoice_number"].as_str().unwrap().starts_with("INV-"));
    assert!(sale["invoice_number"].as_str().unwrap().ends_with("-0001"));
    assert_eq!(stock_of(&app, &token, gula_id).await, 8);

    let id = sale["id"].as_str().unwrap();
    let reply = send(&app, Call::get(&format!("/transactions/{id}")).token(&token)).await;
    assert_eq!(reply.status, StatusCode::OK);
    let reply = send(&app, Call::get("/transactions/nope").token(&token)).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = send(&app, Call::get("/transactions").token(&token)).await;
    assert_eq!(reply.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_sale_exceeding_stock_changes_nothing() {
    let app = app(&state(AuthPolicy::Enforced));
    let token = register(&app, "kasir@toko.id").await;
    let a = create_product(&app, &token, json!({"name": "Kopi", "price": 1500, "stock": 10})).await;
    let b = create_product(&app, &token, json!({"name": "Teh", "price": 5000, "stock": 1})).await;
    let a_id = a["id"].as_str().unwrap();
    let b_id = b["id"].as_str().unwrap();

    let reply = send(
        &app,
        Call::post("/transactions").token(&token).json(json!({
            "items": [
                {"product_id": a_id, "quantity": 3},
                {"product_id": b_id, "quantity": 2},
            ],
            "payment_method": "qris",
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert_eq!(reply.body["code"], 6003);

    assert_eq!(stock_of(&app, &token, a_id).await, 10);
    assert_eq!(stock_of(&app, &token, b_id).await, 1);
    let reply = send(&app, Call::get("/transactions").token(&token)).await;
    assert!(reply.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_credit_sale_adds_receivable_and_pay_is_capped() {
    let app = app(&state(AuthPolicy::Enforced));
    let token = register(&app, "kasir@toko.id").await;
    let beras = create_product(&app, &token, json!({"name": "Beras", "price": 78000, "stock": 5})).await;
    let customer = create_customer(&app, &token, "Bu Sari").await;

    // Credit needs a customer
    let reply = send(
        &app,
        Call::post("/transactions").token(&token).json(json!({
            "items": [{"product_id": beras["id"], "quantity": 1}],
            "payment_method": "credit",
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["code"], 5006);

    let reply = send(
        &app,
        Call::post("/transactions").token(&token).json(json!({
            "items": [{"product_id": beras["id"], "quantity": 1}],
            "payment_method": "credit",
            "customer_id": customer,
            "paid_amount": 28000,
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    assert_eq!(number(&reply.body["data"]["receivable_amount"]), 50000.0);

    let uri = format!("/customers/{customer}");
    let reply = send(&app, Call::get(&uri).token(&token)).await;
    assert_eq!(number(&reply.body["data"]["receivables"]), 50000.0);

    let receivables = format!("/customers/{customer}/receivables");
    let reply = send(
        &app,
        Call::new(Method::PUT, &receivables)
            .token(&token)
            .json(json!({"amount": 60000, "operation": "pay"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["code"], 7002);

    let reply = send(
        &app,
        Call::new(Method::PUT, &receivables)
            .token(&token)
            .json(json!({"amount": 20000, "operation": "pay"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(number(&reply.body["data"]["receivables"]), 30000.0);

    let reply = send(
        &app,
        Call::new(Method::PUT, "/customers/nope/receivables")
            .token(&token)
            .json(json!({"amount": 1, "operation": "add"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_insufficient_cash_is_rejected() {
    let app = app(&state(AuthPolicy::Enforced));
    let token = register(&app, "kasir@toko.id").await;
    let p = create_product(&app, &token, json!({"name": "Sabun", "price": 4500, "stock": 3})).await;

    let reply = send(
        &app,
        Call::post("/transactions").token(&token).json(json!({
            "items": [{"product_id": p["id"], "quantity": 1}],
            "payment_method": "cash",
            "paid_amount": 4000,
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(stock_of(&app, &token, p["id"].as_str().unwrap()).await, 3);

    let reply = send(
        &app,
        Call::post("/transactions").token(&token).json(json!({
            "items": [{"product_id": p["id"], "quantity": 1}],
            "payment_method": "barter",
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["code"], 5003);
}

#[tokio::test]
async fn test_oversized_amounts_are_rejected() {
    let app = app(&state(AuthPolicy::Enforced));
    let token = register(&app, "kasir@toko.id").await;

    for body in [
        json!({"name": "Emas", "price": 1e28, "stock": 100}),
        json!({"name": "Emas", "price": 1000, "stock": 1_000_000_000_000_000_i64}),
    ] {
        let reply = send(&app, Call::post("/products").token(&token).json(body)).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{}", reply.body);
        assert_eq!(reply.body["code"], 8);
    }

    let reply = send(
        &app,
        Call::post("/customers").token(&token).json(json!({"name": "Bu Sri", "receivables": 7e28})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["code"], 8);

    let customer = create_customer(&app, &token, "Bu Sri").await;
    let receivables = format!("/customers/{customer}/receivables");
    let reply = send(
        &app,
        Call::new(Method::PUT, &receivables)
            .token(&token)
            .json(json!({"amount": 7e28, "operation": "add"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["code"], 8);
}

#[tokio::test]
async fn test_large_sale_gets_a_complete_response() {
    let app = app(&state(AuthPolicy::Enforced));
    let token = register(&app, "kasir@toko.id").await;
    let emas = create_product(
        &app,
        &token,
        json!({"name": "Emas", "price": 1_000_000_000_000_000_i64, "stock": 1_000_000_000}),
    )
    .await;
    let emas_id = emas["id"].as_str().unwrap();

    // Quantities summing past i64 end in a JSON error, and stock is untouched
    let reply = send(
        &app,
        Call::post("/transactions").token(&token).json(json!({
            "items": [
                {"product_id": emas_id, "quantity": 10},
                {"product_id": emas_id, "quantity": i64::MAX},
            ],
            "payment_method": "cash",
        })),
    )
    .await;
    assert!(reply.status.is_client_error(), "{}", reply.status);
    assert!(reply.body["code"].is_u64());
    assert_eq!(stock_of(&app, &token, emas_id).await, 1_000_000_000);

    let reply = send(
        &app,
        Call::post("/transactions").token(&token).json(json!({
            "items": [{"product_id": emas_id, "quantity": 10}],
            "payment_method": "cash",
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    assert_eq!(number(&reply.body["data"]["total"]), 1e16);
    assert_eq!(stock_of(&app, &token, emas_id).await, 999_999_990);

    let reply = send(&app, Call::get("/dashboard").token(&token)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(number(&reply.body["data"]["total_revenue"]), 1e16);
}

#[tokio::test]
async fn test_setup_is_idempotent() {
    let app = app(&state(AuthPolicy::Enforced));
    let token = register(&app, "admin@toko.id").await;

    let reply = send(&app, Call::get("/setup/status").token(&token)).await;
    assert_eq!(reply.body["data"]["initialized"], false);

    initialize(&app, &token).await;
    let reply = send(&app, Call::get("/setup/status").token(&token)).await;
    assert_eq!(reply.body["data"]["initialized"], true);
    assert_eq!(reply.body["data"]["products"], 10);
    assert_eq!(reply.body["data"]["customers"], 1);

    let reply = send(&app, Call::post("/setup/initialize").token(&token)).await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert_eq!(reply.body["code"], 3001);

    let reply = send(
        &app,
        Call::post("/setup/initialize")
            .token(&token)
            .json(json!({"force": true})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["data"]["products_created"], 0);
    assert_eq!(reply.body["data"]["products_skipped"], 10);
}

#[tokio::test]
async fn test_dashboard_aliases_agree() {
    let app = app(&state(AuthPolicy::Enforced));
    let token = register(&app, "admin@toko.id").await;
    initialize(&app, &token).await;

    let reply = send(&app, Call::get("/dashboard").token(&token)).await;
    let summary = &reply.body["data"];
    assert_eq!(summary["total_products"], 10);
    assert_eq!(summary["today_transactions"], 0);
    assert_eq!(summary["low_stock_count"], 0);

    for uri in ["/dashboard.php", "/legacy/dashboard.php"] {
        let alias = send(&app, Call::get(uri).token(&token)).await;
        assert_eq!(alias.status, StatusCode::OK);
        assert_eq!(alias.body["data"]["total_products"], summary["total_products"]);
    }
}
