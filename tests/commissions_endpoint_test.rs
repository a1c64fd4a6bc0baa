use axum::http::StatusCode;
use partnerhub::api::{self, AppState};
use partnerhub::db::init_db;
use partnerhub::{Partner, PartnerId, PartnerRole, Repository};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

struct TestApp {
    app: axum::Router,
    state: AppState,
    _temp: TempDir,
}

async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");

    let repo = Arc::new(Repository::new(pool));
    let state = AppState::new(repo);
    let app = api::create_router(state.clone());

    TestApp {
        app,
        state,
        _temp: temp_dir,
    }
}

async fn request(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let req = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(axum::body::Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };

    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, value)
}

/// Creates a partner and a signed referral; returns (referral id, commission id).
async fn signed_referral(test_app: &TestApp, partner_id: &str) -> (String, String) {
    test_app
        .state
        .repo
        .insert_partner(&Partner {
            id: PartnerId::new(partner_id.to_string()),
            name: "North Agency".to_string(),
            email: "north@agency.test".to_string(),
            role: PartnerRole::ReferralPartner,
            agency: "North".to_string(),
            contact: "+1 555 0100".to_string(),
            profile_complete: true,
        })
        .await
        .unwrap();

    let (status, created) = request(
        test_app.app.clone(),
        "POST",
        "/v1/referrals",
        Some(serde_json::json!({
            "partnerId": partner_id,
            "brandName": "Acme Apparel",
            "monthlyGmv": 500000,
            "vertical": "fashion",
            "platform": "shopify",
            "product": "checkout"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let referral_id = created["id"].as_str().unwrap().to_string();

    let (status, _body) = request(
        test_app.app.clone(),
        "PUT",
        &format!("/v1/referrals/{}/stage", referral_id),
        Some(serde_json::json!({"newStage": "signed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_status, commissions) = request(
        test_app.app.clone(),
        "GET",
        &format!("/v1/commissions?partner={}", partner_id),
        None,
    )
    .await;
    let commission_id = commissions[0]["id"].as_str().unwrap().to_string();
    (referral_id, commission_id)
}

#[tokio::test]
async fn test_get_commission_by_id() {
    let test_app = setup_test_app().await;
    let (referral_id, commission_id) = signed_referral(&test_app, "p1").await;

    let (status, body) = request(
        test_app.app.clone(),
        "GET",
        &format!("/v1/commissions/{}", commission_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["referralId"], referral_id);
    assert_eq!(body["partnerId"], "p1");
    assert_eq!(body["amount"], serde_json::json!(18000.0));
    assert_eq!(body["status"], "pending");
    assert!(body.get("paidAt").is_none());
    assert_eq!(body["details"]["effectiveRate"], serde_json::json!(0.036));
}

#[tokio::test]
async fn test_commission_not_found() {
    let test_app = setup_test_app().await;
    let (status, _body) =
        request(test_app.app.clone(), "GET", "/v1/commissions/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_advances_through_processing_to_paid() {
    let test_app = setup_test_app().await;
    let (referral_id, commission_id) = signed_referral(&test_app, "p1").await;

    let (status, body) = request(
        test_app.app.clone(),
        "PUT",
        &format!("/v1/commissions/{}/status", commission_id),
        Some(serde_json::json!({"status": "processing"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "processing");
    assert!(body.get("paidAt").is_none());

    let (status, body) = request(
        test_app.app.clone(),
        "PUT",
        &format!("/v1/commissions/{}/status", commission_id),
        Some(serde_json::json!({"status": "paid"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "paid");
    assert!(body["paidAt"].is_i64());

    // payout moved the amount from pending to earned on the referral
    let (_status, referral) = request(
        test_app.app.clone(),
        "GET",
        &format!("/v1/referrals/{}", referral_id),
        None,
    )
    .await;
    assert_eq!(referral["pendingCommission"], serde_json::json!(0.0));
    assert_eq!(referral["earnedCommission"], serde_json::json!(18000.0));
}

#[tokio::test]
async fn test_status_cannot_move_backwards() {
    let test_app = setup_test_app().await;
    let (_referral_id, commission_id) = signed_referral(&test_app, "p1").await;

    let (status, _body) = request(
        test_app.app.clone(),
        "PUT",
        &format!("/v1/commissions/{}/status", commission_id),
        Some(serde_json::json!({"status": "paid"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    for backwards in ["processing", "pending"] {
        let (status, body) = request(
            test_app.app.clone(),
            "PUT",
            &format!("/v1/commissions/{}/status", commission_id),
            Some(serde_json::json!({"status": backwards})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("cannot move"));
    }
}

#[tokio::test]
async fn test_status_reassertion_is_a_noop() {
    let test_app = setup_test_app().await;
    let (referral_id, commission_id) = signed_referral(&test_app, "p1").await;

    let (status, _body) = request(
        test_app.app.clone(),
        "PUT",
        &format!("/v1/commissions/{}/status", commission_id),
        Some(serde_json::json!({"status": "paid"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // paying twice must not settle the accumulators twice
    let (status, _body) = request(
        test_app.app.clone(),
        "PUT",
        &format!("/v1/commissions/{}/status", commission_id),
        Some(serde_json::json!({"status": "paid"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_status, referral) = request(
        test_app.app.clone(),
        "GET",
        &format!("/v1/referrals/{}", referral_id),
        None,
    )
    .await;
    assert_eq!(referral["earnedCommission"], serde_json::json!(18000.0));
    assert_eq!(referral["pendingCommission"], serde_json::json!(0.0));
}

#[tokio::test]
async fn test_unknown_status_rejected() {
    let test_app = setup_test_app().await;
    let (_referral_id, commission_id) = signed_referral(&test_app, "p1").await;

    let (status, _body) = request(
        test_app.app.clone(),
        "PUT",
        &format!("/v1/commissions/{}/status", commission_id),
        Some(serde_json::json!({"status": "refunded"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_requires_partner_param() {
    let test_app = setup_test_app().await;
    let (status, _body) = request(test_app.app.clone(), "GET", "/v1/commissions", None).await;
    // axum rejects the missing required query parameter
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
