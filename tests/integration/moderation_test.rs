//! Moderation integration tests
//!
//! Approve, reject, the review queue and administrator gating.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::common::*;

#[tokio::test]
async fn test_approve_makes_article_public() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;
    let admin = login_admin(&app).await;
    let id = submit_article(&app, &author.token, "Ready For Review").await;

    let response = app
        .put(&format!("/api/articles/{}/approve", id), Some(&admin.token), json!({}))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "approved");

    let public = app.get("/api/articles", None).await;
    assert_eq!(public.body["articles"][0]["id"], id);
}

#[tokio::test]
async fn test_reject_scenario() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;
    let admin = login_admin(&app).await;
    let id = submit_article(&app, &author.token, "Needs More Work").await;

    let response = app
        .put(
            &format!("/api/articles/{}/reject", id),
            Some(&admin.token),
            json!({ "reason": "too short" }),
        )
        .await;
    assert_status!(response, StatusCode::OK);

    let fetched = app.get(&format!("/api/articles/{}", id), Some(&admin.token)).await;
    assert_eq!(fetched.body["status"], "rejected");
    assert_eq!(fetched.body["rejectionReason"], "too short");

    let public = app.get("/api/articles", None).await;
    assert_eq!(public.body["total"], 0);
}

#[tokio::test]
async fn test_reject_requires_reason() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;
    let admin = login_admin(&app).await;
    let id = submit_article(&app, &author.token, "Rejection Pending").await;
    let uri = format!("/api/articles/{}/reject", id);

    assert_error!(app.put(&uri, Some(&admin.token), json!({ "reason": "  " })).await, StatusCode::BAD_REQUEST);
    assert_error!(app.put(&uri, Some(&admin.token), json!({})).await, StatusCode::BAD_REQUEST);

    let fetched = app.get(&format!("/api/articles/{}", id), Some(&admin.token)).await;
    assert_eq!(fetched.body["status"], "pending");
}

#[tokio::test]
async fn test_moderation_requires_admin_in_every_state() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;
    let admin = login_admin(&app).await;

    let pending = submit_article(&app, &author.token, "Pending One").await;
    let approved = publish_article(&app, &author.token, &admin.token, "Approved One").await;
    let rejected = submit_article(&app, &author.token, "Rejected One").await;
    app.put(
        &format!("/api/articles/{}/reject", rejected),
        Some(&admin.token),
        json!({ "reason": "off topic" }),
    )
    .await;

    for id in [pending, approved, rejected, Uuid::new_v4().to_string()] {
        let approve = app
            .put(&format!("/api/articles/{}/approve", id), Some(&author.token), json!({}))
            .await;
        assert_error!(approve, StatusCode::FORBIDDEN);

        let reject = app
            .put(
                &format!("/api/articles/{}/reject", id),
                Some(&author.token),
                json!({ "reason": "nope" }),
            )
            .await;
        assert_error!(reject, StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn test_moderating_unknown_article_is_not_found() {
    let app = TestApp::new().await;
    let admin = login_admin(&app).await;
    let id = Uuid::new_v4();

    let approve = app
        .put(&format!("/api/articles/{}/approve", id), Some(&admin.token), json!({}))
        .await;
    assert_error!(approve, StatusCode::NOT_FOUND);

    let reject = app
        .put(
            &format!("/api/articles/{}/reject", id),
            Some(&admin.token),
            json!({ "reason": "missing" }),
        )
        .await;
    assert_error!(reject, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_moderation_only_from_pending() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;
    let admin = login_admin(&app).await;
    let id = publish_article(&app, &author.token, &admin.token, "Already Approved").await;

    let again = app
        .put(&format!("/api/articles/{}/approve", id), Some(&admin.token), json!({}))
        .await;
    assert_error!(again, StatusCode::CONFLICT);

    let reject = app
        .put(
            &format!("/api/articles/{}/reject", id),
            Some(&admin.token),
            json!({ "reason": "changed my mind" }),
        )
        .await;
    assert_error!(reject, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_edit_resubmits_rejected_article() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;
    let admin = login_admin(&app).await;
    let id = submit_article(&app, &author.token, "First Attempt").await;
    app.put(
        &format!("/api/articles/{}/reject", id),
        Some(&admin.token),
        json!({ "reason": "cite your sources" }),
    )
    .await;

    let response = app
        .put(&format!("/api/articles/{}", id), Some(&author.token), article_body("Second Attempt"))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "pending");
    assert!(response.body["rejectionReason"].is_null());

    let queue = app.get("/api/articles/admin/pending", Some(&admin.token)).await;
    assert_eq!(queue.body[0]["id"], id);
}

#[tokio::test]
async fn test_pending_queue_oldest_first_and_admin_only() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;
    let admin = login_admin(&app).await;
    let first = submit_article(&app, &author.token, "Submitted First").await;
    let second = submit_article(&app, &author.token, "Submitted Second").await;

    let queue = app.get("/api/articles/admin/pending", Some(&admin.token)).await;
    assert_status!(queue, StatusCode::OK);
    assert_eq!(queue.body[0]["id"], first);
    assert_eq!(queue.body[1]["id"], second);

    let denied = app.get("/api/articles/admin/pending", Some(&author.token)).await;
    assert_error!(denied, StatusCode::FORBIDDEN);
}
