//! Article API integration tests
//!
//! Submission, public listing, visibility, editing and deletion.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::*;

#[tokio::test]
async fn test_submit_is_pending_and_only_in_mine() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;

    let response = app.post("/api/articles", Some(&author.token), article_body("T1: pilot study")).await;
    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.body["status"], "pending");
    assert_eq!(response.body["authorName"], author.name);
    let id = response.body["id"].as_str().unwrap().to_string();

    let mine = app.get("/api/articles/mine", Some(&author.token)).await;
    assert_eq!(mine.body[0]["id"], id);
    assert_eq!(mine.body[0]["status"], "pending");

    let public = app.get("/api/articles", None).await;
    assert_status!(public, StatusCode::OK);
    assert_eq!(public.body["total"], 0);
    assert_eq!(public.body["articles"], json!([]));
}

#[tokio::test]
async fn test_submit_by_admin_is_still_pending() {
    let app = TestApp::new().await;
    let admin = login_admin(&app).await;

    let response = app.post("/api/articles", Some(&admin.token), article_body("Admin Article")).await;
    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.body["status"], "pending");
}

#[tokio::test]
async fn test_submit_requires_auth_and_valid_fields() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;

    let response = app.post("/api/articles", None, article_body("No Token")).await;
    assert_error!(response, StatusCode::UNAUTHORIZED);

    let cases = [
        json!({ "content": "Long enough content here" }),
        json!({ "title": "ab", "content": "Long enough content here" }),
        json!({ "title": "x".repeat(201), "content": "Long enough content here" }),
        json!({ "title": "Fine Title", "content": "short" }),
        json!({ "title": "Fine Title", "content": "Long enough content here", "category": "Astrology" }),
    ];
    for body in cases {
        let response = app.post("/api/articles", Some(&author.token), body).await;
        assert_error!(response, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_submit_then_get_round_trip() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;
    let admin = login_admin(&app).await;

    let body = article_body("Formative Assessment in Practice");
    let id = publish_article(&app, &author.token, &admin.token, "Formative Assessment in Practice").await;

    let response = app.get(&format!("/api/articles/{}", id), None).await;
    assert_status!(response, StatusCode::OK);
    for field in ["title", "abstract", "content", "category", "keywords"] {
        assert_eq!(response.body[field], body[field], "field {} changed", field);
    }
    assert_eq!(response.body["authorId"], author.id.to_string());
    assert_eq!(response.body["readTime"], 1);
}

#[tokio::test]
async fn test_get_counts_views() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;
    let admin = login_admin(&app).await;
    let id = publish_article(&app, &author.token, &admin.token, "Viewed Article").await;

    let uri = format!("/api/articles/{}", id);
    assert_eq!(app.get(&uri, None).await.body["views"], 1);
    assert_eq!(app.get(&uri, Some(&author.token)).await.body["views"], 2);
}

#[tokio::test]
async fn test_unapproved_article_visibility() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;
    let stranger = register_unique_user(&app).await;
    let admin = login_admin(&app).await;
    let id = submit_article(&app, &author.token, "Hidden Draft").await;
    let uri = format!("/api/articles/{}", id);

    assert_error!(app.get(&uri, None).await, StatusCode::NOT_FOUND);
    assert_error!(app.get(&uri, Some(&stranger.token)).await, StatusCode::NOT_FOUND);
    assert_status!(app.get(&uri, Some(&author.token)).await, StatusCode::OK);
    assert_status!(app.get(&uri, Some(&admin.token)).await, StatusCode::OK);

    assert_error!(app.get(&uri, Some("not-a-token")).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_unknown_or_malformed_id() {
    let app = TestApp::new().await;
    let uri = format!("/api/articles/{}", uuid::Uuid::new_v4());
    assert_error!(app.get(&uri, None).await, StatusCode::NOT_FOUND, "Article not found");
    assert_error!(app.get("/api/articles/12345", None).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_search_category_and_paging() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;
    let admin = login_admin(&app).await;

    for i in 0..3 {
        publish_article(&app, &author.token, &admin.token, &format!("Reading Study {}", i)).await;
    }
    let response = app
        .post(
            "/api/articles",
            Some(&author.token),
            json!({
                "title": "Inclusive Classrooms",
                "content": "Findings on inclusion in mainstream schools.",
                "category": "Special Education",
                "keywords": ["inclusion"]
            }),
        )
        .await;
    let special = response.body["id"].as_str().unwrap().to_string();
    app.put(&format!("/api/articles/{}/approve", special), Some(&admin.token), json!({}))
        .await;

    let all = app.get("/api/articles", None).await;
    assert_eq!(all.body["total"], 4);
    assert_eq!(all.body["articles"][0]["id"], special);

    let searched = app.get("/api/articles?search=reading", None).await;
    assert_eq!(searched.body["total"], 3);

    let by_keyword = app.get("/api/articles?search=INCLUSION", None).await;
    assert_eq!(by_keyword.body["total"], 1);

    let by_category = app.get("/api/articles?category=Special%20Education", None).await;
    assert_eq!(by_category.body["total"], 1);
    assert_eq!(by_category.body["articles"][0]["category"], "Special Education");

    let page = app.get("/api/articles?page=2&limit=3", None).await;
    assert_eq!(page.body["page"], 2);
    assert_eq!(page.body["totalPages"], 2);
    assert_eq!(page.body["articles"].as_array().unwrap().len(), 1);

    let clamped = app.get("/api/articles?page=0&limit=1000", None).await;
    assert_eq!(clamped.body["page"], 1);
    assert_eq!(clamped.body["articles"].as_array().unwrap().len(), 4);

    let wildcard = app.get("/api/articles?search=%25", None).await;
    assert_eq!(wildcard.body["total"], 0);
}

#[tokio::test]
async fn test_edit_by_owner() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;
    let id = submit_article(&app, &author.token, "Original Title").await;

    let response = app
        .put(&format!("/api/articles/{}", id), Some(&author.token), article_body("Revised Title"))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["title"], "Revised Title");
    assert_eq!(response.body["status"], "pending");
}

#[tokio::test]
async fn test_edit_by_non_owner_fails() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;
    let other = register_unique_user(&app).await;
    let admin = login_admin(&app).await;
    let id = submit_article(&app, &author.token, "Not Yours").await;
    let uri = format!("/api/articles/{}", id);

    for token in [&other.token, &admin.token] {
        let response = app.put(&uri, Some(token), article_body("Hijacked Title")).await;
        assert_error!(response, StatusCode::NOT_FOUND);
    }

    let response = app.get(&uri, Some(&author.token)).await;
    assert_eq!(response.body["title"], "Not Yours");
}

#[tokio::test]
async fn test_edit_checks_ownership_before_the_body() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;
    let other = register_unique_user(&app).await;
    let id = submit_article(&app, &author.token, "Guarded Article").await;
    let uri = format!("/api/articles/{}", id);
    let invalid = json!({ "title": "x", "content": "" });

    let response = app.put(&uri, Some(&other.token), invalid.clone()).await;
    assert_error!(response, StatusCode::NOT_FOUND);

    let response = app.put(&uri, Some(&author.token), invalid).await;
    assert_error!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_edit_approved_article_is_forbidden() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;
    let admin = login_admin(&app).await;
    let id = publish_article(&app, &author.token, &admin.token, "Published Work").await;

    let response = app
        .put(&format!("/api/articles/{}", id), Some(&author.token), article_body("Sneaky Change"))
        .await;
    assert_error!(response, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_non_owner_delete_leaves_article() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;
    let other = register_unique_user(&app).await;
    let id = submit_article(&app, &author.token, "Keep Me").await;
    let uri = format!("/api/articles/{}", id);

    assert_error!(app.delete(&uri, Some(&other.token)).await, StatusCode::NOT_FOUND);
    assert_status!(app.get(&uri, Some(&author.token)).await, StatusCode::OK);
}

#[tokio::test]
async fn test_owner_and_admin_delete() {
    let app = TestApp::new().await;
    let author = register_unique_user(&app).await;
    let admin = login_admin(&app).await;

    let own = submit_article(&app, &author.token, "Own Delete").await;
    let response = app.delete(&format!("/api/articles/{}", own), Some(&author.token)).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["message"], "Article deleted successfully");

    let moderated = publish_article(&app, &author.token, &admin.token, "Admin Delete").await;
    let uri = format!("/api/articles/{}", moderated);
    assert_status!(app.delete(&uri, Some(&admin.token)).await, StatusCode::OK);
    assert_error!(app.get(&uri, None).await, StatusCode::NOT_FOUND);
    assert_error!(app.delete(&uri, Some(&admin.token)).await, StatusCode::NOT_FOUND);
}
