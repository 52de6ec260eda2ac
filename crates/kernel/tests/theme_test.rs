#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Theme page tests.

mod common;

use axum::http::{StatusCode, header};
use common::{TestApp, body_string};
use equipments_kernel::Config;
use equipments_test_utils::{assert, test_equipment};

fn paged_app(page_size: u32) -> TestApp {
    TestApp::with_config(Config {
        equipments_page_size: page_size,
        equipments_title: "My Gear".to_string(),
        ..Config::default()
    })
}

#[tokio::test]
async fn test_equipments_page_renders_groups_and_items() {
    let app = TestApp::new();
    app.seed_catalogue().await;

    let response = app.get("/equipments").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));

    let html = body_string(response).await;
    assert::contains(&html, "<title>装备</title>");
    assert::contains(&html, "Cameras (1)");
    assert::contains(&html, "Drones (2)");
    assert::contains(&html, "Fujifilm X100V");
    assert::contains(&html, "DJI Avata");
    assert::contains(&html, "1 / 1");
    assert::not_contains(&html, "rel=\"next\"");
    assert::not_contains(&html, "rel=\"prev\"");
}

#[tokio::test]
async fn test_equipments_page_empty_catalogue() {
    let app = TestApp::new();

    let html = body_string(app.get("/equipments").await).await;
    assert::contains(&html, "Nothing here yet.");
}

#[tokio::test]
async fn test_equipments_page_renders_escaped_description() {
    let app = TestApp::new();
    app.client()
        .create(
            test_equipment("ricoh", "cameras")
                .with_description("Fits in a <b>pocket</b>")
                .build(),
        )
        .await
        .unwrap();
    app.client()
        .create(test_equipment("plain", "cameras").build())
        .await
        .unwrap();

    let html = body_string(app.get("/equipments").await).await;
    assert::contains(&html, "<p>Fits in a &lt;b&gt;pocket&lt;&#x2F;b&gt;</p>");
    assert::not_contains(&html, "<b>pocket</b>");
    assert_eq!(html.matches("<p>").count(), 1);
}

#[tokio::test]
async fn test_equipments_page_filters_by_group() {
    let app = TestApp::new();
    app.seed_catalogue().await;

    let html = body_string(app.get("/equipments?group=cameras").await).await;
    assert::contains(&html, "Fujifilm X100V");
    assert::not_contains(&html, "DJI Avata");
    // Navigation still lists every group
    assert::contains(&html, "Drones (2)");
}

#[tokio::test]
async fn test_equipments_paging_links() {
    let app = paged_app(1);
    app.seed_catalogue().await;

    let first = body_string(app.get("/equipments").await).await;
    assert::contains(&first, "<title>My Gear</title>");
    assert::contains(&first, "1 / 3");
    assert::contains(&first, "rel=\"next\" href=\"/equipments/page/2\"");
    assert::not_contains(&first, "rel=\"prev\"");

    let middle = body_string(app.get("/equipments/page/2").await).await;
    assert::contains(&middle, "2 / 3");
    assert::contains(&middle, "rel=\"next\" href=\"/equipments/page/3\"");
    assert::contains(&middle, "rel=\"prev\" href=\"/equipments\"");

    let last = body_string(app.get("/equipments/page/3").await).await;
    assert::contains(&last, "3 / 3");
    assert::not_contains(&last, "rel=\"next\"");
}

#[tokio::test]
async fn test_equipments_invalid_page_falls_back_to_first() {
    let app = paged_app(1);
    app.seed_catalogue().await;

    for path in ["/equipments/page/abc", "/equipments/page/0"] {
        let response = app.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        let html = body_string(response).await;
        assert::contains(&html, "1 / 3");
        assert::contains(&html, "rel=\"next\" href=\"/equipments/page/2\"");
        assert::not_contains(&html, "/page/abc");
        assert::not_contains(&html, "/page/0");
        assert::not_contains(&html, "/page/1\"");
    }
}

#[tokio::test]
async fn test_equipments_paging_links_keep_group() {
    let app = paged_app(1);
    app.seed_catalogue().await;

    let html = body_string(app.get("/equipments/page/abc?group=drones").await).await;
    assert::contains(&html, "1 / 2");
    assert::contains(&html, "rel=\"next\" href=\"/equipments/page/2?group=drones\"");
}

#[tokio::test]
async fn test_equipments_unknown_route_is_not_found() {
    let app = TestApp::new();
    let response = app.get("/equipments/page").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
