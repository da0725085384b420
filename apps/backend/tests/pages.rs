mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use backend::test_support::{create_test_app, create_test_state};
use backend_test_support::error_body::assert_error_response;

#[actix_web::test]
async fn pages_are_served_from_the_static_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Feedback</h1>").unwrap();
    std::fs::write(dir.path().join("admin.html"), "<h1>Admin</h1>").unwrap();

    let app = create_test_app(create_test_state().with_static_dir(dir.path()).build().await).await;

    for (uri, marker) in [("/", "Feedback"), ("/admin", "Admin")] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        let body = test::read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().contains(marker));
    }
}

#[actix_web::test]
async fn missing_page_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_test_app(create_test_state().with_static_dir(dir.path()).build().await).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/admin").to_request()).await;
    assert_error_response(resp, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

#[actix_web::test]
async fn unknown_route_uses_the_error_body() {
    let app = create_test_app(create_test_state().build().await).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/nope").to_request()).await;
    assert_error_response(resp, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}
