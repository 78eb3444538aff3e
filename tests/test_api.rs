use std::sync::Arc;

use allrecipes_parser::server::{create_router, ServerState};
use allrecipes_parser::RecipeParser;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

const SPAGHETTI_PIE: &str = include_str!("fixtures/spaghetti_pie.html");

fn app_for(server: &mockito::Server) -> Router {
    let parser = RecipeParser::builder()
        .base_url(server.url())
        .quiet()
        .build()
        .unwrap();
    create_router(Arc::new(ServerState::new(parser)))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::ORIGIN, "https://cookbook.example.com")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_get_recipe_returns_json() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipe/11772")
        .with_status(200)
        .with_body(SPAGHETTI_PIE)
        .create_async()
        .await;

    let response = app_for(&server)
        .oneshot(get("/api/recipe/11772"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["recipe_id"], "11772");
    assert_eq!(json["name"], "Spaghetti Pie I");
    assert_eq!(json["author"], "Kimberley");
    assert_eq!(
        json["image_url"],
        "https://images.media-allrecipes.com/userphotos/560x315/726090.jpg"
    );
    assert_eq!(json["ingredients"].as_array().unwrap().len(), 3);
    assert_eq!(json["directions"].as_array().unwrap().len(), 2);
    assert_eq!(json["footnotes"][0], "Nutrition: 200 calories");
}

#[tokio::test]
async fn test_upstream_not_found_maps_to_404() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipe/404404")
        .with_status(404)
        .create_async()
        .await;

    let response = app_for(&server)
        .oneshot(get("/api/recipe/404404"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upstream_failure_maps_to_500() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipe/1")
        .with_status(502)
        .create_async()
        .await;

    let response = app_for(&server).oneshot(get("/api/recipe/1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_broken_page_maps_to_500_with_field() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipe/2")
        .with_status(200)
        .with_body(r#"<h1 itemprop="name">Half a page</h1><span itemprop="ingredients">"#)
        .create_async()
        .await;

    let response = app_for(&server).oneshot(get("/api/recipe/2")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let message = String::from_utf8(body.to_vec()).unwrap();
    assert!(message.contains("ingredient"), "{message}");
}

#[tokio::test]
async fn test_unknown_route() {
    let server = mockito::Server::new_async().await;

    let response = app_for(&server)
        .oneshot(get("/api/recipes"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
