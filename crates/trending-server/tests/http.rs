use actix_web::{http::StatusCode, test, web, App};
use serde_json::Value;
use trending_client::{ClientConfig, TrendingClient};
use trending_server::{configure_routes, AppState};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIXTURE: &str = include_str!("../../trending-client/tests/fixtures/trending_python.html");

fn state_for(github: &MockServer) -> web::Data<AppState> {
    let client = TrendingClient::with_config(ClientConfig {
        base_url: github.uri(),
        ..ClientConfig::default()
    })
    .expect("client builds");
    web::Data::new(AppState::new(client))
}

async fn mount_page(github: &MockServer, language: &str, since: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/trending/{language}")))
        .and(query_param("since", since))
        .respond_with(ResponseTemplate::new(200).set_body_string(FIXTURE))
        .expect(1)
        .mount(github)
        .await;
}

#[actix_web::test]
async fn serves_trending_with_defaults() {
    let github = MockServer::start().await;
    mount_page(&github, "python", "daily").await;

    let app = test::init_service(
        App::new()
            .app_data(state_for(&github))
            .configure(configure_routes),
    )
    .await;
    let response = test::call_service(&app, test::TestRequest::get().uri("/api/trending").to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "public, max-age=300"
    );
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["language"], "python");
    assert_eq!(body["since"], "daily");
    assert!(body["lastUpdated"].as_str().unwrap().contains('T'));
    let repos = body["repositories"].as_array().unwrap();
    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0]["owner"], "huggingface");
    assert_eq!(repos[0]["starsToday"], 214);
    assert_eq!(repos[0]["builtBy"][0]["username"], "ArthurZucker");
}

#[actix_web::test]
async fn passes_language_and_since_through() {
    let github = MockServer::start().await;
    mount_page(&github, "rust", "weekly").await;

    let app = test::init_service(
        App::new()
            .app_data(state_for(&github))
            .configure(configure_routes),
    )
    .await;
    let request = test::TestRequest::get()
        .uri("/api/trending?language=rust&since=weekly")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["language"], "rust");
    assert_eq!(body["since"], "weekly");
}

#[actix_web::test]
async fn empty_parameters_fall_back_to_defaults() {
    let github = MockServer::start().await;
    mount_page(&github, "python", "daily").await;

    let app = test::init_service(
        App::new()
            .app_data(state_for(&github))
            .configure(configure_routes),
    )
    .await;
    let request = test::TestRequest::get()
        .uri("/api/trending?language=&since=")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn invalid_since_is_rejected_without_scraping() {
    let github = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FIXTURE))
        .expect(0)
        .mount(&github)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(state_for(&github))
            .configure(configure_routes),
    )
    .await;
    let request = test::TestRequest::get()
        .uri("/api/trending?since=yearly")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "Invalid since parameter");
    assert!(body["details"].as_str().unwrap().contains("yearly"));
}

#[actix_web::test]
async fn upstream_failure_is_a_server_error() {
    let github = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trending/python"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&github)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(state_for(&github))
            .configure(configure_routes),
    )
    .await;
    let response =
        test::call_service(&app, test::TestRequest::get().uri("/api/trending").to_request()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get("cache-control").is_none());
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "Failed to fetch trending repositories");
    assert!(body["details"].as_str().unwrap().contains("503"));
}

#[actix_web::test]
async fn health_reports_ok() {
    let github = MockServer::start().await;
    let app = test::init_service(
        App::new()
            .app_data(state_for(&github))
            .configure(configure_routes),
    )
    .await;
    let body: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request())
            .await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn undecodable_query_gets_json_error() {
    let github = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FIXTURE))
        .expect(0)
        .mount(&github)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(state_for(&github))
            .configure(configure_routes),
    )
    .await;
    let request = test::TestRequest::get()
        .uri("/api/trending?since=daily&since=weekly")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "Invalid query parameters");
    assert!(body["details"].as_str().unwrap().contains("since"));
}
