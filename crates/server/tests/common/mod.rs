use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware,
    response::Response,
    Router,
};
use server::state::AppState;
use shared_types::LoginResponse;
use tower::ServiceExt;

const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789";

/// Fresh state with the demo accounts and the demo tailor record.
#[allow(dead_code)]
pub fn test_state() -> AppState {
    std::env::set_var("JWT_SECRET", TEST_JWT_SECRET);
    AppState::with_demo_data().expect("demo data seeds")
}

/// REST routes plus `/health`, behind the auth middleware, on `state`.
#[allow(dead_code)]
pub fn app_for(state: AppState) -> Router {
    server::rest::api_router()
        .route("/health", axum::routing::get(server::health::health_check))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            server::auth::middleware::auth_middleware,
        ))
        .with_state(state)
}

/// Router over a fresh demo state. Each call is fully isolated.
#[allow(dead_code)]
pub fn test_app_with_auth() -> Router {
    app_for(test_state())
}

#[allow(dead_code)]
/// Send a request and return the raw response.
pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn read(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn request(method: &str, uri: &str, json: Option<&str>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if json.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = json.map(|j| Body::from(j.to_string())).unwrap_or_else(Body::empty);
    builder.body(body).unwrap()
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    read(send(app, request("GET", uri, None, None)).await).await
}

#[allow(dead_code)]
pub async fn get_with_auth(app: &Router, uri: &str, token: &str) -> (StatusCode, String) {
    read(send(app, request("GET", uri, None, Some(token))).await).await
}

#[allow(dead_code)]
pub async fn post_json(app: &Router, uri: &str, json: &str) -> (StatusCode, String) {
    read(send(app, request("POST", uri, Some(json), None)).await).await
}

#[allow(dead_code)]
pub async fn post_json_with_auth(
    app: &Router,
    uri: &str,
    json: &str,
    token: &str,
) -> (StatusCode, String) {
    read(send(app, request("POST", uri, Some(json), Some(token))).await).await
}

#[allow(dead_code)]
pub async fn put_json_with_auth(
    app: &Router,
    uri: &str,
    json: &str,
    token: &str,
) -> (StatusCode, String) {
    read(send(app, request("PUT", uri, Some(json), Some(token))).await).await
}

#[allow(dead_code)]
pub async fn delete_with_auth(app: &Router, uri: &str, token: &str) -> (StatusCode, String) {
    read(send(app, request("DELETE", uri, None, Some(token))).await).await
}

#[allow(dead_code)]
/// Sign in over REST and return the parsed response.
pub async fn login_as(app: &Router, username: &str, password: &str) -> LoginResponse {
    let json = serde_json::json!({ "username": username, "password": password });
    let (status, body) = post_json(app, "/api/auth/login", &json.to_string()).await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    serde_json::from_str(&body).unwrap()
}

#[allow(dead_code)]
/// Access token for one of the demo accounts.
pub async fn token_for(app: &Router, username: &str) -> String {
    let password = format!("{username}123");
    login_as(app, username, &password).await.access_token
}
