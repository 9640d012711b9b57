//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `FetchClient`,
//! `ResourceCache` and `ImageLoader` over real HTTP through
//! `ReqwestTransport`.

use std::sync::Arc;

use swipe_core::{
    CancellationToken, EndpointDescriptor, FetchClient, FetchError, ImageLoader, LoadState,
    ReqwestTransport, ResourceCache, Transport, User, UserEndpoint,
};

mod common;

use common::RecordingReporter;

/// Start the mock server and return its base URL (with trailing slash).
async fn start_server() -> (String, mock_server::AppState) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = mock_server::AppState::default();
    let router = mock_server::router(state.clone());
    tokio::spawn(async move { mock_server::serve(listener, router).await.unwrap() });
    (format!("http://{addr}/"), state)
}

fn transport() -> Arc<dyn Transport> {
    Arc::new(ReqwestTransport::new())
}

#[tokio::test]
async fn fetches_and_decodes_users() {
    let (base_url, _) = start_server().await;
    let client = FetchClient::new(base_url, transport());

    let users: Vec<User> = client
        .fetch_array(&UserEndpoint::GetUsers, &CancellationToken::new())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id(), 1);
    assert_eq!(users[0].profile_pic_url.as_deref(), Some("images/avatar1.png"));
    assert_eq!(users[1].name, "Theo");
    assert!(users[1].profile_pic_url.is_none());
}

#[tokio::test]
async fn empty_array_is_success() {
    let (base_url, _) = start_server().await;
    let client = FetchClient::new(base_url, transport());

    let visitors: Vec<User> = client
        .fetch_array(&UserEndpoint::GetVisitors, &CancellationToken::new())
        .await
        .unwrap()
        .unwrap();

    assert!(visitors.is_empty());
}

#[tokio::test]
async fn post_body_roundtrips_through_server() {
    let (base_url, _) = start_server().await;
    let client = FetchClient::new(base_url, transport());
    let payload = mock_server::sample_users();
    let endpoint = EndpointDescriptor::post("downapp/echo")
        .with_json_body(&payload)
        .unwrap();

    let echoed: Vec<User> = client
        .fetch_array(&endpoint, &CancellationToken::new())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(echoed.len(), payload.len());
    assert_eq!(echoed[0].about_me, payload[0].about_me);
    assert_eq!(echoed[1].loc, payload[1].loc);
}

#[tokio::test]
async fn server_error_is_invalid_response_and_reported() {
    let (base_url, _) = start_server().await;
    let reporter = Arc::new(RecordingReporter::default());
    let client = FetchClient::new(base_url, transport()).with_reporter(reporter.clone());

    let result = client
        .fetch_array::<User, _>(&EndpointDescriptor::get("status/500"), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.unwrap_err(), FetchError::InvalidResponse(Some(500)));
    assert_eq!(reporter.contexts(), vec!["FetchClient".to_string()]);
}

#[tokio::test]
async fn unknown_path_is_invalid_response() {
    let (base_url, _) = start_server().await;
    let client = FetchClient::new(base_url, transport());

    let result = client
        .fetch_array::<User, _>(&EndpointDescriptor::get("downapp/nope"), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.unwrap_err(), FetchError::InvalidResponse(Some(404)));
}

#[tokio::test]
async fn image_is_fetched_once_then_served_from_cache() {
    let (base_url, state) = start_server().await;
    let cache = ResourceCache::new(transport());
    let url = format!("{base_url}images/avatar1.png");
    let cancel = CancellationToken::new();

    let first = cache.load(&url, &cancel).await.unwrap().unwrap();
    let second = cache.load(&url, &cancel).await.unwrap().unwrap();

    assert_eq!(first.as_ref(), mock_server::AVATAR_PNG);
    assert_eq!(first, second);
    assert_eq!(state.image_hits(), 1);
}

#[tokio::test]
async fn missing_image_surfaces_failed_state() {
    let (base_url, state) = start_server().await;
    let reporter = Arc::new(RecordingReporter::default());
    let cache = ResourceCache::new(transport());
    let loader = ImageLoader::new(Some(format!("{base_url}images/missing.png")), cache.clone())
        .with_reporter(reporter.clone());

    let result = loader.resolve(&CancellationToken::new()).await.unwrap();

    assert_eq!(result.unwrap_err(), FetchError::InvalidResponse(Some(404)));
    assert_eq!(loader.state(), LoadState::Failed(FetchError::InvalidResponse(Some(404))));
    assert_eq!(reporter.contexts(), vec!["ImageLoader".to_string()]);
    assert!(cache.is_empty());
    assert_eq!(state.image_hits(), 1);
}

#[tokio::test]
async fn refused_connection_is_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let reporter = Arc::new(RecordingReporter::default());
    let client =
        FetchClient::new(format!("http://{addr}/"), transport()).with_reporter(reporter.clone());

    let result = client
        .fetch_array::<User, _>(&UserEndpoint::GetUsers, &CancellationToken::new())
        .await
        .unwrap();

    assert!(matches!(result, Err(FetchError::Transport(_))));
    assert_eq!(reporter.contexts().len(), 1);
}
