use std::time::Duration;

use ghostsync::Error;
use ghostsync::management::{MAX_ATTEMPTS, SelectionOptions, find_unliked_track};
use ghostsync::spotify::{Endpoints, SpotifyClient};
use mockito::{Matcher, Server};
use serde_json::json;

fn client_for(base: &str) -> SpotifyClient {
    SpotifyClient::new(Endpoints {
        authorize_url: format!("{}/authorize", base),
        token_url: format!("{}/api/token", base),
        api_url: base.to_string(),
    })
    .unwrap()
}

fn fast(max_attempts: u32) -> SelectionOptions {
    SelectionOptions {
        max_attempts,
        retry_delay: Duration::ZERO,
        ..SelectionOptions::default()
    }
}

fn search_body(items: serde_json::Value) -> String {
    json!({ "tracks": { "items": items } }).to_string()
}

#[tokio::test]
async fn test_selects_the_market_scenario_track() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("type".into(), "track".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
        ]))
        .match_header("authorization", "Bearer access-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(search_body(json!([
            { "id": "abc", "available_markets": ["US", "GB"], "is_local": false }
        ])))
        .expect(1)
        .create_async()
        .await;
    let contains = server
        .mock("GET", "/me/library/contains")
        .match_query(Matcher::UrlEncoded("uris".into(), "spotify:track:abc".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[false]")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let track = find_unliked_track(&client, "access-1", "US", &fast(3))
        .await
        .unwrap();

    assert_eq!(track, "abc");
    search.assert_async().await;
    contains.assert_async().await;
}

#[tokio::test]
async fn test_filters_then_takes_first_unliked() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(search_body(json!([
            { "id": "local", "available_markets": ["US"], "is_local": true },
            { "id": "elsewhere", "available_markets": ["GB"], "is_local": false },
            { "id": null, "available_markets": ["US"], "is_local": false },
            { "id": "liked", "available_markets": ["US"], "is_local": false },
            { "id": "fresh", "available_markets": ["DE", "US"], "is_local": false },
            { "id": "later", "available_markets": ["US"], "is_local": false }
        ])))
        .create_async()
        .await;
    // Only the three candidates are checked, in search order
    let contains = server
        .mock("GET", "/me/library/contains")
        .match_query(Matcher::UrlEncoded(
            "uris".into(),
            "spotify:track:liked,spotify:track:fresh,spotify:track:later".into(),
        ))
        .with_status(200)
        .with_body("[true, false, false]")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let track = find_unliked_track(&client, "token", "US", &fast(3))
        .await
        .unwrap();

    assert_eq!(track, "fresh");
    contains.assert_async().await;
}

#[tokio::test]
async fn test_excluded_candidates_are_never_returned() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(search_body(json!([
            { "id": "local", "available_markets": ["US"], "is_local": true },
            { "id": "elsewhere", "available_markets": ["GB"], "is_local": false }
        ])))
        .expect(2)
        .create_async()
        .await;
    // Nothing survives the filter, so membership is never checked
    let contains = server
        .mock("GET", "/me/library/contains")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let result = find_unliked_track(&client, "token", "US", &fast(2)).await;

    assert!(matches!(result, Err(Error::Exhausted(2))));
    search.assert_async().await;
    contains.assert_async().await;
}

#[tokio::test]
async fn test_exhaustion_stops_after_max_attempts() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(search_body(json!([
            { "id": "liked", "available_markets": ["US"], "is_local": false }
        ])))
        .expect(MAX_ATTEMPTS as usize)
        .create_async()
        .await;
    let contains = server
        .mock("GET", "/me/library/contains")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[true]")
        .expect(MAX_ATTEMPTS as usize)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let options = SelectionOptions {
        retry_delay: Duration::ZERO,
        ..SelectionOptions::default()
    };
    let result = find_unliked_track(&client, "token", "US", &options).await;

    match result {
        Err(e @ Error::Exhausted(30)) => {
            assert!(e.to_string().contains("30 attempts"));
        }
        other => panic!("expected exhaustion, got {:?}", other),
    }
    search.assert_async().await;
    contains.assert_async().await;
}

#[tokio::test]
async fn test_server_errors_cost_an_attempt() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(3)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let result = find_unliked_track(&client, "token", "US", &fast(3)).await;

    assert!(matches!(result, Err(Error::Exhausted(3))));
    search.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_aborts_immediately() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let result = find_unliked_track(&client, "expired-access", "US", &fast(5)).await;

    assert!(matches!(
        result,
        Err(Error::Status {
            endpoint: "search",
            status
        }) if status.as_u16() == 401
    ));
    search.assert_async().await;
}

#[tokio::test]
async fn test_transport_error_aborts() {
    let client = client_for("http://127.0.0.1:1");
    let result = find_unliked_track(&client, "token", "US", &fast(5)).await;

    assert!(matches!(
        result,
        Err(Error::Transport {
            endpoint: "search",
            ..
        })
    ));
}
