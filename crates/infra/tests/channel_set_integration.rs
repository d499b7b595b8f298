//! Integration tests for the channel set and interception pipeline
//!
//! **Coverage:**
//! - Bearer token propagation to every channel, and its removal
//! - 401 invalidating the token for all channels
//! - Error normalization for rejected, unreachable, and unsendable calls
//! - Cache buster and query merging, including `_t` written into the path
//! - Every façade verb, PATCH included
//! - Per-channel base URL and timeout reconfiguration

#[path = "support.rs"]
mod support;

use std::time::Duration;

use futures::future::join_all;
use geoview_domain::{ApiErrorCategory, ChannelKind, NETWORK_ERROR_MESSAGE};
use geoview_infra::RequestOptions;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_ok(server: &MockServer) {
    Mock::given(path_regex(".*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_token_is_sent_on_every_channel() {
    let (server, channels) = support::start().await;
    mount_ok(&server).await;

    channels.set_token("T-123").unwrap();
    for kind in ChannelKind::ALL {
        let _: Value = channels.service(kind).get("/ping").await.unwrap();
    }

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
    for request in &requests {
        assert_eq!(support::header(request, "authorization").as_deref(), Some("Bearer T-123"));
    }
    for kind in ChannelKind::ALL {
        assert_eq!(support::received_under(&server, support::prefix(kind)).await.len(), 1);
    }
}

#[tokio::test]
async fn test_cleared_token_is_not_sent() {
    let (server, channels) = support::start().await;
    mount_ok(&server).await;

    channels.set_token("T-123").unwrap();
    channels.clear_token();
    for kind in ChannelKind::ALL {
        let _: Value = channels.service(kind).get("/ping").await.unwrap();
    }

    for request in server.received_requests().await.unwrap() {
        assert!(support::header(&request, "authorization").is_none());
    }
}

#[tokio::test]
async fn test_request_right_after_set_token_carries_it() {
    let (server, channels) = support::start().await;
    mount_ok(&server).await;

    for (round, kind) in ChannelKind::ALL.into_iter().cycle().take(12).enumerate() {
        let token = format!("token-{round}");
        channels.set_token(token.clone()).unwrap();
        let _: Value = channels.service(kind).get("/ping").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let last = requests.last().unwrap();
        assert_eq!(support::header(last, "authorization"), Some(format!("Bearer {token}")));
    }
}

#[tokio::test]
async fn test_token_overrides_caller_authorization_header() {
    let (server, channels) = support::start().await;
    mount_ok(&server).await;

    channels.set_token("session").unwrap();
    let _: Value = channels
        .main()
        .get_with("/ping", RequestOptions::new().header("Authorization", "Bearer caller"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(support::header(&requests[0], "authorization").as_deref(), Some("Bearer session"));
}

#[tokio::test]
async fn test_unauthorized_clears_token_for_all_channels() {
    let (server, channels) = support::start().await;
    Mock::given(method("GET"))
        .and(path("/gis/secure"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})))
        .mount(&server)
        .await;
    mount_ok(&server).await;

    channels.set_token("stale").unwrap();
    let err = channels.gis().get::<Value>("/secure").await.unwrap_err();

    assert_eq!(err.status, 401);
    assert_eq!(err.message, "Token expired");
    assert_eq!(err.category(), ApiErrorCategory::Unauthorized);
    assert!(channels.token().is_none());
    for kind in ChannelKind::ALL {
        assert!(channels.channel(kind).authorization().is_none());
    }

    let _: Value = channels.main().get("/user/profile").await.unwrap();
    let main_requests = support::received_under(&server, "/main").await;
    assert!(support::header(&main_requests[0], "authorization").is_none());
}

#[tokio::test]
async fn test_not_found_attaches_body() {
    let (server, channels) = support::start().await;
    Mock::given(method("GET"))
        .and(path("/gis/layers/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "no such layer"})))
        .mount(&server)
        .await;

    let err = channels.gis().get::<Value>("/layers/missing").await.unwrap_err();

    assert_eq!(err.status, 404);
    assert_eq!(err.message, "Request failed with status code 404");
    assert_eq!(err.data, Some(json!({"error": "no such layer"})));
    assert_eq!(err.category(), ApiErrorCategory::NotFound);
}

#[tokio::test]
async fn test_rejections_keep_status_and_best_effort_message() {
    let (server, channels) = support::start().await;
    Mock::given(path("/main/validate"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"message": "Invalid bounds"})))
        .mount(&server)
        .await;
    Mock::given(path("/main/crash"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(path("/main/forbidden"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    channels.set_token("keep-me").unwrap();

    let err = channels.main().post::<_, Value>("/validate", &json!({"north": 91})).await.unwrap_err();
    assert_eq!((err.status, err.message.as_str()), (422, "Invalid bounds"));
    assert_eq!(err.category(), ApiErrorCategory::Client);

    let err = channels.main().get::<Value>("/crash").await.unwrap_err();
    assert_eq!(err.status, 500);
    assert_eq!(err.data, Some(json!("boom")));
    assert_eq!(err.category(), ApiErrorCategory::Server);

    let err = channels.main().delete::<Value>("/forbidden").await.unwrap_err();
    assert_eq!(err.status, 403);
    assert!(err.data.is_none());
    assert!(!err.message.is_empty());

    // Only 401 touches the session
    assert_eq!(channels.token().as_deref(), Some("keep-me"));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let (_server, channels) = support::start().await;
    channels.set_base_url(ChannelKind::Auth, support::closed_address());

    let err = channels.auth().post::<_, Value>("/auth/login", &json!({})).await.unwrap_err();

    assert_eq!(err.status, 0);
    assert_eq!(err.message, NETWORK_ERROR_MESSAGE);
    assert_eq!(err.category(), ApiErrorCategory::Unreachable);
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let (server, channels) = support::start().await;
    Mock::given(path("/gis/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let err = channels
        .gis()
        .get_with::<Value>("/slow", RequestOptions::new().timeout(Duration::from_millis(100)))
        .await
        .unwrap_err();
    assert_eq!(err.category(), ApiErrorCategory::Unreachable);

    channels.channel(ChannelKind::Gis).set_timeout(Duration::from_millis(100));
    let err = channels.gis().get::<Value>("/slow").await.unwrap_err();
    assert_eq!(err.status, 0);
    assert_eq!(err.message, NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_unbuildable_request_is_never_sent() {
    let (server, channels) = support::start().await;
    mount_ok(&server).await;

    let err = channels
        .main()
        .get_with::<Value>("/ping", RequestOptions::new().header("x-trace", "line\nbreak"))
        .await
        .unwrap_err();
    assert_eq!(err.status, 0);
    assert_eq!(err.category(), ApiErrorCategory::Unsendable);
    assert!(err.message.contains("x-trace"));

    channels.set_base_url(ChannelKind::Main, "not a url");
    let err = channels.main().get::<Value>("/ping").await.unwrap_err();
    assert_eq!(err.category(), ApiErrorCategory::Unsendable);
    assert!(!err.message.is_empty());

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cache_buster_merges_with_caller_query() {
    let (server, channels) = support::start().await;
    mount_ok(&server).await;

    let _: Value = channels
        .gis()
        .get_with("/search", RequestOptions::new().query_param("q", "Manila").query_param("_t", "stale"))
        .await
        .unwrap();
    let _: Value = channels.gis().get("/plain").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let first = support::query(&requests[0]);
    assert_eq!(first["q"], "Manila");
    assert!(first["_t"].parse::<i64>().unwrap() > 0);
    assert_eq!(requests[0].url.query_pairs().filter(|(k, _)| k == "_t").count(), 1);

    let second = support::query(&requests[1]);
    assert_eq!(second.len(), 1);
    assert!(second.contains_key("_t"));
}

#[tokio::test]
async fn test_cache_buster_replaces_one_written_into_path() {
    let (server, channels) = support::start().await;
    mount_ok(&server).await;

    let _: Value = channels.gis().get("/search?q=x&_t=stale").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let stamps: Vec<String> = requests[0]
        .url
        .query_pairs()
        .filter(|(k, _)| k == "_t")
        .map(|(_, v)| v.into_owned())
        .collect();
    assert_eq!(stamps.len(), 1);
    assert_ne!(stamps[0], "stale");
    assert_eq!(support::query(&requests[0])["q"], "x");
}

#[tokio::test]
async fn test_patch_sends_json_body_with_token_and_cache_buster() {
    let (server, channels) = support::start().await;
    Mock::given(method("PATCH"))
        .and(path("/main/user/profile"))
        .and(body_json(json!({"name": "Ana"})))
        .and(header("authorization", "Bearer T-patch"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "name": "Ana"})))
        .expect(1)
        .mount(&server)
        .await;

    channels.set_token("T-patch").unwrap();
    let updated: Value =
        channels.main().patch("/user/profile", &json!({"name": "Ana"})).await.unwrap();

    assert_eq!(updated, json!({"id": 7, "name": "Ana"}));
    let requests = server.received_requests().await.unwrap();
    assert!(support::query(&requests[0]).contains_key("_t"));
}

#[tokio::test]
async fn test_success_returns_body_without_envelope() {
    let (server, channels) = support::start().await;
    let body = json!({"id": "layer-42", "name": "Projects", "type": "circle", "data": []});
    Mock::given(method("GET"))
        .and(path("/gis/layers/layer-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let value: Value = channels.gis().get("/layers/layer-42").await.unwrap();
    assert_eq!(value, body);
}

#[tokio::test]
async fn test_set_base_url_switches_one_channel_only() {
    let (server, channels) = support::start().await;
    let staging = MockServer::start().await;
    mount_ok(&server).await;
    mount_ok(&staging).await;

    channels.set_base_url(ChannelKind::Main, staging.uri());
    let _: Value = channels.main().get("/ping").await.unwrap();
    let _: Value = channels.gis().get("/ping").await.unwrap();

    let staged = staging.received_requests().await.unwrap();
    assert_eq!(staged.len(), 1);
    assert_eq!(staged[0].url.path(), "/ping");
    assert_eq!(support::received_under(&server, "/gis/ping").await.len(), 1);
    assert!(support::received_under(&server, "/main").await.is_empty());
}

#[tokio::test]
async fn test_concurrent_calls_complete_independently() {
    let (server, channels) = support::start().await;
    for (index, kind) in ChannelKind::ALL.into_iter().enumerate() {
        Mock::given(path(format!("{}/echo", support::prefix(kind))))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"channel": kind.as_str()}))
                    .set_delay(Duration::from_millis(50 * (4 - index as u64))),
            )
            .mount(&server)
            .await;
    }
    channels.set_token("parallel").unwrap();

    let calls = ChannelKind::ALL.map(|kind| {
        let service = channels.service(kind);
        async move { service.get::<Value>("/echo").await }
    });
    let results = join_all(calls).await;

    for (kind, result) in ChannelKind::ALL.into_iter().zip(results) {
        assert_eq!(result.unwrap()["channel"], kind.as_str());
    }
    for request in server.received_requests().await.unwrap() {
        assert_eq!(support::header(&request, "authorization").as_deref(), Some("Bearer parallel"));
    }
}
