#![allow(dead_code)]

use std::collections::HashMap;

use geoview_domain::{ChannelKind, EndpointConfig};
use geoview_infra::ChannelSet;
use wiremock::MockServer;

/// Path prefix each channel's base URL carries on the shared mock server.
pub fn prefix(kind: ChannelKind) -> &'static str {
    match kind {
        ChannelKind::Main => "/main",
        ChannelKind::Auth => "/authsvc",
        ChannelKind::Gis => "/gis",
        ChannelKind::Upload => "/upload",
    }
}

/// Endpoints pointing every channel at `server`, distinguished by prefix.
pub fn endpoints_for(server: &MockServer) -> EndpointConfig {
    let uri = server.uri();
    EndpointConfig {
        main: format!("{uri}{}", prefix(ChannelKind::Main)),
        auth: format!("{uri}{}", prefix(ChannelKind::Auth)),
        gis: format!("{uri}{}", prefix(ChannelKind::Gis)),
        upload: format!("{uri}{}", prefix(ChannelKind::Upload)),
    }
}

/// Start a mock server and a channel set wired to it.
pub async fn start() -> (MockServer, ChannelSet) {
    let server = MockServer::start().await;
    let channels = ChannelSet::from_endpoints(endpoints_for(&server)).expect("channel set");
    (server, channels)
}

pub fn header(request: &wiremock::Request, name: &str) -> Option<String> {
    request.headers.get(name).map(|value| value.to_str().expect("ascii header").to_string())
}

pub fn query(request: &wiremock::Request) -> HashMap<String, String> {
    request.url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect()
}

/// Requests received so far whose path starts with `prefix`.
pub async fn received_under(server: &MockServer, prefix: &str) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .into_iter()
        .filter(|request| request.url.path().starts_with(prefix))
        .collect()
}

/// An address nothing listens on.
pub fn closed_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}
