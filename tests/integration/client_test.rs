use axum::{http::StatusCode, routing::get, Router};
use glance_panel::core::glances::{Endpoint, GlancesClient, MetricSource, StaticLink};
use glance_panel::FetchError;

/// Serve a fake Glances API on a loopback port for the lifetime of the runtime
fn spawn_glances() -> (tokio::runtime::Runtime, u16) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();

    let app = Router::new()
        .route(
            "/api/4/cpu",
            get(|| async { r#"{"total": 37.6, "cpucore": 8}"# }),
        )
        .route(
            "/api/4/mem",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/api/4/load", get(|| async { "<html>not json</html>" }));

    let listener = runtime
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .unwrap();
    let port = listener.local_addr().unwrap().port();
    runtime.spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (runtime, port)
}

fn client(port: u16) -> GlancesClient {
    GlancesClient::with_link("127.0.0.1", port, Box::new(StaticLink(true))).unwrap()
}

#[test]
fn test_fetch_parses_body() {
    let (_runtime, port) = spawn_glances();
    let mut client = client(port);

    let snapshot = client.fetch(Endpoint::Cpu).unwrap();
    assert_eq!(snapshot.value()["cpucore"].as_u64(), Some(8));
}

#[test]
fn test_non_success_status_is_http_error() {
    let (_runtime, port) = spawn_glances();
    let mut client = client(port);

    assert_eq!(
        client.fetch(Endpoint::Mem).unwrap_err(),
        FetchError::HttpError(500)
    );
    assert_eq!(
        client.fetch(Endpoint::Sensors).unwrap_err(),
        FetchError::HttpError(404)
    );
}

#[test]
fn test_malformed_body_is_parse_error() {
    let (_runtime, port) = spawn_glances();
    let mut client = client(port);

    assert!(matches!(
        client.fetch(Endpoint::Load),
        Err(FetchError::ParseError(_))
    ));
}

#[test]
fn test_refused_connection_is_network_unavailable() {
    // Grab a free port and release it so nothing is listening there
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let mut client = client(port);

    assert_eq!(
        client.fetch(Endpoint::Uptime).unwrap_err(),
        FetchError::NetworkUnavailable
    );
}

#[test]
fn test_reconfigure_moves_target() {
    let (_runtime, port) = spawn_glances();
    let mut client = client(1);

    client.reconfigure("127.0.0.1", port);
    assert_eq!(client.port(), port);
    assert!(client.fetch(Endpoint::Cpu).is_ok());
}

#[test]
fn test_loopback_host_ignores_link_state() {
    let (_runtime, port) = spawn_glances();
    let mut client =
        GlancesClient::with_link("127.0.0.1", port, Box::new(StaticLink(false))).unwrap();

    assert!(client.fetch(Endpoint::Cpu).is_ok());
}

#[test]
fn test_remote_host_needs_link() {
    let mut client =
        GlancesClient::with_link("192.0.2.10", 61208, Box::new(StaticLink(false))).unwrap();

    assert_eq!(
        client.fetch(Endpoint::Cpu).unwrap_err(),
        FetchError::NetworkUnavailable
    );
}
