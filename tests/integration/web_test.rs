use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use glance_panel::core::config::{SharedSettings, Settings};
use glance_panel::web::{router, ControlCommand, DeviceStatus, WebState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct Harness {
    app: Router,
    commands: Receiver<ControlCommand>,
    settings: SharedSettings,
    settings_path: PathBuf,
    _dir: TempDir,
}

fn harness(assets: Option<PathBuf>) -> Harness {
    let dir = TempDir::new().unwrap();
    let settings_path = dir.path().join("settings.json");
    let settings = Settings {
        glances_host: "10.0.0.2".into(),
        ..Settings::default()
    }
    .into_shared();
    let (tx, rx) = mpsc::channel();

    let state = WebState {
        settings: settings.clone(),
        settings_path: Some(settings_path.clone()),
        commands: tx,
        status: DeviceStatus::shared(),
        assets_dir: assets,
    };

    Harness {
        app: router(state),
        commands: rx,
        settings,
        settings_path,
        _dir: dir,
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_get_settings_reports_theme_and_host() {
    let h = harness(None);
    let (status, body) = send(&h.app, "GET", "/settings", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bgColor"], "#121212");
    assert_eq!(body["cpuColor"], "#07FFF7");
    assert_eq!(body["darkMode"], true);
    assert_eq!(body["glances_host"], "10.0.0.2");
    assert_eq!(body["glances_port"], 61208);
}

#[tokio::test]
async fn test_post_settings_updates_and_persists() {
    let h = harness(None);
    let (status, body) = send(
        &h.app,
        "POST",
        "/settings",
        r#"{"cpu_color": 16711680, "glances_port": 61209, "debug_mode": true}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "success"}));
    assert_eq!(h.commands.try_recv(), Ok(ControlCommand::ThemeChanged));

    let settings = h.settings.lock().clone();
    assert_eq!(settings.glances_port, 61209);
    assert!(settings.debug_mode);
    assert_eq!(settings.active_theme().cpu_color.0, 0xFF0000);

    let saved = Settings::load_from_path(&h.settings_path).unwrap();
    assert_eq!(saved, settings);
}

#[tokio::test]
async fn test_host_only_update_sends_no_theme_command() {
    let h = harness(None);
    send(&h.app, "POST", "/settings", r#"{"glances_host": "nas.local"}"#).await;

    assert_eq!(h.settings.lock().glances_host, "nas.local");
    assert!(h.commands.try_recv().is_err());
}

#[tokio::test]
async fn test_post_settings_rejects_invalid_json() {
    let h = harness(None);
    let (status, body) = send(&h.app, "POST", "/settings", "{oops").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"status": "error", "message": "Invalid JSON"}));
}

#[tokio::test]
async fn test_display_sleep() {
    let h = harness(None);
    let (status, body) = send(&h.app, "POST", "/displaySleep", r#"{"sleep": true}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Display state updated");
    assert_eq!(h.commands.try_recv(), Ok(ControlCommand::DisplaySleep(true)));

    let (status, body) = send(&h.app, "POST", "/displaySleep", r#"{"awake": true}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing sleep parameter"}));
}

#[tokio::test]
async fn test_api_command_messages() {
    let h = harness(None);

    let (_, body) = send(&h.app, "POST", "/api/command", r#"{"display": false}"#).await;
    assert_eq!(body, json!({"success": true, "message": "Display state updated"}));
    assert_eq!(h.commands.try_recv(), Ok(ControlCommand::DisplaySleep(true)));

    let (_, body) = send(&h.app, "POST", "/api/command", r#"{"restart": true}"#).await;
    assert_eq!(body, json!({"success": true, "message": "Restarting device"}));
    assert_eq!(h.commands.try_recv(), Ok(ControlCommand::Restart));

    let (_, body) = send(&h.app, "POST", "/api/command", r#"{"volume": 3}"#).await;
    assert_eq!(body, json!({"success": false, "message": "Unknown command"}));

    let (status, body) = send(&h.app, "POST", "/api/command", "nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid JSON"}));
}

#[tokio::test]
async fn test_reset_theme_clears_overrides() {
    let h = harness(None);
    h.settings
        .lock()
        .update_theme_color("bg_color", 0x000001)
        .unwrap();

    let (_, body) = send(&h.app, "POST", "/resetTheme", "").await;
    assert_eq!(body, json!({"status": "success"}));
    assert_eq!(h.commands.try_recv(), Ok(ControlCommand::ThemeChanged));
    assert!(h.settings.lock().dark_theme.is_empty());
}

#[tokio::test]
async fn test_api_status_shape() {
    let h = harness(None);
    let (status, body) = send(&h.app, "GET", "/api/status", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dark_mode"], true);
    assert_eq!(body["display"], true);
    assert!(body.get("free_memory_kb").is_some());
    assert!(body.get("uptime").is_some());
}

#[tokio::test]
async fn test_assets() {
    let h = harness(None);
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = h.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("css")).unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>panel</h1>").unwrap();
    std::fs::write(dir.path().join("css/styles.css"), "body{}").unwrap();
    let h = harness(Some(dir.path().to_path_buf()));

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = h.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>panel</h1>");

    let request = Request::builder().uri("/js/main.js").body(Body::empty()).unwrap();
    let response = h.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
