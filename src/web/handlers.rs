use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Map, Value};
use tower_http::cors::CorsLayer;

use crate::core::theme::ThemeSlot;

use super::{ControlCommand, WebState};

pub fn router(state: WebState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/settings", get(get_settings).post(update_settings))
        .route("/restart", post(restart))
        .route("/resetTheme", post(reset_theme))
        .route("/api/status", get(api_status))
        .route("/api/command", post(api_command))
        .route("/displaySleep", post(display_sleep))
        .route("/css/styles.css", get(stylesheet))
        .route("/js/main.js", get(script))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn read_asset(state: &WebState, relative: &str) -> Option<Vec<u8>> {
    let path = state.assets_dir.as_ref()?.join(relative);
    match tokio::fs::read(&path).await {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            log::warn!("Failed to read asset {:?}: {}", path, e);
            None
        }
    }
}

async fn root(State(state): State<WebState>) -> Response {
    match read_asset(&state, "index.html").await {
        Some(body) => ([(header::CONTENT_TYPE, "text/html")], body).into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load HTML file").into_response(),
    }
}

async fn stylesheet(State(state): State<WebState>) -> Response {
    match read_asset(&state, "css/styles.css").await {
        Some(body) => ([(header::CONTENT_TYPE, "text/css")], body).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn script(State(state): State<WebState>) -> Response {
    match read_asset(&state, "js/main.js").await {
        Some(body) => ([(header::CONTENT_TYPE, "application/javascript")], body).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn theme_field(slot: ThemeSlot) -> &'static str {
    match slot {
        ThemeSlot::Background => "bgColor",
        ThemeSlot::Text => "textColor",
        ThemeSlot::Cpu => "cpuColor",
        ThemeSlot::Ram => "ramColor",
        ThemeSlot::Border => "borderColor",
        ThemeSlot::CardBackground => "cardBgColor",
    }
}

async fn get_settings(State(state): State<WebState>) -> Json<Value> {
    let vitals = state.status.vitals();
    let settings = state.settings.lock().clone();
    let theme = settings.active_theme();

    let mut doc = Map::new();
    doc.insert("cpuUsage".into(), json!(state.status.cpu_usage().round() as i64));
    doc.insert(
        "temperature".into(),
        json!(vitals.temperature_c.map(|t| format!("{:.2}", t))),
    );
    doc.insert("uptime".into(), json!(state.status.uptime_secs()));
    doc.insert("hostname".into(), json!(vitals.hostname));
    doc.insert("totalMemory".into(), json!(vitals.total_memory_kb));
    doc.insert("freeMemory".into(), json!(vitals.free_memory_kb));

    for slot in ThemeSlot::ALL {
        doc.insert(
            theme_field(slot).into(),
            json!(theme.get(slot).to_hex_string()),
        );
    }

    doc.insert("darkMode".into(), json!(settings.dark_mode));
    doc.insert("glances_host".into(), json!(settings.glances_host));
    doc.insert("glances_port".into(), json!(settings.glances_port));
    doc.insert("debug_mode".into(), json!(settings.debug_mode));

    Json(Value::Object(doc))
}

fn parse_object(body: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) | Err(_) => None,
    }
}

async fn update_settings(State(state): State<WebState>, body: String) -> Response {
    let Some(doc) = parse_object(&body) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "error", "message": "Invalid JSON"})),
        )
            .into_response();
    };

    let mut theme_changed = false;
    {
        let mut settings = state.settings.lock();

        if let Some(dark) = doc.get("darkMode").and_then(Value::as_bool) {
            settings.set_dark_mode(dark);
            theme_changed = true;
        }

        for slot in ThemeSlot::ALL {
            let Some(value) = doc.get(slot.key()) else {
                continue;
            };
            match value.as_u64().and_then(|v| u32::try_from(v).ok()) {
                Some(color) => {
                    log::debug!("Updating {} to: {:06X}", slot.key(), color);
                    if let Err(e) = settings.update_theme_color(slot.key(), color) {
                        log::warn!("{:#}", e);
                    } else {
                        theme_changed = true;
                    }
                }
                None => log::warn!("Ignoring non-numeric {}: {}", slot.key(), value),
            }
        }

        if let Some(host) = doc.get("glances_host").and_then(Value::as_str) {
            settings.set_glances_host(host);
        }

        if let Some(port) = doc.get("glances_port") {
            match port.as_u64().and_then(|p| u16::try_from(p).ok()) {
                Some(port) => settings.set_glances_port(port),
                None => log::warn!("Ignoring invalid glances_port: {}", port),
            }
        }

        if let Some(debug) = doc.get("debug_mode").and_then(Value::as_bool) {
            log::info!("Debug mode {}", if debug { "enabled" } else { "disabled" });
            settings.set_debug_mode(debug);
        }

        state.persist(&settings);
    }

    if theme_changed {
        state.send(ControlCommand::ThemeChanged);
    }

    Json(json!({"status": "success"})).into_response()
}

async fn restart(State(state): State<WebState>) -> Json<Value> {
    log::info!("Restart requested");
    state.send(ControlCommand::Restart);
    Json(json!({"status": "success"}))
}

fn clear_theme(state: &WebState) {
    {
        let mut settings = state.settings.lock();
        settings.reset_theme();
        state.persist(&settings);
    }
    state.send(ControlCommand::ThemeChanged);
}

async fn reset_theme(State(state): State<WebState>) -> Json<Value> {
    clear_theme(&state);
    Json(json!({"status": "success"}))
}

async fn api_status(State(state): State<WebState>) -> Json<Value> {
    let vitals = state.status.vitals();
    let dark_mode = state.settings.lock().dark_mode;

    Json(json!({
        "temperature": vitals.temperature_c.map(|t| format!("{:.2}", t)),
        "free_memory_kb": vitals.free_memory_kb,
        "uptime": state.status.uptime_secs(),
        "dark_mode": dark_mode,
        "display": state.status.display_awake(),
    }))
}

async fn api_command(State(state): State<WebState>, body: String) -> Response {
    let Some(doc) = parse_object(&body) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid JSON"})),
        )
            .into_response();
    };

    let mut success = false;
    let mut message = "Unknown command";

    if let Some(dark) = doc.get("dark_mode").and_then(Value::as_bool) {
        {
            let mut settings = state.settings.lock();
            settings.set_dark_mode(dark);
            state.persist(&settings);
        }
        state.send(ControlCommand::ThemeChanged);
        success = true;
        message = "Dark mode updated";
    }

    if let Some(display) = doc.get("display").and_then(Value::as_bool) {
        state.send(ControlCommand::DisplaySleep(!display));
        success = true;
        message = "Display state updated";
    }

    if doc.get("restart").and_then(Value::as_bool) == Some(true) {
        state.send(ControlCommand::Restart);
        return Json(json!({"success": true, "message": "Restarting device"})).into_response();
    }

    if doc.get("reset_theme").and_then(Value::as_bool) == Some(true) {
        clear_theme(&state);
        success = true;
        message = "Theme reset to defaults";
    }

    Json(json!({"success": success, "message": message})).into_response()
}

async fn display_sleep(State(state): State<WebState>, body: String) -> Response {
    let Some(doc) = parse_object(&body) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid JSON"})),
        )
            .into_response();
    };

    match doc.get("sleep").and_then(Value::as_bool) {
        Some(sleep) => {
            state.send(ControlCommand::DisplaySleep(sleep));
            Json(json!({"success": true, "message": "Display state updated"})).into_response()
        }
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Missing sleep parameter"})),
        )
            .into_response(),
    }
}
