//! In-process stand-in for a LibreTranslate server

#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::{Form, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use axum_libretranslate::{LibreTranslate, LibreTranslateConfig};

/// One request as seen by the fake server
#[derive(Debug, Clone)]
pub struct Recorded {
    pub endpoint: &'static str,
    pub fields: HashMap<String, String>,
    /// Raw body, only kept for multipart uploads
    pub raw: String,
}

#[derive(Clone, Default)]
struct FakeState {
    api_key: Option<String>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeState {
    fn record(&self, endpoint: &'static str, fields: &HashMap<String, String>, raw: String) {
        self.requests.lock().unwrap().push(Recorded {
            endpoint,
            fields: fields.clone(),
            raw,
        });
    }

    fn check_key(&self, provided: Option<&str>) -> Result<(), Response> {
        match &self.api_key {
            Some(expected) if provided != Some(expected.as_str()) => Err(error(
                StatusCode::FORBIDDEN,
                "Invalid API key",
            )),
            _ => Ok(()),
        }
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn detect(
    State(state): State<FakeState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    state.record("detect", &fields, String::new());
    if let Err(resp) = state.check_key(fields.get("api_key").map(String::as_str)) {
        return resp;
    }

    let q = fields.get("q").map(String::as_str).unwrap_or_default();
    let body = match q {
        "" => return error(StatusCode::BAD_REQUEST, "Invalid request: missing q parameter"),
        "hello" => json!([
            {"confidence": 0.92, "language": "en"},
            {"confidence": 0.08, "language": "es"}
        ]),
        "gracias" => json!([
            {"confidence": 0.97, "language": "es"},
            {"confidence": 0.03, "language": "pt"}
        ]),
        _ => json!([{"confidence": 0.5, "language": "en"}]),
    };

    Json(body).into_response()
}

async fn slow_detect() -> Response {
    tokio::time::sleep(Duration::from_secs(2)).await;
    Json(json!([])).into_response()
}

async fn languages(
    State(state): State<FakeState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.record("languages", &params, String::new());
    if let Err(resp) = state.check_key(params.get("api_key").map(String::as_str)) {
        return resp;
    }

    Json(json!([
        {"code": "en", "name": "English", "targets": ["es"]},
        {"code": "es", "name": "Spanish", "targets": ["en"]}
    ]))
    .into_response()
}

fn dictionary(source: &str, target: &str, q: &str) -> Option<(&'static str, Vec<&'static str>)> {
    match (source, target, q) {
        ("en" | "auto", "es", "hello") => Some(("hola", vec!["buenas", "qué tal", "saludos"])),
        ("en" | "auto", "es", "computer") => Some(("ordenador", vec!["computadora"])),
        ("es", "en", "hola") => Some(("hello", vec!["hi"])),
        _ => None,
    }
}

async fn translate(
    State(state): State<FakeState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    state.record("translate", &fields, String::new());
    if let Err(resp) = state.check_key(fields.get("api_key").map(String::as_str)) {
        return resp;
    }

    let field = |name: &str| fields.get(name).cloned().unwrap_or_default();
    let (q, source, target) = (field("q"), field("source"), field("target"));

    match q.as_str() {
        "crash" => return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        "garbage" => return (StatusCode::OK, "<html>not json</html>").into_response(),
        _ => {}
    }

    if !["auto", "en", "es"].contains(&source.as_str()) {
        return error(StatusCode::BAD_REQUEST, &format!("{} is not supported", source));
    }

    let alternates: usize = field("alternates").parse().unwrap_or(0);
    let (text, alternatives) = dictionary(&source, &target, &q).unwrap_or(("", Vec::new()));
    let text = if text.is_empty() { q.clone() } else { text.to_string() };
    let alternatives: Vec<&str> = alternatives.into_iter().take(alternates).collect();

    let mut body = json!({
        "translatedText": text,
        "alternatives": alternatives,
    });
    if source == "auto" {
        body["detectedLanguage"] = json!({"confidence": 0.92, "language": "en"});
    }

    Json(body).into_response()
}

async fn translate_file(State(state): State<FakeState>, body: Bytes) -> Response {
    let raw = String::from_utf8_lossy(&body).to_string();
    state.record("translate_file", &HashMap::new(), raw.clone());

    if state.api_key.is_some() && !raw.contains("name=\"api_key\"") {
        return error(StatusCode::FORBIDDEN, "Invalid API key");
    }
    if !raw.contains("name=\"file\"") {
        return error(StatusCode::BAD_REQUEST, "Invalid request: missing file parameter");
    }

    Json(json!({"translatedFileUrl": "http://fake/download_file/translated.txt"})).into_response()
}

/// Running fake LibreTranslate server
pub struct FakeServer {
    /// Base URL without trailing slash
    pub url: String,
    state: FakeState,
}

impl FakeServer {
    /// Start a fake server; `api_key` makes it reject requests without that key
    pub async fn start(api_key: Option<&str>) -> Self {
        let state = FakeState {
            api_key: api_key.map(str::to_string),
            requests: Arc::default(),
        };

        let app = Router::new()
            .route("/detect", post(detect))
            .route("/languages", get(languages))
            .route("/translate", post(translate))
            .route("/translate_file", post(translate_file))
            .route("/slow/detect", post(slow_detect))
            .with_state(state.clone());

        let url = serve(app).await;
        Self { url, state }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Client pointed at this server
    pub fn client(&self, api_key: Option<&str>) -> LibreTranslate {
        let config =
            LibreTranslateConfig::new(self.url.clone(), api_key.map(str::to_string), None)
                .unwrap();
        LibreTranslate::new(config).unwrap()
    }
}

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}
