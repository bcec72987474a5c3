//! Axum web server with WebSocket streaming for the cirrus entity recognizer

mod config;

use std::sync::{mpsc, Arc};
use std::time::Duration;

use askama::Template;
use axum::{
    extract::{
        rejection::JsonRejection,
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use cirrus_core::{Entity, EntityKind, Pipeline, PipelineEvent};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Shared application state
struct AppState {
    pipeline: Pipeline,
    ws_event_delay: Duration,
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    data: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct AnalyzeResponse {
    data: Vec<Entity>,
    total_tokens: usize,
    processing_ms: u64,
}

struct KindLegend {
    name: &'static str,
    color: &'static str,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    title: &'static str,
    kinds: Vec<KindLegend>,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    status: StatusCode,
    message: &'static str,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env();
    let pipeline = config.load_pipeline()?;
    info!(words = pipeline.dictionary().len(), "cardinal dictionary loaded");

    let state = Arc::new(AppState {
        pipeline,
        ws_event_delay: Duration::from_millis(config.ws_event_delay_ms),
    });

    let listener = tokio::net::TcpListener::bind(config.addr.as_str()).await?;
    info!("cirrus server listening on http://{}", config.addr);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/analyze", post(analyze_handler))
        .route("/ws", get(ws_handler))
        .fallback(not_found_handler)
        .layer(cors)
        .with_state(state)
}

fn render(template: impl Template) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("template rendering failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
        }
    }
}

/// Main HTML page
async fn index_handler() -> Response {
    let kinds = [
        EntityKind::Link,
        EntityKind::Quantity,
        EntityKind::Date,
        EntityKind::Cardinal,
        EntityKind::Money,
    ]
    .into_iter()
    .map(|kind| KindLegend {
        name: kind.name(),
        color: kind.color(),
    })
    .collect();

    render(IndexTemplate {
        title: "cirrus entity recognizer",
        kinds,
    })
}

async fn not_found_handler() -> Response {
    let page = render(ErrorTemplate {
        status: StatusCode::NOT_FOUND,
        message: "Nothing lives at this address.",
    });
    (StatusCode::NOT_FOUND, page).into_response()
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

/// Recognition over HTTP POST (no streaming)
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(req) => req,
        Err(rejection) => {
            warn!("rejected analyze request: {rejection}");
            return bad_request("invalid request");
        }
    };

    if req.data.trim().is_empty() {
        return bad_request("empty text");
    }

    let (tx, rx) = mpsc::channel();
    state.pipeline.recognize_streaming(&req.data, tx);
    let done = rx.try_iter().find_map(|event| match event {
        PipelineEvent::Done {
            entities,
            total_tokens,
            processing_ms,
        } => Some(AnalyzeResponse {
            data: entities,
            total_tokens,
            processing_ms,
        }),
        _ => None,
    });

    match done {
        Some(response) => Json(response).into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "pipeline did not finish").into_response(),
    }
}

/// HTTP → WebSocket upgrade
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Receives text, runs the pipeline and streams its events back
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket connected");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                // JSON {"data": ...} or plain text
                let text = match serde_json::from_str::<AnalyzeRequest>(&text) {
                    Ok(req) => req.data,
                    Err(_) => text.to_string(),
                };
                let text = text.trim().to_string();
                if text.is_empty() {
                    continue;
                }

                info!("analyzing via WebSocket: {} chars", text.len());

                // the pipeline is synchronous, keep it off the runtime threads
                let pipeline_state = Arc::clone(&state);
                let events = tokio::task::spawn_blocking(move || {
                    let (tx, rx) = mpsc::channel();
                    pipeline_state.pipeline.recognize_streaming(&text, tx);
                    rx.try_iter().collect::<Vec<PipelineEvent>>()
                })
                .await
                .unwrap_or_default();

                for event in &events {
                    let Ok(json) = serde_json::to_string(event) else {
                        continue;
                    };
                    if socket.send(Message::Text(json.into())).await.is_err() {
                        return; // client went away
                    }
                    if !state.ws_event_delay.is_zero() {
                        tokio::time::sleep(state.ws_event_delay).await;
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket disconnected");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use cirrus_core::Unit;
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(Arc::new(AppState {
            pipeline: Pipeline::embedded().unwrap(),
            ws_event_delay: Duration::ZERO,
        }))
    }

    fn analyze_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_returns_entities() {
        let response = test_app()
            .oneshot(analyze_request(r#"{"data": "length of 20m for $20"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: AnalyzeResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body.total_tokens, 5);
        assert_eq!(body.data.len(), 6);
        assert_eq!(body.data[2].kind, EntityKind::Quantity);
        assert_eq!(body.data[2].unit(), Some(Unit::Meters));
        assert_eq!(body.data[4].kind, EntityKind::Money);
    }

    #[tokio::test]
    async fn test_analyze_serializes_wire_names() {
        let response = test_app()
            .oneshot(analyze_request(r#"{"data": "$5"}"#))
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["data"][0]["kind"], "monetary");
        assert_eq!(body["data"][1]["kind"], "quantity");
    }

    #[tokio::test]
    async fn test_analyze_rejects_bad_input() {
        let response = test_app().oneshot(analyze_request("not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(response).await.contains("invalid request"));

        let response = test_app().oneshot(analyze_request(r#"{"data": "   "}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_index_page() {
        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("cirrus entity recognizer"));
        assert!(html.contains("monetary"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = test_app()
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_string(response).await.contains("Nothing lives at this address."));
    }
}
