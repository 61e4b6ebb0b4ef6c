//! Mock prediction backend served from an ephemeral port.

#![allow(dead_code)]

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use axum::{
    Json, Router,
    http::{StatusCode, header::CONTENT_TYPE},
    routing::post,
};
use client::{Config, MemoryOutput, SubmitHandler};
use serde_json::json;
use tokio::net::TcpListener;

pub async fn spawn_backend(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{address}")
}

/// Always answers `/predict` with the same status, content type and body.
pub fn fixed(status: StatusCode, content_type: &'static str, body: &'static str) -> Router {
    Router::new().route(
        "/predict",
        post(move || async move { (status, [(CONTENT_TYPE, content_type)], body) }),
    )
}

pub fn fixed_json(status: StatusCode, body: &'static str) -> Router {
    fixed(status, "application/json", body)
}

/// Echoes the received fields back as the prediction, serialized with sorted keys.
pub fn echo() -> Router {
    Router::new().route(
        "/predict",
        post(|Json(fields): Json<BTreeMap<String, String>>| async move {
            let echoed = serde_json::to_string(&fields).unwrap();
            Json(json!({ "prediction": echoed }))
        }),
    )
}

/// Waits `delay_ms` (a form field) before answering with the `id` field.
pub fn delayed() -> Router {
    Router::new().route(
        "/predict",
        post(|Json(fields): Json<BTreeMap<String, String>>| async move {
            let delay = fields
                .get("delay_ms")
                .and_then(|d| d.parse().ok())
                .unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(delay)).await;

            let id = fields.get("id").cloned().unwrap_or_default();
            Json(json!({ "prediction": id }))
        }),
    )
}

pub fn handler(config: Config) -> (Arc<SubmitHandler>, Arc<MemoryOutput>) {
    let output = Arc::new(MemoryOutput::new());
    let handler = SubmitHandler::new(config, output.clone()).unwrap();
    (handler, output)
}

pub async fn backend_handler(app: Router) -> (Arc<SubmitHandler>, Arc<MemoryOutput>) {
    let url = spawn_backend(app).await;
    handler(Config::new(&url).unwrap())
}
