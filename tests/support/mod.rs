//! テスト用の解析バックエンド（127.0.0.1の空きポートで起動）
#![allow(dead_code)]

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 受信したmultipartフィールド
#[derive(Debug, Clone)]
pub struct ReceivedField {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ReceivedField {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).to_string()
    }
}

#[derive(Clone)]
pub struct MockBackend {
    status: u16,
    body: String,
    delay: Duration,
    requests: Arc<AtomicUsize>,
    analyze_fields: Arc<Mutex<Vec<Vec<ReceivedField>>>>,
    contact_bodies: Arc<Mutex<Vec<Value>>>,
}

impl MockBackend {
    /// `/analyze` と `/contact-message` が同じステータスと本文を返す
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
            requests: Arc::new(AtomicUsize::new(0)),
            analyze_fields: Arc::new(Mutex::new(Vec::new())),
            contact_bodies: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn analyze_requests(&self) -> Vec<Vec<ReceivedField>> {
        self.analyze_fields.lock().unwrap().clone()
    }

    pub fn contact_requests(&self) -> Vec<Value> {
        self.contact_bodies.lock().unwrap().clone()
    }

    /// サーバを起動してベースURLを返す
    pub async fn spawn(&self) -> String {
        let router = Router::new()
            .route("/", get(health))
            .route("/analyze", post(analyze))
            .route("/contact-message", post(contact))
            .layer(DefaultBodyLimit::disable())
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn reply(&self) -> (StatusCode, String) {
        (StatusCode::from_u16(self.status).unwrap(), self.body.clone())
    }
}

async fn health() -> Json<Value> {
    Json(json!({
        "message": "AI Image Detector API is running",
        "basic_model_status": "loaded",
        "tensorflow_status": "available",
        "google_doc_integration": "disabled",
        "allowed_origins": ["http://localhost:3000"]
    }))
}

async fn analyze(State(backend): State<MockBackend>, mut multipart: Multipart) -> (StatusCode, String) {
    backend.requests.fetch_add(1, Ordering::SeqCst);

    let mut fields = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        fields.push(ReceivedField {
            name,
            file_name,
            content_type,
            bytes,
        });
    }
    backend.analyze_fields.lock().unwrap().push(fields);

    if !backend.delay.is_zero() {
        tokio::time::sleep(backend.delay).await;
    }
    backend.reply()
}

async fn contact(State(backend): State<MockBackend>, Json(body): Json<Value>) -> (StatusCode, String) {
    backend.requests.fetch_add(1, Ordering::SeqCst);
    backend.contact_bodies.lock().unwrap().push(body);
    backend.reply()
}

/// 接続を受け付けないアドレス
pub async fn refused_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
