#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;

use brisbane::config::Config;
use brisbane::email::{MailError, Mailer, OutboundEmail};
use brisbane::quote::{FormData, UploadedFile};

pub const FROM: &str = "site@brisbanepools.test";
pub const QUOTES_TO: &str = "quotes@brisbanepools.test";

/// Mailer that keeps every message it is asked to send.
#[derive(Default, Clone)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

/// Mailer whose transport always fails with the given message.
pub struct FailingMailer(pub &'static str);

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: OutboundEmail) -> Result<(), MailError> {
        Err(MailError(self.0.to_string()))
    }
}

pub fn test_config(quote_to: Option<&str>) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        base_url: "https://www.brisbanepools.test".to_string(),
        max_body_size: 64 * 1024 * 1024,
        log_level: "warn".to_string(),
        default_from_email: FROM.to_string(),
        quote_to_email: quote_to.map(str::to_string),
        smtp: None,
    }
}

/// The five required fields, all filled in.
pub fn required_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("fullName", "Jane Doe"),
        ("phone", "555-1234"),
        ("address", "Main St"),
        ("address_number", "42"),
        ("postal_code", "90210"),
    ]
}

pub fn form_with(fields: &[(&str, &str)]) -> FormData {
    let mut form = FormData::default();
    for (k, v) in fields {
        form.push_field(*k, *v);
    }
    form
}

pub fn photo(filename: &str, content_type: &str, size: usize) -> UploadedFile {
    UploadedFile {
        field: "photos".to_string(),
        filename: filename.to_string(),
        content_type: content_type.to_string(),
        size,
        content: Bytes::from(vec![0u8; size]),
    }
}

/// A running test server instance.
pub struct TestApp {
    pub addr: std::net::SocketAddr,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

pub async fn spawn_app(config: Config, mailer: Arc<dyn Mailer>) -> TestApp {
    let app = brisbane::build_app(config, mailer);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
    }
}
