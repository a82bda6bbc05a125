//! Shared harness for driving the full router in-process.

#![allow(dead_code)]

use api_lib::{
    adapters::{JwtSessionAdapter, MemoryAdapter},
    config::Config,
    web::{router, AppState},
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use story_hub_core::ports::{PasswordService, PortResult};
use tower::ServiceExt;

pub const SECRET: &str = "integration-secret-integration-secret";

/// Stores `plain:<password>`; keeps the suite fast.
pub struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash_password(&self, password: &str) -> PortResult<String> {
        Ok(format!("plain:{password}"))
    }

    fn verify_password(&self, password: &str, hashed_password: &str) -> bool {
        hashed_password.strip_prefix("plain:") == Some(password)
    }
}

pub struct Response {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

pub struct TestApp {
    pub router: Router,
    pub db: Arc<MemoryAdapter>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_passwords(Arc::new(PlainPasswords))
    }

    pub fn with_passwords(passwords: Arc<dyn PasswordService>) -> Self {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("memory://".to_string()),
            "SESSION_SECRET" => Some(SECRET.to_string()),
            "SESSION_COOKIE_SECURE" => Some("false".to_string()),
            _ => None,
        })
        .expect("test config");

        let db = Arc::new(MemoryAdapter::new());
        let state = Arc::new(AppState {
            db: db.clone(),
            passwords,
            sessions: Arc::new(JwtSessionAdapter::new(
                SECRET.as_bytes(),
                chrono::Duration::hours(1),
            )),
            config: Arc::new(config),
        });

        Self {
            router: router(state),
            db,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        Response {
            status,
            set_cookie,
            body,
        }
    }

    pub async fn post_json(&self, uri: &str, body: Value, cookie: Option<&str>) -> Response {
        self.post_raw(uri, body.to_string(), cookie).await
    }

    pub async fn post_raw(&self, uri: &str, body: String, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).expect("request"))
            .await
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).expect("request")).await
    }

    pub async fn register(&self, email: &str, password: &str) -> Response {
        self.post_json(
            "/api/auth/register",
            json!({ "email": email, "password": password }),
            None,
        )
        .await
    }

    /// Registers and signs in, returning the `session=<token>` cookie pair.
    pub async fn sign_up_and_in(&self, email: &str, password: &str) -> String {
        let registered = self.register(email, password).await;
        assert_eq!(registered.status, StatusCode::OK, "{:?}", registered.body);

        let login = self
            .post_json(
                "/api/auth/login",
                json!({ "email": email, "password": password }),
                None,
            )
            .await;
        assert_eq!(login.status, StatusCode::OK, "{:?}", login.body);
        cookie_pair(&login.set_cookie.expect("session cookie"))
    }

    pub async fn create_story(&self, cookie: &str, title: &str) -> Response {
        self.post_json(
            "/api/stories",
            json!({
                "title": title,
                "shortDescription": format!("{title} in brief"),
                "content": format!("All about {title}"),
            }),
            Some(cookie),
        )
        .await
    }
}

/// `session=abc; HttpOnly; ...` -> `session=abc`
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}
