#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use covera_api::{router, AppContext};
use covera_domain::{AdminRole, Config, DatabaseConfig, NewAdmin, NewPartner};
use covera_infra::TracingNotifier;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Router over a fresh temp database. Keep `_temp_dir` alive for the test.
pub struct TestApp {
    pub ctx: Arc<AppContext>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temporary directory");
        let config = Config {
            database: DatabaseConfig {
                path: temp_dir.path().join("covera.db").to_string_lossy().to_string(),
                pool_size: 4,
            },
            server: Default::default(),
            notifications: Default::default(),
            logging: Default::default(),
            display: Default::default(),
        };
        let ctx = AppContext::with_notifier(config, Arc::new(TracingNotifier::new("ops@test")))
            .expect("failed to build application context");
        Self { ctx: Arc::new(ctx), _temp_dir: temp_dir }
    }

    pub fn router(&self) -> Router {
        router(Arc::clone(&self.ctx))
    }

    /// Register an admin directly through the service. The first one needs no caller.
    pub async fn seed_admin(&self, caller: Option<&str>, code: &str, role: AdminRole) -> String {
        let admin = self
            .ctx
            .admins
            .register(
                caller,
                NewAdmin {
                    display_code: code.to_string(),
                    name: format!("Admin {code}"),
                    email: format!("{}@covera.test", code.to_lowercase()),
                    role,
                },
            )
            .await
            .expect("failed to seed admin");
        admin.id
    }

    pub async fn seed_partner(&self, code: &str) {
        self.ctx
            .partners
            .register(NewPartner {
                affiliate_code: code.to_string(),
                name: "Partner Quinn".to_string(),
                email: "partner@covera.test".to_string(),
            })
            .await
            .expect("failed to seed partner");
    }

    /// Send a request and decode the JSON response body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        admin_id: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = admin_id {
            builder = builder.header("x-admin-id", id);
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .expect("valid request"),
            None => builder.body(Body::empty()).expect("valid request"),
        };

        let response = self.router().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("readable body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, value)
    }
}

pub fn auto_submission(affiliate_code: Option<&str>) -> Value {
    let mut body = serde_json::json!({
        "name": "Alex Morgan",
        "phone": "+1 555-123-4567",
        "email": "alex@example.com",
        "product_type": "auto",
        "vehicle_model": "Camry",
        "vehicle_year": 2022,
        "driver_age": 34
    });
    if let Some(code) = affiliate_code {
        body["affiliate_code"] = Value::String(code.to_string());
    }
    body
}
