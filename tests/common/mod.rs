//! Shared harness: the real router over a migrated in-memory SQLite store.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDateTime;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use serde_json::{json, Value};
use tower::ServiceExt;

use station_telemetry::common::AppState;
use station_telemetry::config::{Config, Deployment};
use station_telemetry::entity::data;
use station_telemetry::routes;

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(true).await
}

pub async fn spawn_app_with(enable_seed_routes: bool) -> TestApp {
    // One long-lived connection: every pooled connection would otherwise get its own database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        run_migrations: true,
        api_host: "127.0.0.1".to_string(),
        api_port: 0,
        enable_seed_routes,
        deployment: Deployment::Local,
    };

    TestApp {
        router: routes::build_router(AppState::new(db.clone(), config)),
        db,
    }
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };

        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// Organization 1, person 1, station 1, measure 1 and assignment 1.
    pub async fn seed_minimal(&self) {
        let steps = [
            (
                "/organizations",
                json!({"name": "Acme", "address": "1 Road", "phone": "555-0100", "email": "ops@acme.test"}),
            ),
            (
                "/persons",
                json!({"username": "ana", "email": "ana@acme.test", "organization_id": 1}),
            ),
            ("/stations", station_body("North", "1")),
            (
                "/measures",
                json!({"name": "Temperature", "unit": "Celsius", "symbol": "°C"}),
            ),
            ("/assignedmeasures", json!({"station_id": 1, "measure_id": 1})),
        ];

        for (uri, body) in steps {
            let (status, value) = self.post(uri, body).await;
            assert_eq!(status, StatusCode::OK, "POST {uri} failed: {value}");
        }
    }

    /// Insert a reading directly, bypassing the API.
    pub async fn insert_reading(&self, assignment_id: i32, time: &str, value: f64) -> i32 {
        data::ActiveModel {
            data_value: Set(value),
            data_time_measure: Set(ts(time)),
            assignedmeasure_id: Set(Some(assignment_id)),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to insert reading")
        .id
    }
}

pub fn station_body(name: &str, number: &str) -> Value {
    json!({
        "name": name,
        "lattitude": "-33.45",
        "longitude": "-70.66",
        "person_id": 1,
        "organization_id": 1,
        "streetaddress": "Alameda",
        "numberaddress": number,
        "description": "rooftop mast"
    })
}

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("Bad test timestamp")
}
