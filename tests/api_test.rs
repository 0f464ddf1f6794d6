//! End-to-end tests for the CRUD endpoints.
//!
//! Run with: cargo test --test api_test

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{spawn_app, station_body};

#[tokio::test]
async fn created_organization_is_listed_with_all_fields() {
    let app = spawn_app().await;

    let (status, body) = app
        .post(
            "/organizations",
            json!({"name": "Acme", "address": "1 Road", "phone": "555-0100", "email": "ops@acme.test"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("ok"));

    let (status, body) = app.get("/organizations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"id": 1, "name": "Acme", "address": "1 Road", "phone": "555-0100", "email": "ops@acme.test"}])
    );
}

#[tokio::test]
async fn missing_field_is_reported_by_name() {
    let app = spawn_app().await;

    let (status, body) = app
        .post(
            "/organizations",
            json!({"name": "Acme", "address": "1 Road", "email": "ops@acme.test"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"message": "You need to specify the phone", "status_code": 400})
    );

    let (_, body) = app.post("/persons", json!({"username": "ana", "email": "a@b.c"})).await;
    assert_eq!(body["message"], "You need to specify the organization");

    let mut station = station_body("North", "1");
    station.as_object_mut().unwrap().remove("numberaddress");
    let (status, body) = app.post("/stations", station).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "You need to specify the number address");
}

#[tokio::test]
async fn non_json_body_is_rejected_with_envelope() {
    let app = spawn_app().await;

    let (status, body) = app
        .request(axum::http::Method::POST, "/measures", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "You need to specify the request body as a json object"
    );
    assert_eq!(body["status_code"], 400);
}

#[tokio::test]
async fn wrong_field_type_is_a_bad_request() {
    let app = spawn_app().await;

    let (status, body) = app
        .post("/assignedmeasures", json!({"station_id": "one", "measure_id": 1}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status_code"], 400);
}

#[tokio::test]
async fn references_are_checked_before_insert() {
    let app = spawn_app().await;

    let (status, body) = app
        .post(
            "/persons",
            json!({"username": "ana", "email": "ana@acme.test", "organization_id": 42}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"message": "Organization not found", "status_code": 404})
    );

    let (status, body) = app.post("/stations", station_body("North", "1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Person not found");

    let (status, body) = app
        .post("/assignedmeasures", json!({"station_id": 1, "measure_id": 1}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Station not found");
}

#[tokio::test]
async fn organization_people_are_filtered() {
    let app = spawn_app().await;
    app.seed_minimal().await;

    app.post(
        "/organizations",
        json!({"name": "Other", "address": "2 Road", "phone": "555-0200", "email": "x@other.test"}),
    )
    .await;
    app.post(
        "/persons",
        json!({"username": "bo", "email": "bo@other.test", "organization_id": 2}),
    )
    .await;

    let (status, body) = app.get("/organizations/2/people").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"id": 2, "username": "bo", "email": "bo@other.test", "organization": 2}])
    );

    let (_, body) = app.get("/persons").await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, _) = app.get("/organizations/9/people").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn station_is_serialized_with_every_field() {
    let app = spawn_app().await;
    app.seed_minimal().await;

    let expected = json!({
        "id": 1,
        "name": "North",
        "lattitude": "-33.45",
        "longitude": "-70.66",
        "streetaddress": "Alameda",
        "numberaddress": "1",
        "responsible": 1,
        "description": "rooftop mast",
        "organization": 1
    });

    let (status, body) = app.get("/stations/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);

    let (_, body) = app.get("/stations").await;
    assert_eq!(body, json!([expected]));
}

#[tokio::test]
async fn stations_may_share_coordinates() {
    let app = spawn_app().await;
    app.seed_minimal().await;

    let (status, _) = app.post("/stations", station_body("South", "2")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/stations").await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn duplicate_organization_name_is_a_storage_error() {
    let app = spawn_app().await;
    let body = json!({"name": "Acme", "address": "1 Road", "phone": "555-0100", "email": "ops@acme.test"});

    let (status, _) = app.post("/organizations", body.clone()).await;
    assert_eq!(status, StatusCode::OK);

    // The raw driver error stays in the log
    let (status, body) = app.post("/organizations", body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Database error", "status_code": 500}));

    let (_, organizations) = app.get("/organizations").await;
    assert_eq!(organizations.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn station_name_and_number_address_are_unique() {
    let app = spawn_app().await;
    app.seed_minimal().await;

    let (status, body) = app.post("/stations", station_body("South", "1")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Database error", "status_code": 500}));

    let (status, body) = app.post("/stations", station_body("North", "2")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Database error", "status_code": 500}));

    let (status, _) = app.post("/stations", station_body("South", "2")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn partial_update_only_touches_given_fields() {
    let app = spawn_app().await;
    app.seed_minimal().await;

    let (_, before) = app.get("/stations/1").await;

    let (status, updated) = app
        .put("/stations/1", json!({"name": "North Ridge", "description": "moved"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "North Ridge");
    assert_eq!(updated["description"], "moved");

    for field in ["lattitude", "longitude", "streetaddress", "numberaddress", "responsible", "organization"] {
        assert_eq!(updated[field], before[field], "{field} changed");
    }

    let (_, fetched) = app.get("/stations/1").await;
    assert_eq!(fetched, updated);

    // Empty body is a no-op
    let (status, unchanged) = app.put("/stations/1", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged, updated);

    // Explicit null clears the description, absence keeps it
    let (status, cleared) = app.put("/stations/1", json!({"description": null})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["description"], serde_json::Value::Null);
    assert_eq!(cleared["name"], "North Ridge");
}

#[tokio::test]
async fn update_rejects_unknown_station_and_references() {
    let app = spawn_app().await;
    app.seed_minimal().await;

    let (status, body) = app.put("/stations/7", json!({"name": "x"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Station not found");

    let (status, body) = app.put("/stations/1", json!({"person_id": 99})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Person not found");
}

#[tokio::test]
async fn deleted_station_is_gone() {
    let app = spawn_app().await;
    app.seed_minimal().await;
    app.insert_reading(1, "2018-01-01 00:00:00", 3.5).await;

    let (status, body) = app.delete("/stations/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("ok"));

    let (status, body) = app.get("/stations/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"message": "Station not found", "status_code": 404})
    );

    let (_, body) = app.get("/stations").await;
    assert_eq!(body, json!([]));

    // Its assignment went with it
    let (_, body) = app.get("/assignedmeasures").await;
    assert_eq!(body, json!([]));

    let (status, _) = app.delete("/stations/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn measure_crud() {
    let app = spawn_app().await;

    let (status, body) = app
        .post(
            "/measures",
            json!({"name": "Temperature", "unit": "Celsius", "symbol": "°C"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("ok"));

    let (_, body) = app.get("/measures").await;
    assert_eq!(
        body,
        json!([{"id": 1, "name": "Temperature", "unit": "Celsius", "symbol": "°C"}])
    );

    // Names are not unique
    let (status, _) = app
        .post(
            "/measures",
            json!({"name": "Temperature", "unit": "Fahrenheit", "symbol": "°F"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.put("/measures/2", json!({"symbol": "F"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": 2, "name": "Temperature", "unit": "Fahrenheit", "symbol": "F"})
    );

    let (status, _) = app.delete("/measures/2").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/measures/2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Measure not found");
}

#[tokio::test]
async fn assignments_allow_duplicates_and_filter_both_ways() {
    let app = spawn_app().await;
    app.seed_minimal().await;

    let (status, _) = app
        .post("/assignedmeasures", json!({"station_id": 1, "measure_id": 1}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let expected = json!([
        {"id": 1, "measure_id": 1, "station_id": 1},
        {"id": 2, "measure_id": 1, "station_id": 1}
    ]);

    let (_, body) = app.get("/assignedmeasures").await;
    assert_eq!(body, expected);

    let (_, body) = app.get("/stations/1/measures").await;
    assert_eq!(body, expected);

    let (_, body) = app.get("/stations/1/assignedmeasures").await;
    assert_eq!(body, expected);

    let (_, body) = app.get("/measures/1/stations").await;
    assert_eq!(body, expected);

    let (status, _) = app.get("/measures/5/stations").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_a_bad_request() {
    let app = spawn_app().await;

    let (status, body) = app.get("/stations/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status_code"], 400);
}

#[tokio::test]
async fn sitemap_and_health() {
    let app = spawn_app().await;

    let (status, _) = app.get("/healthz").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    let endpoints: Vec<&str> = body["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e.as_str())
        .collect();
    assert!(endpoints.contains(&"/stations/{station_id}"));
    assert!(endpoints.contains(&"/assignedmeasures/last"));
}
