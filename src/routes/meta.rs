use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use super::ApiDoc;

/// Health check endpoint
///
/// Returns 200 OK if the service is running.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "meta"
)]
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Sitemap {
    pub endpoints: Vec<String>,
}

/// List every documented endpoint path
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Endpoint listing", body = Sitemap),
    ),
    tag = "meta"
)]
pub async fn sitemap() -> Json<Sitemap> {
    let endpoints = ApiDoc::openapi().paths.paths.into_keys().collect();
    Json(Sitemap { endpoints })
}
