pub mod assigned_measures;
pub mod extract;
pub mod measures;
pub mod meta;
pub mod organizations;
pub mod persons;
mod seed;
pub mod stations;

use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use sea_orm::{ConnectionTrait, EntityTrait, PrimaryKeyTrait};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;
use crate::entity::{assigned_measures as assigned, measures as measure, organizations as org};
use crate::entity::{persons as person, stations as station};
use crate::error::{AppError, AppResult};

/// Plain acknowledgement body, the JSON string `"ok"`.
pub type Ack = Json<&'static str>;

pub(crate) fn ack() -> Ack {
    Json("ok")
}

/// Presence check for a required body field.
pub(crate) fn required<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::missing_field(field))
}

async fn find_or_404<E, C>(db: &C, id: i32, label: &str) -> AppResult<E::Model>
where
    E: EntityTrait,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = i32>,
    C: ConnectionTrait,
{
    E::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{label} not found")))
}

pub async fn resolve_organization<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<org::Model> {
    find_or_404::<org::Entity, _>(db, id, "Organization").await
}

pub async fn resolve_person<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<person::Model> {
    find_or_404::<person::Entity, _>(db, id, "Person").await
}

pub async fn resolve_station<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<station::Model> {
    find_or_404::<station::Entity, _>(db, id, "Station").await
}

pub async fn resolve_measure<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<measure::Model> {
    find_or_404::<measure::Entity, _>(db, id, "Measure").await
}

pub async fn resolve_assigned_measure<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> AppResult<assigned::Model> {
    find_or_404::<assigned::Entity, _>(db, id, "Assigned measure").await
}

#[derive(OpenApi)]
#[openapi(
    paths(
        meta::healthz,
        meta::sitemap,
        organizations::list_organizations,
        organizations::create_organization,
        organizations::list_organization_people,
        persons::list_persons,
        persons::create_person,
        stations::list_stations,
        stations::create_station,
        stations::get_station,
        stations::update_station,
        stations::delete_station,
        stations::list_station_assignments,
        measures::list_measures,
        measures::create_measure,
        measures::get_measure,
        measures::update_measure,
        measures::delete_measure,
        measures::list_measure_assignments,
        assigned_measures::list_assigned_measures,
        assigned_measures::create_assigned_measure,
        assigned_measures::delete_assigned_measure,
        assigned_measures::get_assignment_data,
        assigned_measures::latest_readings,
    ),
    components(
        schemas(
            meta::Sitemap,
            organizations::NewOrganization,
            organizations::OrganizationResponse,
            persons::NewPerson,
            persons::PersonResponse,
            stations::NewStation,
            stations::StationUpdate,
            stations::StationResponse,
            measures::NewMeasure,
            measures::MeasureUpdate,
            measures::MeasureResponse,
            assigned_measures::NewAssignedMeasure,
            assigned_measures::AssignedMeasureResponse,
            assigned_measures::DataPointResponse,
            assigned_measures::LatestReading,
        )
    ),
    tags(
        (name = "meta", description = "Health check and endpoint listing"),
        (name = "organizations", description = "Organizations and their people"),
        (name = "persons", description = "People responsible for stations"),
        (name = "stations", description = "Sensor stations"),
        (name = "measures", description = "Tracked quantities"),
        (name = "assignedmeasures", description = "Measures tracked at stations and their readings"),
    ),
    info(
        title = "Station Telemetry API",
        description = "Weather and sensor station telemetry API",
        version = "0.1.0"
    )
)]
pub(crate) struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/organizations",
            get(organizations::list_organizations).post(organizations::create_organization),
        )
        .route(
            "/organizations/{organization_id}/people",
            get(organizations::list_organization_people),
        )
        .route(
            "/persons",
            get(persons::list_persons).post(persons::create_person),
        )
        .route(
            "/stations",
            get(stations::list_stations).post(stations::create_station),
        )
        .route(
            "/stations/{station_id}",
            get(stations::get_station)
                .put(stations::update_station)
                .delete(stations::delete_station),
        )
        .route(
            "/stations/{station_id}/measures",
            get(stations::list_station_assignments),
        )
        .route(
            "/stations/{station_id}/assignedmeasures",
            get(stations::list_station_assignments),
        )
        .route(
            "/measures",
            get(measures::list_measures).post(measures::create_measure),
        )
        .route(
            "/measures/{measure_id}",
            get(measures::get_measure)
                .put(measures::update_measure)
                .delete(measures::delete_measure),
        )
        .route(
            "/measures/{measure_id}/stations",
            get(measures::list_measure_assignments),
        )
        .route(
            "/assignedmeasures",
            get(assigned_measures::list_assigned_measures)
                .post(assigned_measures::create_assigned_measure),
        )
        .route("/assignedmeasures/last", get(assigned_measures::latest_readings))
        // Both routes share the `{id}` segment name: the delete takes an
        // assignment id, the range query a station id
        .route(
            "/assignedmeasures/{id}",
            delete(assigned_measures::delete_assigned_measure),
        )
        .route(
            "/assignedmeasures/{id}/{measure_id}/{date_from}/{date_to}",
            get(assigned_measures::get_assignment_data),
        );

    let api_routes = if state.config.enable_seed_routes {
        tracing::warn!("Demo data fill routes ENABLED");
        api_routes
            .route("/stations/fill", post(seed::fill_stations))
            .route("/measures/fill", post(seed::fill_measures))
            .route("/assignedmeasures/fill", post(seed::fill_assigned_measures))
            .route("/data/fill", post(seed::fill_data))
    } else {
        api_routes
    };
    let api_routes = api_routes.layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    let meta_routes = Router::new()
        .route("/", get(meta::sitemap))
        .route("/healthz", get(meta::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .merge(api_routes)
        .merge(meta_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
