use axum::{extract::State, Json};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

use crate::common::AppState;
use crate::entity::{assigned_measures, stations};
use crate::error::AppResult;
use crate::routes::assigned_measures::{delete_assignments, AssignedMeasureResponse};
use crate::routes::extract::{ApiJson, ApiPath};
use crate::routes::{
    ack, required, resolve_organization, resolve_person, resolve_station, Ack,
};

use super::types::{NewStation, StationResponse, StationUpdate};

/// List all stations
#[utoipa::path(
    get,
    path = "/stations",
    responses(
        (status = 200, description = "Stations retrieved successfully", body = Vec<StationResponse>),
    ),
    tag = "stations"
)]
pub async fn list_stations(State(state): State<AppState>) -> AppResult<Json<Vec<StationResponse>>> {
    let stations_list = stations::Entity::find()
        .order_by_asc(stations::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(
        stations_list.into_iter().map(StationResponse::from).collect(),
    ))
}

/// Create a station
#[utoipa::path(
    post,
    path = "/stations",
    request_body = NewStation,
    responses(
        (status = 200, description = "Station created", body = String),
        (status = 400, description = "Missing body or field"),
        (status = 404, description = "Referenced person or organization not found"),
    ),
    tag = "stations"
)]
pub async fn create_station(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewStation>,
) -> AppResult<Ack> {
    let name = required(body.name, "name")?;
    let lattitude = required(body.lattitude, "lattitude")?;
    let longitude = required(body.longitude, "longitude")?;
    let person_id = required(body.person_id, "person_id")?;
    let organization_id = required(body.organization_id, "organization_id")?;
    let streetaddress = required(body.streetaddress, "street address")?;
    let numberaddress = required(body.numberaddress, "number address")?;

    resolve_person(&state.db, person_id).await?;
    resolve_organization(&state.db, organization_id).await?;

    let station = stations::ActiveModel {
        name: Set(name),
        lattitude: Set(lattitude),
        longitude: Set(longitude),
        streetaddress: Set(streetaddress),
        numberaddress: Set(numberaddress),
        person_id: Set(person_id),
        description: Set(body.description),
        organization_id: Set(organization_id),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    tracing::info!(station_id = station.id, "Station created");
    Ok(ack())
}

/// Get a station by ID
#[utoipa::path(
    get,
    path = "/stations/{station_id}",
    params(
        ("station_id" = i32, Path, description = "Station ID"),
    ),
    responses(
        (status = 200, description = "Station retrieved successfully", body = StationResponse),
        (status = 404, description = "Station not found"),
    ),
    tag = "stations"
)]
pub async fn get_station(
    State(state): State<AppState>,
    ApiPath(station_id): ApiPath<i32>,
) -> AppResult<Json<StationResponse>> {
    let station = resolve_station(&state.db, station_id).await?;
    Ok(Json(station.into()))
}

/// Update the fields present in the body, leaving the rest unchanged
#[utoipa::path(
    put,
    path = "/stations/{station_id}",
    params(
        ("station_id" = i32, Path, description = "Station ID"),
    ),
    request_body = StationUpdate,
    responses(
        (status = 200, description = "Station updated", body = StationResponse),
        (status = 400, description = "Missing or malformed body"),
        (status = 404, description = "Station, person or organization not found"),
    ),
    tag = "stations"
)]
pub async fn update_station(
    State(state): State<AppState>,
    ApiPath(station_id): ApiPath<i32>,
    ApiJson(body): ApiJson<StationUpdate>,
) -> AppResult<Json<StationResponse>> {
    let station = resolve_station(&state.db, station_id).await?;

    if let Some(person_id) = body.person_id {
        resolve_person(&state.db, person_id).await?;
    }
    if let Some(organization_id) = body.organization_id {
        resolve_organization(&state.db, organization_id).await?;
    }

    let mut active: stations::ActiveModel = station.clone().into();
    body.apply(&mut active);

    if !active.is_changed() {
        return Ok(Json(station.into()));
    }

    let updated = active.update(&state.db).await?;
    tracing::info!(station_id, "Station updated");

    Ok(Json(updated.into()))
}

/// Delete a station together with its assigned measures and their data
#[utoipa::path(
    delete,
    path = "/stations/{station_id}",
    params(
        ("station_id" = i32, Path, description = "Station ID"),
    ),
    responses(
        (status = 200, description = "Station deleted", body = String),
        (status = 404, description = "Station not found"),
    ),
    tag = "stations"
)]
pub async fn delete_station(
    State(state): State<AppState>,
    ApiPath(station_id): ApiPath<i32>,
) -> AppResult<Ack> {
    let txn = state.db.begin().await?;

    let station = resolve_station(&txn, station_id).await?;

    let assignment_ids: Vec<i32> = assigned_measures::Entity::find()
        .select_only()
        .column(assigned_measures::Column::Id)
        .filter(assigned_measures::Column::StationId.eq(station.id))
        .into_tuple()
        .all(&txn)
        .await?;

    let readings_removed = delete_assignments(&txn, &assignment_ids).await?;
    stations::Entity::delete_by_id(station.id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        station_id,
        assignments = assignment_ids.len(),
        readings = readings_removed,
        "Station deleted"
    );
    Ok(ack())
}

/// List the measures assigned to a station
#[utoipa::path(
    get,
    path = "/stations/{station_id}/measures",
    params(
        ("station_id" = i32, Path, description = "Station ID"),
    ),
    responses(
        (status = 200, description = "Assigned measures retrieved successfully", body = Vec<AssignedMeasureResponse>),
        (status = 404, description = "Station not found"),
    ),
    tag = "stations"
)]
pub async fn list_station_assignments(
    State(state): State<AppState>,
    ApiPath(station_id): ApiPath<i32>,
) -> AppResult<Json<Vec<AssignedMeasureResponse>>> {
    let station = resolve_station(&state.db, station_id).await?;

    let assignments = assigned_measures::Entity::find()
        .filter(assigned_measures::Column::StationId.eq(station.id))
        .order_by_asc(assigned_measures::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(
        assignments
            .into_iter()
            .map(AssignedMeasureResponse::from)
            .collect(),
    ))
}
