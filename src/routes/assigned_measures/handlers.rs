use std::collections::HashMap;

use axum::{extract::State, Json};
use sea_orm::sea_query::{Alias, Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::common::AppState;
use crate::entity::{assigned_measures, data};
use crate::error::{AppError, AppResult};
use crate::routes::extract::{ApiJson, ApiPath};
use crate::routes::{
    ack, required, resolve_assigned_measure, resolve_measure, resolve_station, Ack,
};

use super::types::{
    parse_compact_timestamp, AssignedMeasureResponse, DataPointResponse, LatestReading,
    NewAssignedMeasure,
};

/// Delete the given assignments and every reading attached to them.
///
/// Run inside a transaction; returns the number of readings removed.
pub async fn delete_assignments<C: ConnectionTrait>(db: &C, ids: &[i32]) -> AppResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }

    let readings = data::Entity::delete_many()
        .filter(data::Column::AssignedmeasureId.is_in(ids.iter().copied()))
        .exec(db)
        .await?;

    assigned_measures::Entity::delete_many()
        .filter(assigned_measures::Column::Id.is_in(ids.iter().copied()))
        .exec(db)
        .await?;

    Ok(readings.rows_affected)
}

/// Assign a measure to a station
///
/// Duplicate (station, measure) pairs are accepted.
#[utoipa::path(
    post,
    path = "/assignedmeasures",
    request_body = NewAssignedMeasure,
    responses(
        (status = 200, description = "Measure assigned", body = String),
        (status = 400, description = "Missing body or field"),
        (status = 404, description = "Station or measure not found"),
    ),
    tag = "assignedmeasures"
)]
pub async fn create_assigned_measure(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewAssignedMeasure>,
) -> AppResult<Ack> {
    let station_id = required(body.station_id, "station_id")?;
    let measure_id = required(body.measure_id, "measure_id")?;

    resolve_station(&state.db, station_id).await?;
    resolve_measure(&state.db, measure_id).await?;

    let assignment = assigned_measures::ActiveModel {
        station_id: Set(station_id),
        measure_id: Set(measure_id),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    tracing::info!(
        assigned_measure_id = assignment.id,
        station_id,
        measure_id,
        "Measure assigned"
    );
    Ok(ack())
}

/// List all assigned measures
#[utoipa::path(
    get,
    path = "/assignedmeasures",
    responses(
        (status = 200, description = "Assigned measures retrieved successfully", body = Vec<AssignedMeasureResponse>),
    ),
    tag = "assignedmeasures"
)]
pub async fn list_assigned_measures(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AssignedMeasureResponse>>> {
    let assignments = assigned_measures::Entity::find()
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

/// Delete an assigned measure and all of its data atomically
#[utoipa::path(
    delete,
    path = "/assignedmeasures/{assigned_measure_id}",
    params(
        ("assigned_measure_id" = i32, Path, description = "Assigned measure ID"),
    ),
    responses(
        (status = 200, description = "Assigned measure deleted", body = String),
        (status = 404, description = "Assigned measure not found"),
    ),
    tag = "assignedmeasures"
)]
pub async fn delete_assigned_measure(
    State(state): State<AppState>,
    ApiPath(assigned_measure_id): ApiPath<i32>,
) -> AppResult<Ack> {
    let txn = state.db.begin().await?;

    let assignment = resolve_assigned_measure(&txn, assigned_measure_id).await?;
    let readings = delete_assignments(&txn, &[assignment.id]).await?;

    txn.commit().await?;

    tracing::info!(assigned_measure_id, readings, "Assigned measure deleted");
    Ok(ack())
}

/// Readings of a station/measure pair within an inclusive time range
///
/// Bounds use the compact `YYYYMMDDHHMMSS` format. When the pair was
/// assigned more than once, the earliest assignment is used.
#[utoipa::path(
    get,
    path = "/assignedmeasures/{station_id}/{measure_id}/{date_from}/{date_to}",
    params(
        ("station_id" = i32, Path, description = "Station ID"),
        ("measure_id" = i32, Path, description = "Measure ID"),
        ("date_from" = String, Path, description = "Range start, YYYYMMDDHHMMSS (inclusive)"),
        ("date_to" = String, Path, description = "Range end, YYYYMMDDHHMMSS (inclusive)"),
    ),
    responses(
        (status = 200, description = "Readings retrieved successfully", body = Vec<DataPointResponse>),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "Assigned measure not found"),
    ),
    tag = "assignedmeasures"
)]
pub async fn get_assignment_data(
    State(state): State<AppState>,
    ApiPath((station_id, measure_id, date_from, date_to)): ApiPath<(i32, i32, String, String)>,
) -> AppResult<Json<Vec<DataPointResponse>>> {
    let from = parse_compact_timestamp(&date_from)?;
    let to = parse_compact_timestamp(&date_to)?;

    let assignment = assigned_measures::Entity::find()
        .filter(assigned_measures::Column::StationId.eq(station_id))
        .filter(assigned_measures::Column::MeasureId.eq(measure_id))
        .order_by_asc(assigned_measures::Column::Id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Assigned measure not found".to_string()))?;

    let readings = data::Entity::find()
        .filter(data::Column::AssignedmeasureId.eq(assignment.id))
        .filter(data::Column::DataTimeMeasure.gte(from))
        .filter(data::Column::DataTimeMeasure.lte(to))
        .order_by_asc(data::Column::DataTimeMeasure)
        .order_by_asc(data::Column::Id)
        .all(&state.db)
        .await?;

    tracing::debug!(
        assigned_measure_id = assignment.id,
        %from,
        %to,
        count = readings.len(),
        "Range query"
    );

    Ok(Json(
        readings.into_iter().map(DataPointResponse::from).collect(),
    ))
}

/// Latest reading of every assigned measure
///
/// Ties on timestamp resolve to the reading with the highest id.
#[utoipa::path(
    get,
    path = "/assignedmeasures/last",
    responses(
        (status = 200, description = "Latest readings retrieved successfully", body = Vec<LatestReading>),
    ),
    tag = "assignedmeasures"
)]
pub async fn latest_readings(State(state): State<AppState>) -> AppResult<Json<Vec<LatestReading>>> {
    let assignments = assigned_measures::Entity::find()
        .order_by_asc(assigned_measures::Column::Id)
        .all(&state.db)
        .await?;

    // A reading is the latest of its assignment when no other reading of the
    // same assignment is later, or equally late with a higher id
    let newer = Alias::new("newer");
    let superseded = Query::select()
        .expr(Expr::val(1))
        .from_as(data::Entity, newer.clone())
        .and_where(
            Expr::col((newer.clone(), data::Column::AssignedmeasureId))
                .equals((data::Entity, data::Column::AssignedmeasureId)),
        )
        .and_where(
            Expr::col((newer.clone(), data::Column::DataTimeMeasure))
                .gt(Expr::col((data::Entity, data::Column::DataTimeMeasure)))
                .or(Expr::col((newer.clone(), data::Column::DataTimeMeasure))
                    .equals((data::Entity, data::Column::DataTimeMeasure))
                    .and(
                        Expr::col((newer, data::Column::Id))
                            .gt(Expr::col((data::Entity, data::Column::Id))),
                    )),
        )
        .to_owned();

    let mut readings: HashMap<i32, data::Model> = data::Entity::find()
        .filter(data::Column::AssignedmeasureId.is_not_null())
        .filter(Expr::exists(superseded).not())
        .all(&state.db)
        .await?
        .into_iter()
        .filter_map(|reading| reading.assignedmeasure_id.map(|id| (id, reading)))
        .collect();

    let latest = assignments
        .into_iter()
        .map(|assignment| {
            let reading = readings.remove(&assignment.id);
            LatestReading {
                data_time_measure: reading.as_ref().map(|r| r.data_time_measure),
                data_value: reading.map(|r| r.data_value),
                measure_id: assignment.measure_id,
                station_id: assignment.station_id,
            }
        })
        .collect();

    Ok(Json(latest))
}
