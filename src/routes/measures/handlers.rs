use axum::{extract::State, Json};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

use crate::common::AppState;
use crate::entity::{assigned_measures, measures};
use crate::error::AppResult;
use crate::routes::assigned_measures::{delete_assignments, AssignedMeasureResponse};
use crate::routes::extract::{ApiJson, ApiPath};
use crate::routes::{ack, required, resolve_measure, Ack};

use super::types::{MeasureResponse, MeasureUpdate, NewMeasure};

/// List all measures
#[utoipa::path(
    get,
    path = "/measures",
    responses(
        (status = 200, description = "Measures retrieved successfully", body = Vec<MeasureResponse>),
    ),
    tag = "measures"
)]
pub async fn list_measures(State(state): State<AppState>) -> AppResult<Json<Vec<MeasureResponse>>> {
    let measures_list = measures::Entity::find()
        .order_by_asc(measures::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(
        measures_list.into_iter().map(MeasureResponse::from).collect(),
    ))
}

/// Create a measure
#[utoipa::path(
    post,
    path = "/measures",
    request_body = NewMeasure,
    responses(
        (status = 200, description = "Measure created", body = String),
        (status = 400, description = "Missing body or field"),
    ),
    tag = "measures"
)]
pub async fn create_measure(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewMeasure>,
) -> AppResult<Ack> {
    let measure = measures::ActiveModel {
        name: Set(required(body.name, "name")?),
        unit: Set(required(body.unit, "unit")?),
        symbol: Set(required(body.symbol, "symbol")?),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    tracing::info!(measure_id = measure.id, "Measure created");
    Ok(ack())
}

/// Get a measure by ID
#[utoipa::path(
    get,
    path = "/measures/{measure_id}",
    params(
        ("measure_id" = i32, Path, description = "Measure ID"),
    ),
    responses(
        (status = 200, description = "Measure retrieved successfully", body = MeasureResponse),
        (status = 404, description = "Measure not found"),
    ),
    tag = "measures"
)]
pub async fn get_measure(
    State(state): State<AppState>,
    ApiPath(measure_id): ApiPath<i32>,
) -> AppResult<Json<MeasureResponse>> {
    let measure = resolve_measure(&state.db, measure_id).await?;
    Ok(Json(measure.into()))
}

/// Update the fields present in the body
#[utoipa::path(
    put,
    path = "/measures/{measure_id}",
    params(
        ("measure_id" = i32, Path, description = "Measure ID"),
    ),
    request_body = MeasureUpdate,
    responses(
        (status = 200, description = "Measure updated", body = MeasureResponse),
        (status = 404, description = "Measure not found"),
    ),
    tag = "measures"
)]
pub async fn update_measure(
    State(state): State<AppState>,
    ApiPath(measure_id): ApiPath<i32>,
    ApiJson(body): ApiJson<MeasureUpdate>,
) -> AppResult<Json<MeasureResponse>> {
    let measure = resolve_measure(&state.db, measure_id).await?;

    let mut active: measures::ActiveModel = measure.clone().into();
    body.apply(&mut active);

    if !active.is_changed() {
        return Ok(Json(measure.into()));
    }

    let updated = active.update(&state.db).await?;
    tracing::info!(measure_id, "Measure updated");

    Ok(Json(updated.into()))
}

/// Delete a measure, its assignments and their data
#[utoipa::path(
    delete,
    path = "/measures/{measure_id}",
    params(
        ("measure_id" = i32, Path, description = "Measure ID"),
    ),
    responses(
        (status = 200, description = "Measure deleted", body = String),
        (status = 404, description = "Measure not found"),
    ),
    tag = "measures"
)]
pub async fn delete_measure(
    State(state): State<AppState>,
    ApiPath(measure_id): ApiPath<i32>,
) -> AppResult<Ack> {
    let txn = state.db.begin().await?;

    let measure = resolve_measure(&txn, measure_id).await?;

    let assignment_ids: Vec<i32> = assigned_measures::Entity::find()
        .select_only()
        .column(assigned_measures::Column::Id)
        .filter(assigned_measures::Column::MeasureId.eq(measure.id))
        .into_tuple()
        .all(&txn)
        .await?;

    delete_assignments(&txn, &assignment_ids).await?;
    measures::Entity::delete_by_id(measure.id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(measure_id, "Measure deleted");
    Ok(ack())
}

/// List the stations where a measure is tracked
#[utoipa::path(
    get,
    path = "/measures/{measure_id}/stations",
    params(
        ("measure_id" = i32, Path, description = "Measure ID"),
    ),
    responses(
        (status = 200, description = "Assigned measures retrieved successfully", body = Vec<AssignedMeasureResponse>),
        (status = 404, description = "Measure not found"),
    ),
    tag = "measures"
)]
pub async fn list_measure_assignments(
    State(state): State<AppState>,
    ApiPath(measure_id): ApiPath<i32>,
) -> AppResult<Json<Vec<AssignedMeasureResponse>>> {
    let measure = resolve_measure(&state.db, measure_id).await?;

    let assignments = assigned_measures::Entity::find()
        .filter(assigned_measures::Column::MeasureId.eq(measure.id))
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
