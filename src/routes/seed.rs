//! Demo data fill routes. Mounted only when `ENABLE_SEED_ROUTES` is on.

use axum::extract::State;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

use crate::common::AppState;
use crate::entity::{assigned_measures, data, measures, organizations, persons, stations};
use crate::error::{AppError, AppResult};
use crate::routes::{ack, Ack};
use crate::seed::{self, DEMO_WAVEFORMS, DEMO_YEAR};

/// Entities created per fill call (and the side of the assignment grid).
const FILL_COUNT: u64 = 3;

/// Rows per multi-row insert
const INSERT_CHUNK: usize = 1000;

/// Highest id in the table, or 0 when empty.
///
/// Generated names are numbered past it. A generated number never exceeds
/// its row's id, so it cannot clash with a live row after deletions.
async fn last_id<E, C>(db: &C, column: E::Column) -> AppResult<i32>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let last: Option<Option<i32>> = E::find()
        .select_only()
        .column_as(column.max(), "last_id")
        .into_tuple()
        .one(db)
        .await?;

    Ok(last.flatten().unwrap_or(0))
}

/// POST /stations/fill
pub async fn fill_stations(State(state): State<AppState>) -> AppResult<Ack> {
    let txn = state.db.begin().await?;

    let organization = organizations::Entity::find()
        .order_by_asc(organizations::Column::Id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Organization not found".to_string()))?;
    let person = persons::Entity::find()
        .order_by_asc(persons::Column::Id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Person not found".to_string()))?;

    let last = last_id::<stations::Entity, _>(&txn, stations::Column::Id).await?;
    for k in last + 1..=last + FILL_COUNT as i32 {
        stations::ActiveModel {
            name: Set(format!("Station {k}")),
            lattitude: Set(k.to_string()),
            longitude: Set((k + 1).to_string()),
            streetaddress: Set(k.to_string()),
            numberaddress: Set(k.to_string()),
            person_id: Set(person.id),
            description: Set(Some(String::new())),
            organization_id: Set(organization.id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    tracing::info!(count = FILL_COUNT, "Demo stations created");
    Ok(ack())
}

/// POST /measures/fill
pub async fn fill_measures(State(state): State<AppState>) -> AppResult<Ack> {
    let txn = state.db.begin().await?;

    let last = last_id::<measures::Entity, _>(&txn, measures::Column::Id).await?;
    for k in last + 1..=last + FILL_COUNT as i32 {
        measures::ActiveModel {
            name: Set(format!("Measure {k}")),
            unit: Set(format!("unit {k}")),
            symbol: Set(format!("u{k}")),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    tracing::info!(count = FILL_COUNT, "Demo measures created");
    Ok(ack())
}

/// POST /assignedmeasures/fill
///
/// Assigns each of the first measures to each of the first stations.
pub async fn fill_assigned_measures(State(state): State<AppState>) -> AppResult<Ack> {
    let txn = state.db.begin().await?;

    let measure_ids: Vec<i32> = measures::Entity::find()
        .select_only()
        .column(measures::Column::Id)
        .order_by_asc(measures::Column::Id)
        .limit(FILL_COUNT)
        .into_tuple()
        .all(&txn)
        .await?;
    let station_ids: Vec<i32> = stations::Entity::find()
        .select_only()
        .column(stations::Column::Id)
        .order_by_asc(stations::Column::Id)
        .limit(FILL_COUNT)
        .into_tuple()
        .all(&txn)
        .await?;

    for &measure_id in &measure_ids {
        for &station_id in &station_ids {
            assigned_measures::ActiveModel {
                measure_id: Set(measure_id),
                station_id: Set(station_id),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
    }

    txn.commit().await?;
    tracing::info!(
        assignments = measure_ids.len() * station_ids.len(),
        "Demo assignments created"
    );
    Ok(ack())
}

/// POST /data/fill
///
/// Hourly readings for the demo year on the first nine assignments, one
/// waveform each. The assignment id seeds the noise.
pub async fn fill_data(State(state): State<AppState>) -> AppResult<Ack> {
    let txn = state.db.begin().await?;

    let assignments = assigned_measures::Entity::find()
        .order_by_asc(assigned_measures::Column::Id)
        .limit(DEMO_WAVEFORMS.len() as u64)
        .all(&txn)
        .await?;

    let mut inserted = 0usize;
    for (assignment, waveform) in assignments.iter().zip(DEMO_WAVEFORMS) {
        let series = seed::generate_series(
            waveform,
            seed::hourly_timestamps(DEMO_YEAR),
            u64::from(assignment.id.unsigned_abs()),
        );

        for chunk in series.chunks(INSERT_CHUNK) {
            data::Entity::insert_many(chunk.iter().map(|&(time, value)| data::ActiveModel {
                data_value: Set(value),
                data_time_measure: Set(time),
                assignedmeasure_id: Set(Some(assignment.id)),
                ..Default::default()
            }))
            .exec(&txn)
            .await?;
        }

        inserted += series.len();
        tracing::debug!(assigned_measure_id = assignment.id, rows = series.len(), "Series filled");
    }

    txn.commit().await?;
    tracing::info!(rows = inserted, "Demo data created");
    Ok(ack())
}
