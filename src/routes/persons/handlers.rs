use axum::{extract::State, Json};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::common::AppState;
use crate::entity::persons;
use crate::error::AppResult;
use crate::routes::extract::ApiJson;
use crate::routes::{ack, required, resolve_organization, Ack};

use super::types::{NewPerson, PersonResponse};

/// Create a person within an existing organization
#[utoipa::path(
    post,
    path = "/persons",
    request_body = NewPerson,
    responses(
        (status = 200, description = "Person created", body = String),
        (status = 400, description = "Missing body or field"),
        (status = 404, description = "Organization not found"),
    ),
    tag = "persons"
)]
pub async fn create_person(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewPerson>,
) -> AppResult<Ack> {
    let username = required(body.username, "username")?;
    let email = required(body.email, "email")?;
    let organization_id = required(body.organization_id, "organization")?;

    let organization = resolve_organization(&state.db, organization_id).await?;

    let person = persons::ActiveModel {
        username: Set(username),
        email: Set(email),
        organization_id: Set(organization.id),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    tracing::info!(person_id = person.id, organization_id, "Person created");
    Ok(ack())
}

/// List all persons
#[utoipa::path(
    get,
    path = "/persons",
    responses(
        (status = 200, description = "Persons retrieved successfully", body = Vec<PersonResponse>),
    ),
    tag = "persons"
)]
pub async fn list_persons(State(state): State<AppState>) -> AppResult<Json<Vec<PersonResponse>>> {
    let people = persons::Entity::find()
        .order_by_asc(persons::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(people.into_iter().map(PersonResponse::from).collect()))
}
