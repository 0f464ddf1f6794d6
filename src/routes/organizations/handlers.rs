use axum::{extract::State, Json};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::common::AppState;
use crate::entity::{organizations, persons};
use crate::error::AppResult;
use crate::routes::extract::{ApiJson, ApiPath};
use crate::routes::persons::PersonResponse;
use crate::routes::{ack, required, resolve_organization, Ack};

use super::types::{NewOrganization, OrganizationResponse};

/// Create an organization
#[utoipa::path(
    post,
    path = "/organizations",
    request_body = NewOrganization,
    responses(
        (status = 200, description = "Organization created", body = String),
        (status = 400, description = "Missing body or field"),
    ),
    tag = "organizations"
)]
pub async fn create_organization(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewOrganization>,
) -> AppResult<Ack> {
    let organization = organizations::ActiveModel {
        name: Set(required(body.name, "name")?),
        address: Set(required(body.address, "address")?),
        phone: Set(required(body.phone, "phone")?),
        email: Set(required(body.email, "email")?),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    tracing::info!(organization_id = organization.id, "Organization created");
    Ok(ack())
}

/// List all organizations
#[utoipa::path(
    get,
    path = "/organizations",
    responses(
        (status = 200, description = "Organizations retrieved successfully", body = Vec<OrganizationResponse>),
    ),
    tag = "organizations"
)]
pub async fn list_organizations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<OrganizationResponse>>> {
    let organizations_list = organizations::Entity::find()
        .order_by_asc(organizations::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(
        organizations_list
            .into_iter()
            .map(OrganizationResponse::from)
            .collect(),
    ))
}

/// List the people belonging to an organization
#[utoipa::path(
    get,
    path = "/organizations/{organization_id}/people",
    params(
        ("organization_id" = i32, Path, description = "Organization ID"),
    ),
    responses(
        (status = 200, description = "People retrieved successfully", body = Vec<PersonResponse>),
        (status = 404, description = "Organization not found"),
    ),
    tag = "organizations"
)]
pub async fn list_organization_people(
    State(state): State<AppState>,
    ApiPath(organization_id): ApiPath<i32>,
) -> AppResult<Json<Vec<PersonResponse>>> {
    let organization = resolve_organization(&state.db, organization_id).await?;

    let people = persons::Entity::find()
        .filter(persons::Column::OrganizationId.eq(organization.id))
        .order_by_asc(persons::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(people.into_iter().map(PersonResponse::from).collect()))
}
