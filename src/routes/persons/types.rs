use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::persons;

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewPerson {
    pub username: Option<String>,
    pub email: Option<String>,
    pub organization_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PersonResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Organization ID
    pub organization: i32,
}

impl From<persons::Model> for PersonResponse {
    fn from(p: persons::Model) -> Self {
        Self {
            id: p.id,
            username: p.username,
            email: p.email,
            organization: p.organization_id,
        }
    }
}
