use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::organizations;

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewOrganization {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrganizationResponse {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl From<organizations::Model> for OrganizationResponse {
    fn from(o: organizations::Model) -> Self {
        Self {
            id: o.id,
            name: o.name,
            address: o.address,
            phone: o.phone,
            email: o.email,
        }
    }
}
