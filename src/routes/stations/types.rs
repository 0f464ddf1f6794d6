use sea_orm::Set;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::entity::stations;

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewStation {
    pub name: Option<String>,
    pub lattitude: Option<String>,
    pub longitude: Option<String>,
    pub person_id: Option<i32>,
    pub organization_id: Option<i32>,
    pub streetaddress: Option<String>,
    pub numberaddress: Option<String>,
    pub description: Option<String>,
}

/// Partial update: only fields present in the body are written.
///
/// `description` may be sent as `null` to clear it.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StationUpdate {
    pub name: Option<String>,
    pub lattitude: Option<String>,
    pub longitude: Option<String>,
    pub person_id: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub organization_id: Option<i32>,
    pub streetaddress: Option<String>,
    pub numberaddress: Option<String>,
}

impl StationUpdate {
    pub fn apply(self, station: &mut stations::ActiveModel) {
        if let Some(name) = self.name {
            station.name = Set(name);
        }
        if let Some(lattitude) = self.lattitude {
            station.lattitude = Set(lattitude);
        }
        if let Some(longitude) = self.longitude {
            station.longitude = Set(longitude);
        }
        if let Some(person_id) = self.person_id {
            station.person_id = Set(person_id);
        }
        if let Some(description) = self.description {
            station.description = Set(description);
        }
        if let Some(organization_id) = self.organization_id {
            station.organization_id = Set(organization_id);
        }
        if let Some(streetaddress) = self.streetaddress {
            station.streetaddress = Set(streetaddress);
        }
        if let Some(numberaddress) = self.numberaddress {
            station.numberaddress = Set(numberaddress);
        }
    }
}

/// Wraps any present value, `null` included, so absence stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StationResponse {
    pub id: i32,
    pub name: String,
    pub lattitude: String,
    pub longitude: String,
    pub streetaddress: String,
    pub numberaddress: String,
    /// Responsible person ID
    pub responsible: i32,
    pub description: Option<String>,
    /// Organization ID
    pub organization: i32,
}

impl From<stations::Model> for StationResponse {
    fn from(s: stations::Model) -> Self {
        Self {
            id: s.id,
            name: s.name,
            lattitude: s.lattitude,
            longitude: s.longitude,
            streetaddress: s.streetaddress,
            numberaddress: s.numberaddress,
            responsible: s.person_id,
            description: s.description,
            organization: s.organization_id,
        }
    }
}
