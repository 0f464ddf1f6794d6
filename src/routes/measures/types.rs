use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::measures;

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewMeasure {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MeasureUpdate {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub symbol: Option<String>,
}

impl MeasureUpdate {
    pub fn apply(self, measure: &mut measures::ActiveModel) {
        if let Some(name) = self.name {
            measure.name = Set(name);
        }
        if let Some(unit) = self.unit {
            measure.unit = Set(unit);
        }
        if let Some(symbol) = self.symbol {
            measure.symbol = Set(symbol);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MeasureResponse {
    pub id: i32,
    pub name: String,
    pub unit: String,
    pub symbol: String,
}

impl From<measures::Model> for MeasureResponse {
    fn from(m: measures::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            unit: m.unit,
            symbol: m.symbol,
        }
    }
}
