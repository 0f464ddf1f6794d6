use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "measures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub unit: String,
    pub symbol: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assigned_measures::Entity")]
    AssignedMeasures,
}

impl Related<super::assigned_measures::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedMeasures.def()
    }
}

impl Related<super::stations::Entity> for Entity {
    fn to() -> RelationDef {
        super::assigned_measures::Relation::Station.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::assigned_measures::Relation::Measure.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
