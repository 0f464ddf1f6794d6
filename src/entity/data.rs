use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Double")]
    pub data_value: f64,
    pub data_time_measure: DateTime,
    /// Orphaned readings are permitted
    pub assignedmeasure_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assigned_measures::Entity",
        from = "Column::AssignedmeasureId",
        to = "super::assigned_measures::Column::Id"
    )]
    AssignedMeasure,
}

impl Related<super::assigned_measures::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedMeasure.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
