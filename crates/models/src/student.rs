use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{course, enrollment, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Enrollment }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Enrollment => Entity::has_many(enrollment::Entity).into() }
    }
}

impl Related<enrollment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Enrollment.def() }
}

impl Related<course::Entity> for Entity {
    fn to() -> RelationDef { enrollment::Relation::Course.def() }
    fn via() -> Option<RelationDef> { Some(enrollment::Relation::Student.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    errors::require_name("student", name)
}

/// Column a client may sort student listings by.
pub fn sortable(property: &str) -> Option<Column> {
    match property {
        "id" => Some(Column::Id),
        "name" => Some(Column::Name),
        "created_at" => Some(Column::CreatedAt),
        "updated_at" => Some(Column::UpdatedAt),
        _ => None,
    }
}
