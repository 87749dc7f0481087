use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{course, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "instructor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Course }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Course => Entity::has_many(course::Entity).into() }
    }
}

impl Related<course::Entity> for Entity {
    fn to() -> RelationDef { Relation::Course.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    errors::require_name("instructor", name)
}

pub fn sortable(property: &str) -> Option<Column> {
    match property {
        "id" => Some(Column::Id),
        "name" => Some(Column::Name),
        "created_at" => Some(Column::CreatedAt),
        "updated_at" => Some(Column::UpdatedAt),
        _ => None,
    }
}
