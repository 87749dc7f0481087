use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{enrollment, errors, instructor, student};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub instructor_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Instructor, Enrollment }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Instructor => Entity::belongs_to(instructor::Entity)
                .from(Column::InstructorId)
                .to(instructor::Column::Id)
                .into(),
            Relation::Enrollment => Entity::has_many(enrollment::Entity).into(),
        }
    }
}

impl Related<instructor::Entity> for Entity {
    fn to() -> RelationDef { Relation::Instructor.def() }
}

impl Related<enrollment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Enrollment.def() }
}

impl Related<student::Entity> for Entity {
    fn to() -> RelationDef { enrollment::Relation::Student.def() }
    fn via() -> Option<RelationDef> { Some(enrollment::Relation::Course.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    errors::require_name("course", name)
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
