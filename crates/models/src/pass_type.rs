use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Template a pass is purchased from. `limit_lifts > 0` makes it a lift
/// pass, `limit_hours > 0` an hourly pass; a type may be both.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pass_type")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub limit_lifts: i32,
    pub limit_hours: i32,
    pub price: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}
