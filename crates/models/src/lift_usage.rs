use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{client, lift};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lift_usage")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_id: i32,
    pub lift_id: i32,
    pub usage_date: Date,
    pub usage_time_start: Time,
    pub usage_time_end: Time,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Client,
    Lift,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Client => Entity::belongs_to(client::Entity)
                .from(Column::ClientId)
                .to(client::Column::Id)
                .into(),
            Relation::Lift => Entity::belongs_to(lift::Entity)
                .from(Column::LiftId)
                .to(lift::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
