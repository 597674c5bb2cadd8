use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{equipment, rental};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rental_equipment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub rental_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub equipment_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Rental,
    Equipment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Rental => Entity::belongs_to(rental::Entity)
                .from(Column::RentalId)
                .to(rental::Column::Id)
                .into(),
            Relation::Equipment => Entity::belongs_to(equipment::Entity)
                .from(Column::EquipmentId)
                .to(equipment::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
