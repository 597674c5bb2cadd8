use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::equipment_type;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "equipment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub type_id: i32,
    pub model: String,
    pub is_available: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    EquipmentType,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::EquipmentType => Entity::belongs_to(equipment_type::Entity)
                .from(Column::TypeId)
                .to(equipment_type::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
