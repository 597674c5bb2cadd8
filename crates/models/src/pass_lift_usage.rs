use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{lift_usage, passes};

/// Join record charging one lift ride to a pass. Creating it costs the pass
/// one remaining lift; deleting it gives the lift back.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pass_lift_usage")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub pass_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub lift_usage_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Pass,
    LiftUsage,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Pass => Entity::belongs_to(passes::Entity)
                .from(Column::PassId)
                .to(passes::Column::Id)
                .into(),
            Relation::LiftUsage => Entity::belongs_to(lift_usage::Entity)
                .from(Column::LiftUsageId)
                .to(lift_usage::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
