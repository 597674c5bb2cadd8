use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{passes, rental};

/// Join record charging a rental's duration to an hourly pass.
///
/// `hours_deducted` is the exact amount charged at link time; deletion
/// restores this stored value rather than re-deriving it, so later edits to
/// the rental's times cannot skew the balance.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pass_rental_usage")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub pass_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub rental_id: i32,
    #[sea_orm(column_type = "Double")]
    pub hours_deducted: f64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Pass,
    Rental,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Pass => Entity::belongs_to(passes::Entity)
                .from(Column::PassId)
                .to(passes::Column::Id)
                .into(),
            Relation::Rental => Entity::belongs_to(rental::Entity)
                .from(Column::RentalId)
                .to(rental::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
