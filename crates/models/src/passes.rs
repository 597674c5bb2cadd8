use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{client, pass_type};

/// A client's purchased allowance of lift rides and/or rental hours.
///
/// `remaining_lifts` and `remaining_hours` are seeded from the pass type at
/// creation and must only be mutated by consumption-link services, which
/// guarantee that deleting a link restores exactly what creating it charged.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pass")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_id: i32,
    pub pass_type_id: i32,
    pub purchase_date: Date,
    pub valid_from: Date,
    pub valid_to: Date,
    pub remaining_lifts: i32,
    #[sea_orm(column_type = "Double")]
    pub remaining_hours: f64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Client,
    PassType,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Client => Entity::belongs_to(client::Entity)
                .from(Column::ClientId)
                .to(client::Column::Id)
                .into(),
            Relation::PassType => Entity::belongs_to(pass_type::Entity)
                .from(Column::PassTypeId)
                .to(pass_type::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Create a pass with balances seeded from its type's limits.
pub async fn create(
    db: &DatabaseConnection,
    client_id: i32,
    pass_type: &pass_type::Model,
    purchase_date: Date,
    valid_from: Date,
    valid_to: Date,
) -> Result<Model, ModelError> {
    if valid_to < valid_from {
        return Err(ModelError::Validation("valid_to precedes valid_from".into()));
    }
    let am = ActiveModel {
        client_id: Set(client_id),
        pass_type_id: Set(pass_type.id),
        purchase_date: Set(purchase_date),
        valid_from: Set(valid_from),
        valid_to: Set(valid_to),
        remaining_lifts: Set(pass_type.limit_lifts),
        remaining_hours: Set(pass_type.limit_hours as f64),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}
