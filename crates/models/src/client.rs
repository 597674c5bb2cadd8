use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "client")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    pub document_id: String,
    pub date_of_birth: Date,
    pub phone_number: String,
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_full_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("full_name required".into()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if !email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    full_name: &str,
    document_id: &str,
    date_of_birth: Date,
    phone_number: &str,
    email: &str,
) -> Result<Model, ModelError> {
    validate_full_name(full_name)?;
    validate_email(email)?;
    let am = ActiveModel {
        full_name: Set(full_name.to_string()),
        document_id: Set(document_id.to_string()),
        date_of_birth: Set(date_of_birth),
        phone_number: Set(phone_number.to_string()),
        email: Set(email.to_string()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}
