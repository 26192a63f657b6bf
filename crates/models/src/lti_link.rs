use sea_orm::{entity::prelude::*, sea_query::Expr, DatabaseConnection, QueryFilter, QuerySelect, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

/// One LTI tool placement. `settings` is the serialized JSON blob, NULL until
/// the tool first writes settings for the link.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lti_link")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub link_id: i64,
    pub link_key: String,
    pub title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub settings: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { match *self {} }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_link_key(key: &str) -> Result<(), errors::ModelError> {
    if key.trim().is_empty() {
        return Err(errors::ModelError::Validation("link_key required".into()));
    }
    if key.len() > 255 {
        return Err(errors::ModelError::Validation("link_key longer than 255 bytes".into()));
    }
    Ok(())
}

/// Insert a link row with no settings.
pub async fn create(
    db: &DatabaseConnection,
    link_id: i64,
    link_key: &str,
    title: Option<&str>,
) -> Result<Model, errors::ModelError> {
    validate_link_key(link_key)?;
    let am = ActiveModel {
        link_id: Set(link_id),
        link_key: Set(link_key.to_string()),
        title: Set(title.map(str::to_string)),
        settings: Set(None),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// `SELECT settings FROM lti_link WHERE link_id = ?`.
///
/// Outer `None`: no such link. Inner `None`: the link exists but has never
/// stored settings.
pub async fn find_settings(db: &DatabaseConnection, link_id: i64) -> Result<Option<Option<String>>, errors::ModelError> {
    Entity::find_by_id(link_id)
        .select_only()
        .column(Column::Settings)
        .into_tuple::<Option<String>>()
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// `UPDATE lti_link SET settings = ? WHERE link_id = ?`, returning the number
/// of rows matched.
pub async fn update_settings(db: &DatabaseConnection, link_id: i64, settings: &str) -> Result<u64, errors::ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::Settings, Expr::value(settings.to_string()))
        .filter(Column::LinkId.eq(link_id))
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}
