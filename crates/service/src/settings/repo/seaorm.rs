use sea_orm::DatabaseConnection;

use crate::settings::errors::SettingsError;
use crate::settings::repository::LinkSettingsRepository;

/// SeaORM-backed repository over the `lti_link` table.
pub struct SeaOrmLinkSettingsRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl LinkSettingsRepository for SeaOrmLinkSettingsRepository {
    async fn load_settings(&self, link_id: i64) -> Result<Option<Option<String>>, SettingsError> {
        Ok(models::lti_link::find_settings(&self.db, link_id).await?)
    }

    async fn store_settings(&self, link_id: i64, json: &str) -> Result<u64, SettingsError> {
        Ok(models::lti_link::update_settings(&self.db, link_id, json).await?)
    }
}
