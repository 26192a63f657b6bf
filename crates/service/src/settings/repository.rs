use async_trait::async_trait;

use super::errors::SettingsError;

/// Persistence for the per-link settings column.
#[async_trait]
pub trait LinkSettingsRepository: Send + Sync {
    /// Outer `None`: no row for the link. Inner `None`: settings column is NULL.
    async fn load_settings(&self, link_id: i64) -> Result<Option<Option<String>>, SettingsError>;
    /// Overwrite the settings column; returns the number of rows matched.
    async fn store_settings(&self, link_id: i64, json: &str) -> Result<u64, SettingsError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockLinkSettingsRepository {
        rows: Mutex<HashMap<i64, Option<String>>>, // key: link_id
        writes: Mutex<Vec<(i64, String)>>,
        fail: bool,
    }

    impl MockLinkSettingsRepository {
        /// Repository whose every call fails, for error propagation tests.
        pub fn failing() -> Self {
            Self { fail: true, ..Self::default() }
        }

        /// Add a link row with the given raw settings column.
        pub fn with_link(self, link_id: i64, settings: Option<&str>) -> Self {
            self.rows.lock().unwrap().insert(link_id, settings.map(str::to_string));
            self
        }

        /// Every successful `store_settings` call, in order.
        pub fn writes(&self) -> Vec<(i64, String)> {
            self.writes.lock().unwrap().clone()
        }

        pub fn stored(&self, link_id: i64) -> Option<Option<String>> {
            self.rows.lock().unwrap().get(&link_id).cloned()
        }
    }

    #[async_trait]
    impl LinkSettingsRepository for MockLinkSettingsRepository {
        async fn load_settings(&self, link_id: i64) -> Result<Option<Option<String>>, SettingsError> {
            if self.fail {
                return Err(SettingsError::Repository("mock read failure".into()));
            }
            let rows = self.rows.lock().unwrap();
            Ok(rows.get(&link_id).cloned())
        }

        async fn store_settings(&self, link_id: i64, json: &str) -> Result<u64, SettingsError> {
            if self.fail {
                return Err(SettingsError::Repository("mock write failure".into()));
            }
            let mut rows = self.rows.lock().unwrap();
            self.writes.lock().unwrap().push((link_id, json.to_string()));
            match rows.get_mut(&link_id) {
                Some(slot) => {
                    *slot = Some(json.to_string());
                    Ok(1)
                }
                None => Ok(0),
            }
        }
    }
}
