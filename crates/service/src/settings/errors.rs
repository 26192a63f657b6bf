use thiserror::Error;

/// Failures surfaced by settings reads and writes. None are retried.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("repository error: {0}")]
    Repository(String),
    #[error("settings decode error: {0}")]
    Decode(String),
    #[error("settings encode error: {0}")]
    Encode(String),
}

impl SettingsError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            SettingsError::Repository(_) => 1200,
            SettingsError::Decode(_) => 1301,
            SettingsError::Encode(_) => 1302,
        }
    }
}

impl From<models::errors::ModelError> for SettingsError {
    fn from(e: models::errors::ModelError) -> Self {
        SettingsError::Repository(e.to_string())
    }
}
