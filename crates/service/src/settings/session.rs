use async_trait::async_trait;
use tokio::sync::RwLock;

/// Request/session-scoped slot holding the last serialized settings blob
/// seen for a link.
#[async_trait]
pub trait SessionCache: Send + Sync {
    async fn link_settings(&self, link_id: i64) -> Option<String>;
    async fn set_link_settings(&self, link_id: i64, json: String);
}

/// In-process LTI session state. Only the settings slot lives here; it
/// remembers which link it was filled for and ignores reads for any other.
#[derive(Debug, Default)]
pub struct LtiSession {
    link_settings: RwLock<Option<(i64, String)>>,
}

impl LtiSession {
    pub fn new() -> Self { Self::default() }

    /// Drop the cached blob, e.g. when the session ends.
    pub async fn clear(&self) {
        *self.link_settings.write().await = None;
    }
}

#[async_trait]
impl SessionCache for LtiSession {
    async fn link_settings(&self, link_id: i64) -> Option<String> {
        let slot = self.link_settings.read().await;
        match slot.as_ref() {
            Some((id, json)) if *id == link_id => Some(json.clone()),
            _ => None,
        }
    }

    async fn set_link_settings(&self, link_id: i64, json: String) {
        *self.link_settings.write().await = Some((link_id, json));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn slot_is_scoped_to_link() {
        let session = LtiSession::new();
        assert_eq!(session.link_settings(1).await, None);

        session.set_link_settings(1, r#"{"a":1}"#.into()).await;
        assert_eq!(session.link_settings(1).await.as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(session.link_settings(2).await, None);

        session.set_link_settings(2, "{}".into()).await;
        assert_eq!(session.link_settings(1).await, None);

        session.clear().await;
        assert_eq!(session.link_settings(2).await, None);
    }
}
