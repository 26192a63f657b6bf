use std::sync::Arc;

use configs::SettingsConfig;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::domain::{decode_blob, encode_blob, merge, LinkContext, SettingsMap};
use super::equality::values_equal;
use super::errors::SettingsError;
use super::legacy::legacy_defaults;
use super::repository::LinkSettingsRepository;
use super::session::SessionCache;

/// Link-level settings accessor.
///
/// Reads go session cache first, then the `lti_link` row, with legacy custom
/// parameters layered underneath. Writes go straight to the row and refresh
/// the session cache. There is no locking between a read and the write that
/// follows it; concurrent writers to one link are last-writer-wins.
pub struct LinkSettingsService<R: LinkSettingsRepository> {
    repo: Arc<R>,
    cfg: SettingsConfig,
}

impl<R: LinkSettingsRepository> LinkSettingsService<R> {
    pub fn new(repo: Arc<R>, cfg: SettingsConfig) -> Self { Self { repo, cfg } }

    /// Legacy defaults for the link's launch, recomputed on every call.
    pub fn defaults(&self, link: &LinkContext<'_>) -> SettingsMap {
        legacy_defaults(&self.cfg.legacy_fields, link.custom)
    }

    /// Effective settings for the link.
    ///
    /// A session cache hit is returned as stored, without the legacy defaults,
    /// unless `merge_defaults_on_cache_hit` is set. A blank cached blob yields
    /// the defaults. On a database read the raw blob is written back to the
    /// session cache and layered over the defaults.
    ///
    /// # Examples
    /// ```
    /// use service::settings::{LinkContext, LinkSettingsService};
    /// use service::settings::legacy::LaunchParameters;
    /// use service::settings::repository::mock::MockLinkSettingsRepository;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockLinkSettingsRepository::default().with_link(1, Some(r#"{"a":1}"#)));
    /// let svc = LinkSettingsService::new(repo, configs::SettingsConfig::default());
    /// let launch = LaunchParameters::new();
    /// let all = tokio_test::block_on(svc.get_all(&LinkContext::new(1, &launch), None)).unwrap();
    /// assert_eq!(all["a"], 1);
    /// assert!(all["due"].is_null());
    /// ```
    #[instrument(skip(self, link, session), fields(link_id = link.link_id, has_session = session.is_some()))]
    pub async fn get_all(
        &self,
        link: &LinkContext<'_>,
        session: Option<&dyn SessionCache>,
    ) -> Result<SettingsMap, SettingsError> {
        let defaults = self.defaults(link);

        if let Some(cache) = session {
            if let Some(json) = cache.link_settings(link.link_id).await {
                if json.trim().is_empty() {
                    debug!("session cache holds blank settings; using defaults");
                    return Ok(defaults);
                }
                let cached = decode_blob(&json)?;
                debug!(keys = cached.len(), "session_cache_hit");
                if self.cfg.merge_defaults_on_cache_hit {
                    return Ok(merge(defaults, cached));
                }
                return Ok(cached);
            }
        }

        let json = match self.repo.load_settings(link.link_id).await? {
            None => {
                debug!("link row not found; using defaults");
                return Ok(defaults);
            }
            Some(None) => {
                debug!("link has no stored settings; using defaults");
                return Ok(defaults);
            }
            Some(Some(json)) => json,
        };

        let stored = decode_blob(&json)?;
        if let Some(cache) = session {
            cache.set_link_settings(link.link_id, json).await;
        }
        debug!(keys = stored.len(), "settings loaded from store");
        Ok(merge(defaults, stored))
    }

    /// Single effective setting; `None` when the key is absent. A stored
    /// `false` or `null` comes back as `Some`.
    pub async fn get(
        &self,
        link: &LinkContext<'_>,
        session: Option<&dyn SessionCache>,
        key: &str,
    ) -> Result<Option<Value>, SettingsError> {
        let mut all = self.get_all(link, session).await?;
        Ok(all.remove(key))
    }

    /// Replace the link's stored settings with `keyvals`. An empty mapping is
    /// stored as `{}`, which clears every explicit key.
    #[instrument(skip(self, link, session, keyvals), fields(link_id = link.link_id, keys = keyvals.len()))]
    pub async fn set_all(
        &self,
        link: &LinkContext<'_>,
        session: Option<&dyn SessionCache>,
        keyvals: &SettingsMap,
    ) -> Result<(), SettingsError> {
        let json = encode_blob(keyvals)?;
        let rows = self.repo.store_settings(link.link_id, &json).await?;
        if rows == 0 {
            warn!("settings update matched no lti_link row");
        }
        if let Some(cache) = session {
            cache.set_link_settings(link.link_id, json).await;
        }
        info!(rows, "link_settings_written");
        Ok(())
    }

    /// Merge `keyvals` into the effective settings and store the result, but
    /// only if some key is missing or differs under the configured equality
    /// policy. Returns whether a write happened.
    ///
    /// The stored result is the whole effective mapping, so legacy defaults
    /// become explicit settings the first time anything changes.
    #[instrument(skip(self, link, session, keyvals), fields(link_id = link.link_id, keys = keyvals.len()))]
    pub async fn set(
        &self,
        link: &LinkContext<'_>,
        session: Option<&dyn SessionCache>,
        keyvals: SettingsMap,
    ) -> Result<bool, SettingsError> {
        let current = self.get_all(link, session).await?;
        let Some(changed) = self.first_difference(&current, &keyvals) else {
            debug!("settings unchanged; skipping write");
            return Ok(false);
        };
        debug!(key = %changed, "settings differ");

        let merged = merge(current, keyvals);
        self.set_all(link, session, &merged).await?;
        Ok(true)
    }

    /// First key in `keyvals` that is absent from `current` or not equal to it.
    fn first_difference<'k>(&self, current: &SettingsMap, keyvals: &'k SettingsMap) -> Option<&'k str> {
        keyvals
            .iter()
            .find(|(k, v)| match current.get(k.as_str()) {
                Some(existing) => !values_equal(self.cfg.equality, v, existing),
                None => true,
            })
            .map(|(k, _)| k.as_str())
    }
}
