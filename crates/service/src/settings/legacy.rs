//! Legacy LTI 1.x custom launch parameters used as settings defaults.

use std::collections::HashMap;

use serde_json::Value;

use super::domain::SettingsMap;

/// Source of LMS-supplied custom parameters for the current launch.
pub trait CustomParameterSource: Send + Sync {
    fn get_custom(&self, name: &str) -> Option<Value>;
}

/// Launch POST parameters as received from the LMS.
#[derive(Debug, Clone, Default)]
pub struct LaunchParameters {
    params: HashMap<String, String>,
}

impl LaunchParameters {
    pub fn new() -> Self { Self::default() }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { params: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

impl CustomParameterSource for LaunchParameters {
    /// Looks up `custom_<name>`, with `name` normalized the way LMSs mangle
    /// custom parameter names.
    fn get_custom(&self, name: &str) -> Option<Value> {
        let key = format!("custom_{}", normalize_custom_name(name));
        self.params.get(&key).map(|v| Value::String(v.clone()))
    }
}

/// Lower-case, with every non-alphanumeric character replaced by `_`.
pub fn normalize_custom_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

/// Build the defaults mapping. Every field gets an entry; missing parameters
/// map to `null`.
pub fn legacy_defaults(fields: &[String], source: &dyn CustomParameterSource) -> SettingsMap {
    let mut defaults = SettingsMap::new();
    for field in fields {
        let value = source.get_custom(field).unwrap_or(Value::Null);
        defaults.insert(field.clone(), value);
    }
    defaults
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> Vec<String> { configs::default_legacy_fields() }

    #[test]
    fn missing_parameters_default_to_null() {
        let defaults = legacy_defaults(&fields(), &LaunchParameters::new());
        // `due` is listed twice but lands once
        assert_eq!(defaults.len(), 6);
        assert!(defaults.values().all(Value::is_null));
        for key in ["dologin", "close", "due", "timezone", "period", "cost"] {
            assert!(defaults.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn custom_prefixed_parameters_are_used() {
        let launch = LaunchParameters::from_pairs([
            ("custom_due", "2024-05-01 23:59"),
            ("custom_timezone", "America/Detroit"),
            ("cost", "ignored without prefix"),
        ]);
        let defaults = legacy_defaults(&fields(), &launch);
        assert_eq!(defaults.get("due"), Some(&json!("2024-05-01 23:59")));
        assert_eq!(defaults.get("timezone"), Some(&json!("America/Detroit")));
        assert_eq!(defaults.get("cost"), Some(&Value::Null));
    }

    #[test]
    fn names_are_normalized() {
        assert_eq!(normalize_custom_name("Do-Login"), "do_login");
        let launch = LaunchParameters::from_pairs([("custom_do_login", "1")]);
        assert_eq!(launch.get_custom("Do Login"), Some(json!("1")));
    }
}
