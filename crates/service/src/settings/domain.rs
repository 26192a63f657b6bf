use serde_json::Value;

use super::errors::SettingsError;
use super::legacy::CustomParameterSource;

/// Plain key/value view of a settings blob. Values are never hydrated into
/// typed structs.
pub type SettingsMap = serde_json::Map<String, Value>;

/// The link a request is operating on, plus the launch parameters that
/// supply legacy defaults for it.
#[derive(Clone, Copy)]
pub struct LinkContext<'a> {
    pub link_id: i64,
    pub custom: &'a dyn CustomParameterSource,
}

impl<'a> LinkContext<'a> {
    pub fn new(link_id: i64, custom: &'a dyn CustomParameterSource) -> Self {
        Self { link_id, custom }
    }
}

/// Decode a stored blob into a mapping.
///
/// Objects decode as-is. Arrays decode to an index-keyed mapping, which covers
/// `[]`, the encoding older writers used for an empty settings list. Anything
/// else is a decode error.
pub fn decode_blob(json: &str) -> Result<SettingsMap, SettingsError> {
    let value: Value = serde_json::from_str(json).map_err(|e| SettingsError::Decode(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Array(items) => Ok(items
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect()),
        other => Err(SettingsError::Decode(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

/// Serialize a mapping for storage. An empty mapping becomes `{}`.
pub fn encode_blob(map: &SettingsMap) -> Result<String, SettingsError> {
    serde_json::to_string(map).map_err(|e| SettingsError::Encode(e.to_string()))
}

/// Overlay `top` onto `base`; keys in `top` win.
pub fn merge(mut base: SettingsMap, top: SettingsMap) -> SettingsMap {
    for (k, v) in top {
        base.insert(k, v);
    }
    base
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
