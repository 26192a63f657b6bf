//! Service layer for LTI link-level settings.
//! - Reads and writes the JSON settings blob stored on each `lti_link` row.
//! - Layers legacy LTI 1.x custom parameters underneath stored settings.
//! - Keeps the last-read blob in an optional request/session cache.

pub mod settings;
#[cfg(test)]
pub mod test_support;
