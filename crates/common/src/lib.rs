//! Shared runtime helpers for the workspace binaries.

pub mod utils;
