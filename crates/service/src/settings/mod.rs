//! Link-level settings: layered architecture (domain, repository, service).
//!
//! Session cache and legacy custom parameters are passed in explicitly on
//! every call instead of being read from ambient request state.

pub mod domain;
pub mod equality;
pub mod errors;
pub mod legacy;
pub mod repo;
pub mod repository;
pub mod service;
pub mod session;

pub use domain::{LinkContext, SettingsMap};
pub use service::LinkSettingsService;
