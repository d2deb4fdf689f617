//! The admin dashboard: mounts every entity router under the configured prefix.

pub mod controller;
pub mod router;
pub mod service;
