//! Sign-in and sign-out for the dashboard.

pub mod controller;
pub mod router;
pub mod service;
