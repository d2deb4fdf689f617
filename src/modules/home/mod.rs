//! The public landing page and its contact form.

pub mod controller;
pub mod router;
pub mod service;
