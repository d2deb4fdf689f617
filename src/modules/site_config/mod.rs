//! The singleton site configuration shown on the home page.

pub mod controller;
pub mod repository;
pub mod router;

pub use repository::SiteConfigRepository;
