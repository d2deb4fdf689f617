pub mod auth;
pub mod dashboard;
pub mod emails;
pub mod home;
pub mod messages;
pub mod posts;
pub mod site_config;
pub mod users;
