//! # sitekit models
//!
//! Table rows and the HTML forms that write them.
//!
//! Each entity implements [`sitekit_db::Entity`] so the generic repository can
//! serve it. Each form deserializes from an urlencoded body (missing fields
//! read as empty), reports its problems through [`FormErrors`], and converts
//! itself into the [`sitekit_db::Fields`] to persist.

pub mod emails;
pub mod form;
pub mod messages;
pub mod posts;
pub mod site_config;
pub mod users;

pub use emails::{Email, EmailForm};
pub use form::FormErrors;
pub use messages::{ContactForm, Message};
pub use posts::{Post, PostForm};
pub use site_config::{ConfigForm, SiteConfig};
pub use users::{LoginForm, User, UserForm, UserUpdateForm};
