//! Request middleware and the extractors built on it.
//!
//! - [`auth`]: token authentication, [`auth::AuthUser`] and [`auth::MaybeUser`]

pub mod auth;
