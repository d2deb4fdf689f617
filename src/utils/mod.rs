//! Shared helpers for the web layer.
//!
//! - [`email`]: SMTP delivery and the background email queue
//! - [`flash`]: one-shot messages carried in a signed cookie
//! - [`redirect`]: redirect responses

pub mod email;
pub mod flash;
pub mod redirect;
