//! # sitekit auth
//!
//! Session tokens for the dashboard.
//!
//! - [`claims`]: the JWT payload (`user_id`, `iat`, `exp`)
//! - [`jwt`]: token creation and verification
//! - [`token`]: picking the bearer token out of the `Authorization` header or cookie
//!
//! Verification never panics and never returns an HTTP error: it yields either
//! an [`Identity`] or a typed [`AuthFailure`], and the web layer decides how
//! to answer.
//!
//! # Example
//!
//! ```ignore
//! use sitekit_auth::{authenticate_bearer, create_access_token, select_bearer};
//!
//! let token = create_access_token(user.id, &jwt_config)?;
//! let cookie_value = sitekit_auth::bearer_value(&token);
//!
//! if let Some(bearer) = select_bearer(header, Some(&cookie_value)) {
//!     let identity = authenticate_bearer(bearer.token, &jwt_config)?;
//!     assert_eq!(identity.user_id, user.id);
//! }
//! ```

pub mod claims;
pub mod error;
pub mod jwt;
pub mod token;

pub use claims::Claims;
pub use error::AuthFailure;
pub use jwt::{authenticate_bearer, create_access_token, verify_token};
pub use token::{BearerToken, Identity, TokenSource, bearer_value, select_bearer};
