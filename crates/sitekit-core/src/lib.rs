//! # sitekit core
//!
//! Foundational types shared by every sitekit crate:
//!
//! - [`errors`]: application error type with HTTP response conversion
//! - [`pagination`]: list query parameters (`limit`, `offset`, `page`, `order_by`)
//! - [`password`]: bcrypt password hashing and verification
//! - [`phone`]: international phone number validation
//! - [`serde`]: deserializers for HTML form fields
//!
//! # Example
//!
//! ```ignore
//! use sitekit_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//!
//! let error = AppError::not_found(anyhow::anyhow!("User does not exist"));
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod phone;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
pub use phone::check_phone_number;
