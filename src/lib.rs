//! # sitekit
//!
//! A server-rendered company site with an admin dashboard, built on Axum and
//! PostgreSQL.
//!
//! ## Overview
//!
//! - **Home page**: renders the singleton site configuration and a contact
//!   form; submissions are stored and emailed to the mailing list
//! - **Dashboard**: CRUD pages for users, mailing-list emails and posts, the
//!   site configuration, and a read-only view of contact messages
//! - **Authentication**: JWT access tokens carried in the `Authorization`
//!   header or an http-only cookie
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── sitekit-core/     # AppError, pagination, password hashing, phone numbers
//! ├── sitekit-config/   # Settings read from the environment
//! ├── sitekit-db/       # Pool, migrations, generic Repository<E>
//! ├── sitekit-auth/     # JWT claims, token creation and verification
//! └── sitekit-models/   # Table rows and the HTML forms that write them
//! src/
//! ├── cli/              # init-db and create-superuser
//! ├── middleware/       # Per-request authentication, AuthUser / MaybeUser
//! ├── modules/          # Feature modules (controller, router, service)
//! ├── utils/            # Flash messages, redirects, email queue
//! └── views/            # Askama page models (templates/ holds the HTML)
//! ```
//!
//! Each feature module follows the same layout:
//!
//! - `mod.rs`: module exports
//! - `controller.rs`: HTTP handlers
//! - `service.rs` / `repository.rs`: business logic and storage, when the
//!   generic repository is not enough
//! - `router.rs`: Axum router configuration
//!
//! ## Request flow
//!
//! 1. `logging_middleware` tags the request with an id and logs its outcome
//! 2. `authenticate` resolves the bearer token into a session (or answers 401)
//! 3. Dashboard handlers take [`middleware::auth::AuthUser`]; anonymous
//!    visitors are redirected to the login page
//! 4. Form posts re-render with inline errors, or flash a message and redirect

pub mod cli;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
pub mod views;
