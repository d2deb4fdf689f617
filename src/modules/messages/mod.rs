//! Contact-form submissions, read-only in the dashboard.

pub mod controller;
pub mod router;

use sitekit_db::Repository;
use sitekit_models::Message;

pub type MessageRepository = Repository<Message>;
