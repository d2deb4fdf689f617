//! Mailing-list addresses that receive contact messages.

pub mod controller;
pub mod router;

use sitekit_db::Repository;
use sitekit_models::Email;

pub type EmailRepository = Repository<Email>;
