//! Site posts, addressed by slug.

pub mod controller;
pub mod router;

use sitekit_db::Repository;
use sitekit_models::Post;

pub type PostRepository = Repository<Post>;
