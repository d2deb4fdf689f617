use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sitekit_db::{Entity, Fields};
use sqlx::FromRow;
use validator::Validate;

use crate::form::FormErrors;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Post {
    const TABLE: &'static str = "posts";
    const COLUMNS: &'static [&'static str] =
        &["id", "slug", "title", "content", "created_at", "updated_at"];
    const TOUCH_ON_UPDATE: Option<&'static str> = Some("updated_at");

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PostForm {
    #[validate(length(max = 255, message = "Field cannot be longer than 255 characters."))]
    pub slug: String,
    #[validate(length(max = 255, message = "Field cannot be longer than 255 characters."))]
    pub title: String,
    pub content: String,
}

impl PostForm {
    pub fn from_post(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
        }
    }

    pub fn check(&self) -> FormErrors {
        let mut errors = FormErrors::from_validation(self.validate());
        if self.slug.trim().contains(char::is_whitespace) {
            errors.add("slug", "Slug cannot contain spaces.");
        }
        errors.require("slug", &self.slug);
        errors.require("title", &self.title);
        errors
    }

    pub fn to_fields(&self) -> Fields {
        Fields::new()
            .set("slug", self.slug.trim())
            .set("title", self.title.trim())
            .set("content", self.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_and_title_required() {
        let errors = PostForm::default().check();
        assert!(errors.has("slug"));
        assert!(errors.has("title"));
        assert!(!errors.has("content"));
    }

    #[test]
    fn test_slug_without_spaces() {
        let form = PostForm {
            slug: "hello world".to_string(),
            title: "Hello".to_string(),
            content: String::new(),
        };
        assert_eq!(form.check().get("slug"), &["Slug cannot contain spaces.".to_string()]);
    }
}
