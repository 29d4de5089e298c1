//! Searchable field names per entity collection.
//!
//! These are the keys accepted in the `[search.<collection>.weights]`
//! config tables.

pub const TITLE: &str = "title";
pub const SUBTITLE: &str = "subtitle";
pub const EXCERPT: &str = "excerpt";
pub const AUTHOR: &str = "author";
pub const CATEGORY: &str = "category";
pub const NAME: &str = "name";
pub const BIO: &str = "bio";
pub const DESCRIPTION: &str = "description";

/// `author` and `category` resolve to the referenced entity's name
pub const ARTICLE_FIELDS: &[&str] = &[TITLE, EXCERPT, SUBTITLE, AUTHOR, CATEGORY];
pub const AUTHOR_FIELDS: &[&str] = &[NAME, TITLE, BIO];
pub const TAG_FIELDS: &[&str] = &[NAME];
pub const CATEGORY_FIELDS: &[&str] = &[NAME, SUBTITLE, DESCRIPTION];
pub const SUBCATEGORY_FIELDS: &[&str] = &[NAME, DESCRIPTION];
