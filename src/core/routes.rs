//! Public site paths for each entity kind.

use crate::core::types::{Article, Author, Category, Subcategory, Tag};

pub fn article(article: &Article) -> String {
    format!("/articles/{}", article.slug)
}

pub fn author(author: &Author) -> String {
    format!("/authors/{}", author.slug)
}

pub fn category(category: &Category) -> String {
    format!("/categories/{}", category.slug)
}

/// Subcategory pages nest under their parent category
pub fn subcategory(category: &Category, subcategory: &Subcategory) -> String {
    format!("/categories/{}/{}", category.slug, subcategory.slug)
}

pub fn tag(tag: &Tag) -> String {
    format!("/tags/{}", tag.slug)
}

/// Join a site-relative path onto the site origin
pub fn absolute(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.is_empty() || path == "/" {
        format!("{base}/")
    } else if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
