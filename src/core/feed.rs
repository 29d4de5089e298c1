//! RSS 2.0 syndication feeds.
//!
//! One site-wide feed plus one per category, subcategory, author and
//! tag. Items are the scope's articles, newest first.

use crate::core::config::{FeedConfig, SiteConfig};
use crate::core::error::{Result, WealthpressError};
use crate::core::routes;
use crate::core::types::{Article, ContentSnapshot};
use chrono::{DateTime, Utc};
use html_escape::encode_text;
use std::fmt;

/// Media type served for every feed
pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

/// Which articles a feed covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScope {
    All,
    Category(String),
    Subcategory(String),
    Author(String),
    Tag(String),
}

impl FeedScope {
    /// Site-relative path of this feed
    pub fn path(&self) -> String {
        match self {
            FeedScope::All => "/feed.xml".to_string(),
            FeedScope::Category(slug) => format!("/feed/category/{slug}"),
            FeedScope::Subcategory(slug) => format!("/feed/subcategory/{slug}"),
            FeedScope::Author(slug) => format!("/feed/author/{slug}"),
            FeedScope::Tag(slug) => format!("/feed/tag/{slug}"),
        }
    }
}

impl fmt::Display for FeedScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedScope::All => write!(f, "all"),
            FeedScope::Category(slug) => write!(f, "category '{slug}'"),
            FeedScope::Subcategory(slug) => write!(f, "subcategory '{slug}'"),
            FeedScope::Author(slug) => write!(f, "author '{slug}'"),
            FeedScope::Tag(slug) => write!(f, "tag '{slug}'"),
        }
    }
}

/// Channel-level metadata resolved for a scope
struct Channel<'a> {
    title: String,
    description: String,
    link: String,
    items: Vec<&'a Article>,
}

#[derive(Debug, Clone)]
pub struct FeedGenerator {
    site: SiteConfig,
    config: FeedConfig,
}

impl FeedGenerator {
    pub fn new(site: &SiteConfig, config: &FeedConfig) -> Self {
        let mut site = site.clone();
        site.base_url = site.base_url.trim_end_matches('/').to_string();
        Self {
            site,
            config: config.clone(),
        }
    }

    /// `Cache-Control` value for feed responses
    pub fn cache_control(&self) -> String {
        format!(
            "public, max-age={}, stale-while-revalidate={}",
            self.config.cache_max_age_sec, self.config.stale_while_revalidate_sec
        )
    }

    fn url(&self, path: &str) -> String {
        routes::absolute(&self.site.base_url, path)
    }

    fn titled(&self, name: &str) -> String {
        format!("{} - {}", self.site.title, name)
    }

    fn channel<'a>(&self, snapshot: &'a ContentSnapshot, scope: &FeedScope) -> Result<Channel<'a>> {
        let not_found = || WealthpressError::NotFound(format!("No feed for {scope}"));
        let select = |pred: &dyn Fn(&Article) -> bool| -> Vec<&'a Article> {
            snapshot.articles.iter().filter(|a| pred(a)).collect()
        };

        let channel = match scope {
            FeedScope::All => Channel {
                title: self.site.title.clone(),
                description: self.site.description.clone(),
                link: self.url("/"),
                items: snapshot.articles.iter().collect(),
            },
            FeedScope::Category(slug) => {
                let category = snapshot.category_by_slug(slug).ok_or_else(not_found)?;
                Channel {
                    title: self.titled(&category.name),
                    description: category.description.clone(),
                    link: self.url(&routes::category(category)),
                    items: select(&|a| a.category_id == category.id),
                }
            }
            FeedScope::Subcategory(slug) => {
                let sub = snapshot.subcategory_by_slug(slug).ok_or_else(not_found)?;
                let link = match snapshot.category(&sub.category_id) {
                    Some(category) => self.url(&routes::subcategory(category, sub)),
                    None => self.url("/"),
                };
                Channel {
                    title: self.titled(&sub.name),
                    description: sub.description.clone(),
                    link,
                    items: select(&|a| a.subcategory_id.as_deref() == Some(sub.id.as_str())),
                }
            }
            FeedScope::Author(slug) => {
                let author = snapshot.author_by_slug(slug).ok_or_else(not_found)?;
                Channel {
                    title: self.titled(&author.name),
                    description: author.bio.clone(),
                    link: self.url(&routes::author(author)),
                    items: select(&|a| a.author_id == author.id),
                }
            }
            FeedScope::Tag(slug) => {
                let tag = snapshot.tag_by_slug(slug).ok_or_else(not_found)?;
                Channel {
                    title: self.titled(&tag.name),
                    description: format!("Articles tagged {}", tag.name),
                    link: self.url(&routes::tag(tag)),
                    items: select(&|a| a.tag_ids.iter().any(|id| *id == tag.id)),
                }
            }
        };

        Ok(channel)
    }

    /// Render the RSS document for `scope`
    ///
    /// Unknown slugs yield `NotFound`. A known scope with no articles
    /// renders an empty channel.
    pub fn render(&self, snapshot: &ContentSnapshot, scope: &FeedScope) -> Result<String> {
        let mut channel = self.channel(snapshot, scope)?;

        // Newest first; stable so same-second articles keep snapshot order
        channel.items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        channel.items.truncate(self.config.max_items);

        let last_build: Option<DateTime<Utc>> =
            channel.items.iter().map(|a| a.last_modified()).max();

        let mut xml = String::with_capacity(1024 + channel.items.len() * 512);
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(
            "<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\" \
             xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\n",
        );
        xml.push_str("  <channel>\n");
        xml.push_str(&format!("    <title>{}</title>\n", encode_text(&channel.title)));
        xml.push_str(&format!("    <link>{}</link>\n", encode_text(&channel.link)));
        xml.push_str(&format!(
            "    <description>{}</description>\n",
            encode_text(&channel.description)
        ));
        xml.push_str(&format!(
            "    <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>\n",
            html_escape::encode_double_quoted_attribute(&self.url(&scope.path()))
        ));
        xml.push_str(&format!(
            "    <language>{}</language>\n",
            encode_text(&self.site.language)
        ));
        if let Some(at) = last_build {
            xml.push_str(&format!(
                "    <lastBuildDate>{}</lastBuildDate>\n",
                at.to_rfc2822()
            ));
        }

        for article in &channel.items {
            self.render_item(&mut xml, snapshot, article);
        }

        xml.push_str("  </channel>\n");
        xml.push_str("</rss>\n");
        Ok(xml)
    }

    fn render_item(&self, xml: &mut String, snapshot: &ContentSnapshot, article: &Article) {
        let link = self.url(&routes::article(article));

        xml.push_str("    <item>\n");
        xml.push_str(&format!("      <title>{}</title>\n", encode_text(&article.title)));
        xml.push_str(&format!("      <link>{}</link>\n", encode_text(&link)));
        xml.push_str(&format!(
            "      <guid isPermaLink=\"true\">{}</guid>\n",
            encode_text(&link)
        ));
        xml.push_str(&format!(
            "      <description>{}</description>\n",
            encode_text(&article.excerpt)
        ));
        xml.push_str(&format!(
            "      <pubDate>{}</pubDate>\n",
            article.published_at.to_rfc2822()
        ));
        if let Some(author) = snapshot.author(&article.author_id) {
            xml.push_str(&format!(
                "      <dc:creator>{}</dc:creator>\n",
                encode_text(&author.name)
            ));
        }

        let category = snapshot.category(&article.category_id).map(|c| c.name.as_str());
        let subcategory = article
            .subcategory_id
            .as_deref()
            .and_then(|id| snapshot.subcategory(id))
            .map(|s| s.name.as_str());
        let tags = article
            .tag_ids
            .iter()
            .filter_map(|id| snapshot.tag(id))
            .map(|t| t.name.as_str());

        for name in category.into_iter().chain(subcategory).chain(tags) {
            xml.push_str(&format!("      <category>{}</category>\n", encode_text(name)));
        }

        xml.push_str("    </item>\n");
    }
}
