//! sitemaps.org `urlset` generation.
//!
//! Static pages come first in configured order, followed by articles,
//! categories, subcategories, authors and tags in snapshot order.

use crate::core::config::{SiteConfig, SitemapConfig, StaticPage};
use crate::core::routes;
use crate::core::types::{Article, ContentSnapshot};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// How often a page is expected to change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<url>` element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapEntry {
    /// Absolute URL
    pub loc: String,
    pub lastmod: Option<NaiveDate>,
    pub changefreq: Option<ChangeFrequency>,
    pub priority: Option<f32>,
}

impl SitemapEntry {
    fn new(loc: String, changefreq: ChangeFrequency, priority: f32) -> Self {
        Self {
            loc,
            lastmod: None,
            changefreq: Some(changefreq),
            priority: Some(priority),
        }
    }

    fn lastmod(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.lastmod = at.map(|dt| dt.date_naive());
        self
    }
}

#[derive(Debug, Clone)]
pub struct SitemapGenerator {
    base_url: String,
    static_pages: Vec<StaticPage>,
}

impl SitemapGenerator {
    pub fn new(site: &SiteConfig, sitemap: &SitemapConfig) -> Self {
        Self {
            base_url: site.base_url.trim_end_matches('/').to_string(),
            static_pages: sitemap.static_pages.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        routes::absolute(&self.base_url, path)
    }

    /// Every URL the site exposes, in output order
    pub fn entries(&self, snapshot: &ContentSnapshot) -> Vec<SitemapEntry> {
        let mut entries = Vec::with_capacity(self.static_pages.len() + snapshot.total_records());

        for page in &self.static_pages {
            entries.push(SitemapEntry {
                loc: self.url(&page.path),
                lastmod: None,
                changefreq: page.changefreq,
                priority: page.priority,
            });
        }

        for article in &snapshot.articles {
            entries.push(
                SitemapEntry::new(self.url(&routes::article(article)), ChangeFrequency::Weekly, 0.8)
                    .lastmod(Some(article.last_modified())),
            );
        }

        let newest_by_category = newest_by(&snapshot.articles, |a| Some(a.category_id.as_str()));
        for category in &snapshot.categories {
            entries.push(
                SitemapEntry::new(
                    self.url(&routes::category(category)),
                    ChangeFrequency::Daily,
                    0.7,
                )
                .lastmod(newest_by_category.get(category.id.as_str()).copied()),
            );
        }

        for sub in &snapshot.subcategories {
            // Without its parent there is no addressable page
            let Some(category) = snapshot.category(&sub.category_id) else {
                continue;
            };
            entries.push(SitemapEntry::new(
                self.url(&routes::subcategory(category, sub)),
                ChangeFrequency::Weekly,
                0.6,
            ));
        }

        let newest_by_author = newest_by(&snapshot.articles, |a| Some(a.author_id.as_str()));
        for author in &snapshot.authors {
            entries.push(
                SitemapEntry::new(
                    self.url(&routes::author(author)),
                    ChangeFrequency::Monthly,
                    0.5,
                )
                .lastmod(newest_by_author.get(author.id.as_str()).copied()),
            );
        }

        for tag in &snapshot.tags {
            entries.push(SitemapEntry::new(
                self.url(&routes::tag(tag)),
                ChangeFrequency::Weekly,
                0.4,
            ));
        }

        entries
    }

    /// Render the `urlset` document
    pub fn render(&self, snapshot: &ContentSnapshot) -> String {
        let entries = self.entries(snapshot);
        let mut xml = String::with_capacity(128 + entries.len() * 160);
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

        for entry in &entries {
            xml.push_str("  <url>\n");
            xml.push_str(&format!(
                "    <loc>{}</loc>\n",
                html_escape::encode_text(&entry.loc)
            ));
            if let Some(date) = entry.lastmod {
                xml.push_str(&format!("    <lastmod>{}</lastmod>\n", date.format("%Y-%m-%d")));
            }
            if let Some(freq) = entry.changefreq {
                xml.push_str(&format!("    <changefreq>{freq}</changefreq>\n"));
            }
            if let Some(priority) = entry.priority {
                xml.push_str(&format!("    <priority>{priority:.1}</priority>\n"));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Newest article timestamp per owning entity id
fn newest_by<'a>(
    articles: &'a [Article],
    key: impl Fn(&'a Article) -> Option<&'a str>,
) -> HashMap<&'a str, DateTime<Utc>> {
    let mut newest: HashMap<&str, DateTime<Utc>> = HashMap::new();
    for article in articles {
        let Some(id) = key(article) else { continue };
        let at = article.last_modified();
        newest
            .entry(id)
            .and_modify(|t| {
                if at > *t {
                    *t = at;
                }
            })
            .or_insert(at);
    }
    newest
}
