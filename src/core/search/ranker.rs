//! Five-collection ranker.
//!
//! Each collection is scanned independently by its own scorer; the
//! concatenated results are stable-sorted ascending by score so the best
//! matches of every kind interleave.

use super::fields;
use super::fuzzy::{field_norm, FuzzyMatcher, Pattern, EPSILON};
use crate::core::config::{CollectionTuning, SearchConfig};
use crate::core::types::{ContentSnapshot, SearchItem, SearchResult};
use std::time::Instant;

/// Matcher plus normalised field weights for one collection
#[derive(Debug, Clone)]
struct CollectionScorer {
    matcher: FuzzyMatcher,
    /// (field, weight) in canonical field order, weights sum to 1
    weights: Vec<(&'static str, f64)>,
}

impl CollectionScorer {
    fn new(tuning: &CollectionTuning, known_fields: &[&'static str], distance: usize) -> Self {
        let mut weights: Vec<(&'static str, f64)> = known_fields
            .iter()
            .filter_map(|f| tuning.weights.get(*f).map(|w| (*f, *w)))
            .filter(|(_, w)| w.is_finite() && *w > 0.0)
            .collect();

        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        if total > 0.0 {
            for (_, w) in &mut weights {
                *w /= total;
            }
        }

        Self {
            matcher: FuzzyMatcher::new(tuning.threshold, distance),
            weights,
        }
    }

    /// Weighted product of matched fields, `None` if no field matched
    fn score<'a>(&self, pattern: &Pattern, field: impl Fn(&str) -> Option<&'a str>) -> Option<f64> {
        let mut total = 1.0;
        let mut matched = false;

        for (name, weight) in &self.weights {
            let Some(text) = field(name).filter(|t| !t.trim().is_empty()) else {
                continue;
            };
            if let Some(score) = self.matcher.field_score(pattern, text) {
                matched = true;
                let base = if score == 0.0 { EPSILON } else { score };
                total *= base.powf(weight * field_norm(text));
            }
        }

        matched.then_some(total)
    }

    fn scan<'a, T: Clone>(
        &self,
        pattern: &Pattern,
        records: &'a [T],
        field: impl Fn(&'a T, &str) -> Option<&'a str>,
        wrap: fn(T) -> SearchItem,
        out: &mut Vec<SearchResult>,
    ) {
        for record in records {
            if let Some(score) = self.score(pattern, |name| field(record, name)) {
                out.push(SearchResult {
                    score,
                    item: wrap(record.clone()),
                });
            }
        }
    }
}

/// Multi-entity search ranker
///
/// Pure: the same query and snapshot always produce the same ranking.
#[derive(Debug, Clone)]
pub struct SearchRanker {
    min_query_length: usize,
    max_query_length: usize,
    article: CollectionScorer,
    author: CollectionScorer,
    tag: CollectionScorer,
    category: CollectionScorer,
    subcategory: CollectionScorer,
}

impl SearchRanker {
    pub fn new(config: &SearchConfig) -> Self {
        let d = config.distance;
        Self {
            min_query_length: config.min_query_length,
            max_query_length: config.max_query_length,
            article: CollectionScorer::new(&config.article, fields::ARTICLE_FIELDS, d),
            author: CollectionScorer::new(&config.author, fields::AUTHOR_FIELDS, d),
            tag: CollectionScorer::new(&config.tag, fields::TAG_FIELDS, d),
            category: CollectionScorer::new(&config.category, fields::CATEGORY_FIELDS, d),
            subcategory: CollectionScorer::new(
                &config.subcategory,
                fields::SUBCATEGORY_FIELDS,
                d,
            ),
        }
    }

    pub fn min_query_length(&self) -> usize {
        self.min_query_length
    }

    /// Rank every record of every collection against `query`
    ///
    /// Queries shorter than the minimum length (after trimming) yield an
    /// empty ranking. Queries longer than the maximum are matched on their
    /// leading `max_query_length` chars only.
    pub fn search(&self, query: &str, snapshot: &ContentSnapshot) -> Vec<SearchResult> {
        let query = query.trim();
        if query.chars().count() < self.min_query_length.max(1) {
            return Vec::new();
        }
        let query = match query.char_indices().nth(self.max_query_length) {
            Some((cut, _)) => query[..cut].trim_end(),
            None => query,
        };

        let start = Instant::now();
        let pattern = Pattern::new(query);
        let authors = snapshot.author_index();
        let categories = snapshot.category_index();
        let mut results = Vec::new();

        self.article.scan(
            &pattern,
            &snapshot.articles,
            |article, name| match name {
                fields::TITLE => Some(article.title.as_str()),
                fields::EXCERPT => Some(article.excerpt.as_str()),
                fields::SUBTITLE => article.subtitle.as_deref(),
                fields::AUTHOR => authors
                    .get(article.author_id.as_str())
                    .map(|a| a.name.as_str()),
                fields::CATEGORY => categories
                    .get(article.category_id.as_str())
                    .map(|c| c.name.as_str()),
                _ => None,
            },
            SearchItem::Article,
            &mut results,
        );

        self.author.scan(
            &pattern,
            &snapshot.authors,
            |author, name| match name {
                fields::NAME => Some(author.name.as_str()),
                fields::TITLE => Some(author.title.as_str()),
                fields::BIO => Some(author.bio.as_str()),
                _ => None,
            },
            SearchItem::Author,
            &mut results,
        );

        self.tag.scan(
            &pattern,
            &snapshot.tags,
            |tag, name| (name == fields::NAME).then_some(tag.name.as_str()),
            SearchItem::Tag,
            &mut results,
        );

        self.category.scan(
            &pattern,
            &snapshot.categories,
            |category, name| match name {
                fields::NAME => Some(category.name.as_str()),
                fields::SUBTITLE => Some(category.subtitle.as_str()),
                fields::DESCRIPTION => Some(category.description.as_str()),
                _ => None,
            },
            SearchItem::Category,
            &mut results,
        );

        self.subcategory.scan(
            &pattern,
            &snapshot.subcategories,
            |sub, name| match name {
                fields::NAME => Some(sub.name.as_str()),
                fields::DESCRIPTION => Some(sub.description.as_str()),
                _ => None,
            },
            SearchItem::Subcategory,
            &mut results,
        );

        // Stable: ties keep collection order, then record order
        results.sort_by(|a, b| a.score.total_cmp(&b.score));

        tracing::debug!(
            query = %query,
            count = results.len(),
            duration_us = start.elapsed().as_micros() as u64,
            "Search ranked"
        );

        results
    }
}

impl Default for SearchRanker {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}
