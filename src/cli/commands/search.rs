//! Search command - fuzzy search across all content

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::routes;
use crate::core::search::GroupedResults;
use crate::core::services::Services;
use crate::core::types::{ContentCounts, ContentSnapshot, EntityKind, SearchItem, SearchResult};
use clap::Args;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query (typos tolerated)
    pub query: String,

    /// Maximum number of results in flat mode
    #[arg(long, short = 'k', default_value = "10")]
    pub limit: usize,

    /// Group by kind with dropdown caps
    #[arg(long, short = 'g')]
    pub grouped: bool,
}

/// Search result item
#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub rank: usize,
    pub kind: EntityKind,
    pub label: String,
    pub path: String,
    pub score: f64,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchResponseOutput {
    pub query: String,
    pub total_results: usize,
    pub results: Vec<SearchResultItem>,
}

/// Site path for a matched item
///
/// Subcategories fall back to a bare slug when their parent is missing.
fn item_path(item: &SearchItem, snapshot: &ContentSnapshot) -> String {
    match item {
        SearchItem::Article(a) => routes::article(a),
        SearchItem::Author(a) => routes::author(a),
        SearchItem::Tag(t) => routes::tag(t),
        SearchItem::Category(c) => routes::category(c),
        SearchItem::Subcategory(s) => match snapshot.category(&s.category_id) {
            Some(category) => routes::subcategory(category, s),
            None => s.slug.clone(),
        },
    }
}

fn to_items(results: &[SearchResult], snapshot: &ContentSnapshot) -> Vec<SearchResultItem> {
    results
        .iter()
        .enumerate()
        .map(|(i, r)| SearchResultItem {
            rank: i + 1,
            kind: r.kind(),
            label: r.item.label().to_string(),
            path: item_path(&r.item, snapshot),
            score: r.score,
        })
        .collect()
}

fn print_item(item: &SearchResultItem) {
    println!(
        "[{}] {} {} {}",
        colors::rank(&item.rank.to_string()),
        colors::kind(&format!("{:<11}", item.kind.as_str())),
        colors::label(&output::truncate(&item.label, 70)),
        colors::score(&format!("(score: {:.3})", item.score))
    );
    println!("    {}", colors::url(&item.path));
}

/// Execute the search command
pub async fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = super::load_content(services).await?;

    let start = Instant::now();
    let results = services.ranker.search(&args.query, &snapshot);
    let elapsed = start.elapsed();

    if results.is_empty() && args.query.trim().chars().count() < services.ranker.min_query_length()
    {
        output::print_warning(&format!(
            "Query must be at least {} characters",
            services.ranker.min_query_length()
        ));
    }

    if args.grouped {
        let grouped = GroupedResults::from_results(results);
        let totals = grouped.counts();
        let grouped = grouped.capped(&services.config.search.dropdown);

        match format {
            OutputFormat::Human => {
                for kind in EntityKind::ALL {
                    let group = grouped.group(kind);
                    if group.is_empty() {
                        continue;
                    }
                    let total = totals.get(kind);
                    output::print_header(&format!(
                        "{} ({} of {})",
                        output::group_heading(kind),
                        group.len(),
                        total
                    ));
                    for item in to_items(group, &snapshot) {
                        print_item(&item);
                    }
                    println!();
                }
                if grouped.is_empty() {
                    println!("No results found for '{}'", colors::label(&args.query));
                }
            }
            OutputFormat::Json => {
                #[derive(Serialize)]
                struct GroupedOutput<'a> {
                    query: &'a str,
                    groups: &'a GroupedResults,
                    totals: ContentCounts,
                }
                let out = GroupedOutput {
                    query: &args.query,
                    groups: &grouped,
                    totals,
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
        }
        return Ok(());
    }

    let total_results = results.len();
    let limit = args.limit.max(1);
    let output = SearchResponseOutput {
        query: args.query.clone(),
        total_results,
        results: to_items(&results[..total_results.min(limit)], &snapshot),
    };

    match format {
        OutputFormat::Human => {
            if output.results.is_empty() {
                println!("No results found for '{}'", colors::label(&args.query));
            } else {
                println!(
                    "Found {} result(s) in {}:\n",
                    colors::number(&output.total_results.to_string()),
                    colors::number(&output::format_elapsed(elapsed))
                );
                for item in &output.results {
                    print_item(item);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
