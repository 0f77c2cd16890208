//! Text rendering of search results.

use super::types::SearchItem;

const NOT_AVAILABLE: &str = "Not Available";

/// Results returned for a single query.
#[derive(Debug, Clone)]
pub struct QueryResults {
    pub query: String,
    pub items: Vec<SearchItem>,
}

/// Render every query's web results as one block, numbered continuously
/// across queries so a caller can cite a result by number.
pub fn format_search_results(results: &[QueryResults]) -> String {
    let mut next_number = 1usize;
    let mut blocks = Vec::with_capacity(results.len());

    for result in results {
        let mut entries = Vec::new();
        for item in result.items.iter().filter(|item| item.is_web_result()) {
            entries.push(format!(
                "{number}: {title}\n{url}\nPublished Date: {published}\n{snippet}",
                number = next_number,
                title = item.title.as_deref().unwrap_or_default(),
                url = item.url.as_deref().unwrap_or_default(),
                published = item.published.as_deref().unwrap_or(NOT_AVAILABLE),
                snippet = item.snippet.as_deref().unwrap_or_default(),
            ));
            next_number += 1;
        }
        blocks.push(format!(
            "-----\nResults for search query \"{query}\":\n-----\n{entries}",
            query = result.query,
            entries = entries.join("\n\n"),
        ));
    }

    blocks.join("\n\n")
}
