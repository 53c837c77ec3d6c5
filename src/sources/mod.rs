//! Article source: the week's Generative AI news from a search provider.
//!
//! The search target is fixed. [`NewsSearcher::search`] takes no arguments
//! and always sends the same [`SearchRequest`]; the only thing that varies
//! between runs is what the provider returns.
//!
//! | Provider | Module | Notes |
//! |----------|--------|-------|
//! | Tavily | [`tavily`] | REST search API, bearer auth via `TAVILY_API_KEY` |

pub mod tavily;

use crate::error::Result;
use crate::models::Article;
use serde::Serialize;
use tracing::{debug, info, instrument};

pub const QUERY: &str = "Generative AI and Agentic AI news";
pub const TOPIC: &str = "news";
pub const TIME_PERIOD: &str = "1w";
pub const SEARCH_DEPTH: &str = "advanced";
pub const MAX_RESULTS: usize = 5;

/// Parameters sent to the search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub topic: String,
    pub time_period: String,
    pub search_depth: String,
    pub max_results: usize,
}

impl SearchRequest {
    /// The one request this application ever makes.
    pub fn weekly_news() -> Self {
        Self {
            query: QUERY.to_string(),
            topic: TOPIC.to_string(),
            time_period: TIME_PERIOD.to_string(),
            search_depth: SEARCH_DEPTH.to_string(),
            max_results: MAX_RESULTS,
        }
    }
}

/// A ranked document search service.
///
/// Implementations return results in the provider's ranking order. Any
/// failure (transport, auth, a result missing `title`/`url`/`content`) is an
/// error; there are no partial results.
pub trait SearchProvider {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Article>>;
}

impl<T: SearchProvider> SearchProvider for &T {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Article>> {
        (**self).search(request).await
    }
}

/// Finds candidate articles for the report.
#[derive(Debug)]
pub struct NewsSearcher<P> {
    provider: P,
}

impl<P: SearchProvider> NewsSearcher<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Run the fixed news query.
    ///
    /// Returns at most [`MAX_RESULTS`] articles in provider order, possibly
    /// none.
    #[instrument(level = "info", skip_all)]
    pub async fn search(&self) -> Result<Vec<Article>> {
        let request = SearchRequest::weekly_news();
        let mut articles = self.provider.search(&request).await?;
        articles.truncate(MAX_RESULTS);

        info!(count = articles.len(), query = QUERY, "Found articles");
        debug!(urls = ?articles.iter().map(|a| a.url.as_str()).collect::<Vec<_>>(), "Article URLs");
        Ok(articles)
    }
}
