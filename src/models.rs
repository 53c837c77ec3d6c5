//! Data models threaded through the pipeline.
//!
//! - [`Article`]: a news item as returned by the search provider
//! - [`Summary`]: the model's condensed rendering of one article
//! - [`PipelineState`]: the record each stage extends with its own output

use serde::{Deserialize, Serialize};

/// A single news item found by the search provider.
///
/// Articles carry no identity beyond their URL, and even that is not
/// enforced unique.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    /// Headline as reported by the provider.
    pub title: String,
    /// Source URL of the article.
    pub url: String,
    /// Article body (or the provider's extract of it).
    pub content: String,
}

/// A model-written summary of one [`Article`].
///
/// `title` and `url` are copied from the article it was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Summary {
    pub title: String,
    pub summary: String,
    pub url: String,
}

impl Summary {
    /// Pair a generated summary with the article it describes.
    pub fn for_article(article: &Article, summary: String) -> Self {
        Self {
            title: article.title.clone(),
            summary,
            url: article.url.clone(),
        }
    }
}

/// State carried from one pipeline stage to the next.
///
/// A run starts from [`PipelineState::default`] (everything absent). Each
/// stage consumes the state and hands back a new one with exactly one more
/// field set, so a field is written once and only by its own stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineState {
    articles: Option<Vec<Article>>,
    summaries: Option<Vec<Summary>>,
    report: Option<String>,
}

impl PipelineState {
    pub fn articles(&self) -> Option<&[Article]> {
        self.articles.as_deref()
    }

    pub fn summaries(&self) -> Option<&[Summary]> {
        self.summaries.as_deref()
    }

    pub fn report(&self) -> Option<&str> {
        self.report.as_deref()
    }

    /// True once all three stages have written their field.
    pub fn is_complete(&self) -> bool {
        self.articles.is_some() && self.summaries.is_some() && self.report.is_some()
    }

    /// State after the search stage.
    ///
    /// # Panics
    ///
    /// If articles were already set.
    pub fn with_articles(self, articles: Vec<Article>) -> Self {
        assert!(self.articles.is_none(), "articles written twice");
        Self {
            articles: Some(articles),
            ..self
        }
    }

    /// State after the summarize stage.
    ///
    /// # Panics
    ///
    /// If summaries were already set, if the search stage has not run, or if
    /// the summaries do not line up one-to-one with the articles.
    pub fn with_summaries(self, summaries: Vec<Summary>) -> Self {
        assert!(self.summaries.is_none(), "summaries written twice");
        let articles = self
            .articles
            .as_deref()
            .unwrap_or_else(|| panic!("summaries written before articles"));
        assert_eq!(
            summaries.len(),
            articles.len(),
            "one summary per article"
        );
        debug_assert!(
            summaries.iter().zip(articles).all(|(s, a)| s.url == a.url),
            "summaries out of article order"
        );
        Self {
            summaries: Some(summaries),
            ..self
        }
    }

    /// State after the publish stage.
    ///
    /// # Panics
    ///
    /// If the report was already set or the summarize stage has not run.
    pub fn with_report(self, report: String) -> Self {
        assert!(self.report.is_none(), "report written twice");
        assert!(
            self.summaries.is_some(),
            "report written before summaries"
        );
        Self {
            report: Some(report),
            ..self
        }
    }
}
