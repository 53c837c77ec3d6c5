//! Summarization stage: one model call per article, in order.

use crate::api::ChatModel;
use crate::error::Result;
use crate::models::{Article, Summary};
use tracing::{info, instrument};

/// Instructions sent as the system block for every article.
pub const SUMMARY_PROMPT: &str = "You are an AI expert who makes complex topics accessible \
to general audiences. Summarize this article in 5 - 10 sentences, focusing on the key points \
and explaining any technical terms simply.";

/// Turns articles into plain-language summaries.
#[derive(Debug)]
pub struct Summarizer<M> {
    model: M,
}

impl<M: ChatModel> Summarizer<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Summarize a single article.
    ///
    /// The model's text is returned verbatim. Sentence count is asked for in
    /// the prompt but not checked.
    #[instrument(level = "info", skip_all, fields(url = %article.url))]
    pub async fn summarize(&self, article: &Article) -> Result<String> {
        let input = format!("Title: {}\n\nContent: {}", article.title, article.content);
        self.model.complete(SUMMARY_PROMPT, &input).await
    }

    /// Summarize every article, one after another, keeping their order.
    ///
    /// The first failure is returned and the summaries gathered so far are
    /// dropped.
    #[instrument(level = "info", skip_all, fields(count = articles.len()))]
    pub async fn summarize_all(&self, articles: &[Article]) -> Result<Vec<Summary>> {
        let mut summaries = Vec::with_capacity(articles.len());
        for (index, article) in articles.iter().enumerate() {
            let summary = self.summarize(article).await?;
            info!(index, title = %article.title, bytes = summary.len(), "Summarized article");
            summaries.push(Summary::for_article(article, summary));
        }
        Ok(summaries)
    }
}
