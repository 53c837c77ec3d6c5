//! The run: search, then summarize, then publish.
//!
//! Each step takes the [`PipelineState`] by value and returns it with one
//! more field filled in. [`Pipeline::run`] is nothing more than the three
//! steps applied in order; an error from any step is returned as is and the
//! remaining steps never run.

use crate::api::ChatModel;
use crate::error::Result;
use crate::models::PipelineState;
use crate::publisher::Publisher;
use crate::sources::{NewsSearcher, SearchProvider};
use crate::summarizer::Summarizer;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Owns the collaborators for one end-to-end run.
#[derive(Debug)]
pub struct Pipeline<P, M> {
    provider: P,
    model: M,
    output_dir: PathBuf,
}

impl<P: SearchProvider, M: ChatModel> Pipeline<P, M> {
    pub fn new(provider: P, model: M, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            model,
            output_dir: output_dir.into(),
        }
    }

    /// Run all three steps from an empty state and return the final state.
    pub async fn run(&self) -> Result<PipelineState> {
        let state = PipelineState::default();
        let state = self.search(state).await?;
        let state = self.summarize(state).await?;
        self.publish(state).await
    }

    /// Fill in `articles`.
    ///
    /// # Panics
    ///
    /// If `state` already has articles.
    #[instrument(level = "info", skip_all)]
    pub async fn search(&self, state: PipelineState) -> Result<PipelineState> {
        let articles = NewsSearcher::new(&self.provider).search().await?;
        info!(articles = articles.len(), "search complete");
        Ok(state.with_articles(articles))
    }

    /// Fill in `summaries`, one per article.
    ///
    /// # Panics
    ///
    /// If `search` has not run on `state`.
    #[instrument(level = "info", skip_all)]
    pub async fn summarize(&self, state: PipelineState) -> Result<PipelineState> {
        let Some(articles) = state.articles() else {
            panic!("summarize step ran before search");
        };
        let summaries = Summarizer::new(&self.model).summarize_all(articles).await?;
        info!(summaries = summaries.len(), "summarize complete");
        Ok(state.with_summaries(summaries))
    }

    /// Fill in `report` and write the report file.
    ///
    /// # Panics
    ///
    /// If `summarize` has not run on `state`.
    #[instrument(level = "info", skip_all)]
    pub async fn publish(&self, state: PipelineState) -> Result<PipelineState> {
        let Some(summaries) = state.summaries() else {
            panic!("publish step ran before summarize");
        };
        let publisher = Publisher::new(&self.model, &self.output_dir);
        let report = publisher.create_report(summaries).await?;
        info!(output_dir = %publisher.output_dir().display(), "publish complete");
        Ok(state.with_report(report))
    }
}
