//! Report stage: compile the summaries into a dated Markdown report.
//!
//! The stage does three things in order:
//! 1. Formats the summaries into one plain-text block ([`format_summaries`])
//! 2. Asks the model to turn that block into a readable report
//! 3. Writes `Generated on: <date>` plus the report to
//!    `ai_news_report_<date>.md`
//!
//! # Output
//!
//! ```text
//! output_dir/
//! └── ai_news_report_2025-10-18.md
//! ```
//!
//! A second run on the same day overwrites the file. The report body is
//! whatever the model wrote; nothing checks that every summary made it in.

use crate::api::ChatModel;
use crate::error::Result;
use crate::models::Summary;
use crate::utils::today;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Instructions sent as the system block of the report call.
pub const REPORT_PROMPT: &str = "Create a weekly Generative AI news report for the general public.
Format it with:
1. A brief introduction
2. The main news items with their summaries
3. Links for further reading

Make it engaging and accessible to non-technical readers.";

/// Directory reports are written to unless configured otherwise.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Render summaries as the block handed to the model.
///
/// Each summary becomes `Title: ..\nSummary: ..\nSource: ..`; summaries are
/// separated by a blank line and keep their input order. No summaries gives
/// an empty string.
pub fn format_summaries(summaries: &[Summary]) -> String {
    summaries
        .iter()
        .map(|item| {
            format!(
                "Title: {}\nSummary: {}\nSource: {}",
                item.title, item.summary, item.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// File name of the report for `date`, e.g. `ai_news_report_2025-10-18.md`.
pub fn report_filename(date: NaiveDate) -> String {
    format!("ai_news_report_{}.md", date.format("%Y-%m-%d"))
}

/// Full file contents: the date header, a blank line, then the report.
pub fn render_document(date: NaiveDate, report: &str) -> String {
    format!("Generated on: {}\n\n{}\n", date.format("%Y-%m-%d"), report)
}

/// Compiles summaries into the final report and saves it.
#[derive(Debug)]
pub struct Publisher<M> {
    model: M,
    output_dir: PathBuf,
}

impl<M: ChatModel> Publisher<M> {
    pub fn new(model: M, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            model,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where the report for `date` is written.
    pub fn report_path(&self, date: NaiveDate) -> PathBuf {
        self.output_dir.join(report_filename(date))
    }

    /// Create and save today's report.
    ///
    /// Returns the model's report without the `Generated on` header; the
    /// header only goes into the file.
    pub async fn create_report(&self, summaries: &[Summary]) -> Result<String> {
        self.create_report_on(summaries, today()).await
    }

    /// Create and save the report stamped with `date`.
    ///
    /// The date is used for both the header and the file name, so the two
    /// always agree.
    #[instrument(level = "info", skip_all, fields(count = summaries.len(), %date))]
    pub async fn create_report_on(&self, summaries: &[Summary], date: NaiveDate) -> Result<String> {
        let summaries_text = format_summaries(summaries);
        let report = self.model.complete(REPORT_PROMPT, &summaries_text).await?;

        let path = self.report_path(date);
        fs::write(&path, render_document(date, &report)).await?;
        info!(path = %path.display(), bytes = report.len(), "Wrote report");

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Replies with a fixed report and keeps the last input it was given.
    struct FixedReport {
        reply: String,
        last_input: RefCell<Option<(String, String)>>,
    }

    impl FixedReport {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                last_input: RefCell::new(None),
            }
        }
    }

    impl ChatModel for FixedReport {
        async fn complete(&self, instructions: &str, input: &str) -> Result<String> {
            *self.last_input.borrow_mut() = Some((instructions.to_string(), input.to_string()));
            Ok(self.reply.clone())
        }
    }

    struct Unavailable;

    impl ChatModel for Unavailable {
        async fn complete(&self, _: &str, _: &str) -> Result<String> {
            Err(Error::MissingCredential("OPENROUTER_API_KEY"))
        }
    }

    fn summary(title: &str, summary: &str, url: &str) -> Summary {
        Summary {
            title: title.to_string(),
            summary: summary.to_string(),
            url: url.to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_summaries_two_items() {
        let summaries = [
            summary("A", "S1", "http://x"),
            summary("B", "S2", "http://y"),
        ];
        assert_eq!(
            format_summaries(&summaries),
            "Title: A\nSummary: S1\nSource: http://x\n\nTitle: B\nSummary: S2\nSource: http://y"
        );
    }

    #[test]
    fn test_format_summaries_single_item_has_no_separator() {
        assert_eq!(
            format_summaries(&[summary("A", "S1", "http://x")]),
            "Title: A\nSummary: S1\nSource: http://x"
        );
    }

    #[test]
    fn test_format_summaries_empty() {
        assert_eq!(format_summaries(&[]), "");
    }

    #[test]
    fn test_format_summaries_is_deterministic() {
        let summaries = vec![
            summary("Chips", "Faster inference.", "https://a.example"),
            summary("Agents", "Tools calling tools.", "https://b.example"),
        ];
        assert_eq!(format_summaries(&summaries), format_summaries(&summaries));
    }

    #[test]
    fn test_report_filename() {
        assert_eq!(report_filename(date(2025, 3, 7)), "ai_news_report_2025-03-07.md");
    }

    #[test]
    fn test_render_document_header() {
        assert_eq!(
            render_document(date(2025, 10, 18), "Body"),
            "Generated on: 2025-10-18\n\nBody\n"
        );
    }

    #[tokio::test]
    async fn test_create_report_sends_prompt_and_formatted_block() {
        let dir = TempDir::new().unwrap();
        let model = FixedReport::new("Weekly report");
        let publisher = Publisher::new(&model, dir.path());
        let summaries = [
            summary("A", "S1", "http://x"),
            summary("B", "S2", "http://y"),
        ];

        publisher
            .create_report_on(&summaries, date(2025, 10, 18))
            .await
            .unwrap();

        let (instructions, input) = model.last_input.borrow().clone().unwrap();
        assert_eq!(instructions, REPORT_PROMPT);
        assert_eq!(input, format_summaries(&summaries));
    }

    #[tokio::test]
    async fn test_create_report_returns_body_and_writes_dated_file() {
        let dir = TempDir::new().unwrap();
        let publisher = Publisher::new(FixedReport::new("# This week in AI"), dir.path());
        let day = date(2025, 10, 18);

        let report = publisher
            .create_report_on(&[summary("A", "S1", "http://x")], day)
            .await
            .unwrap();

        assert_eq!(report, "# This week in AI");
        assert!(!report.starts_with("Generated on"));

        let path = dir.path().join("ai_news_report_2025-10-18.md");
        assert_eq!(publisher.report_path(day), path);
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Generated on: 2025-10-18\n\n# This week in AI\n");
    }

    #[tokio::test]
    async fn test_create_report_uses_todays_date() {
        let dir = TempDir::new().unwrap();
        let publisher = Publisher::new(FixedReport::new("today"), dir.path());

        let before = today();
        publisher.create_report(&[]).await.unwrap();
        let after = today();

        // Tolerate the run straddling midnight.
        let found = [before, after]
            .into_iter()
            .map(|d| publisher.report_path(d))
            .find(|p| p.exists())
            .unwrap();
        let written = std::fs::read_to_string(found).unwrap();
        let header_ok = [before, after]
            .iter()
            .any(|d| written.starts_with(&format!("Generated on: {}\n\n", d.format("%Y-%m-%d"))));
        assert!(header_ok);
    }

    #[tokio::test]
    async fn test_create_report_with_no_summaries() {
        let dir = TempDir::new().unwrap();
        let model = FixedReport::new("Quiet week.");
        let publisher = Publisher::new(&model, dir.path());

        let report = publisher
            .create_report_on(&[], date(2025, 1, 1))
            .await
            .unwrap();

        assert_eq!(report, "Quiet week.");
        let (_, input) = model.last_input.borrow().clone().unwrap();
        assert_eq!(input, "");
        assert!(dir.path().join("ai_news_report_2025-01-01.md").exists());
    }

    #[tokio::test]
    async fn test_same_day_rerun_overwrites() {
        let dir = TempDir::new().unwrap();
        let day = date(2025, 6, 2);

        Publisher::new(FixedReport::new("first run"), dir.path())
            .create_report_on(&[], day)
            .await
            .unwrap();
        Publisher::new(FixedReport::new("second run"), dir.path())
            .create_report_on(&[], day)
            .await
            .unwrap();

        let written = std::fs::read_to_string(dir.path().join(report_filename(day))).unwrap();
        assert_eq!(written, "Generated on: 2025-06-02\n\nsecond run\n");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_model_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let publisher = Publisher::new(Unavailable, dir.path());

        let err = publisher
            .create_report_on(&[summary("A", "S1", "http://x")], date(2025, 1, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MissingCredential(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_unwritable_output_dir_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does").join("not").join("exist");
        let publisher = Publisher::new(FixedReport::new("report"), missing);

        let err = publisher
            .create_report_on(&[], date(2025, 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
