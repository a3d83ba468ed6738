//! Application state: current view, current analysis, and the submission flow

mod view;

pub use view::View;

use crate::analysis::{AnalysisResult, Analyzer};
use crate::error::{Result, ReviewIqError};
use crate::history::{HistoryLog, HistoryRecord};
use crate::reviews::{BusinessCategory, InputFormat, Review, ReviewParser};
use tracing::{debug, error, info, warn};

/// What the user filled in before pressing "analyze"
#[derive(Debug, Clone)]
pub struct SubmissionForm {
    pub review_text: String,
    pub business_name: String,
    pub category: BusinessCategory,
    pub format: InputFormat,
}

impl SubmissionForm {
    pub fn new(review_text: impl Into<String>, business_name: impl Into<String>) -> Self {
        Self {
            review_text: review_text.into(),
            business_name: business_name.into(),
            category: BusinessCategory::default(),
            format: InputFormat::Text,
        }
    }

    pub fn with_category(mut self, category: BusinessCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_format(mut self, format: InputFormat) -> Self {
        self.format = format;
        self
    }

    /// Both review text and business name are present
    pub fn has_required_fields(&self) -> bool {
        !self.review_text.trim().is_empty() && !self.business_name.trim().is_empty()
    }
}

/// The analysis currently shown by the dashboard, review, and action views
#[derive(Debug, Clone)]
pub struct CurrentAnalysis {
    pub business_name: String,
    /// Empty when loaded from history, which keeps no review text
    pub reviews: Vec<Review>,
    pub result: AnalysisResult,
}

impl CurrentAnalysis {
    pub fn review_count(&self) -> usize {
        if self.reviews.is_empty() {
            self.result.individual_analysis.len()
        } else {
            self.reviews.len()
        }
    }
}

/// Result of pressing "analyze"
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Input rejected locally, nothing was sent
    Rejected(String),
    /// Analysis stored and shown
    Completed(HistoryRecord),
}

pub struct App {
    history: HistoryLog,
    parser: ReviewParser,
    view: View,
    current: Option<CurrentAnalysis>,
    busy: bool,
}

impl App {
    pub fn new(history: HistoryLog, parser: ReviewParser) -> Self {
        Self {
            history,
            parser,
            view: View::Upload,
            current: None,
            busy: false,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn current(&self) -> Option<&CurrentAnalysis> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether the submit control is enabled for this form
    pub fn can_submit(&self, form: &SubmissionForm) -> bool {
        !self.busy && form.has_required_fields()
    }

    /// Whether `view` can be entered right now
    pub fn can_navigate(&self, view: View) -> bool {
        !view.requires_analysis() || self.current.is_some()
    }

    pub fn navigate(&mut self, view: View) -> Result<()> {
        if !self.can_navigate(view) {
            return Err(ReviewIqError::ViewUnavailable(view));
        }
        debug!("View {} -> {}", self.view, view);
        self.view = view;
        Ok(())
    }

    /// Run one analysis for the form.
    ///
    /// On failure nothing is stored, the view is left as it was before the
    /// submission, and the error is returned once for the caller to report.
    pub async fn submit(
        &mut self,
        analyzer: &Analyzer,
        form: &SubmissionForm,
    ) -> Result<SubmitOutcome> {
        if !self.can_submit(form) {
            return Ok(SubmitOutcome::Rejected(
                "review text and business name are required".to_string(),
            ));
        }

        let reviews = self.parser.parse(&form.review_text, form.format);
        if reviews.is_empty() {
            warn!("No usable reviews in submission");
            return Ok(SubmitOutcome::Rejected(
                "no usable reviews found in the input".to_string(),
            ));
        }

        let business_name = form.business_name.trim().to_string();
        let previous_view = self.view;

        self.busy = true;
        let outcome = analyzer
            .analyze(&reviews, &business_name, &form.category)
            .await;
        self.busy = false;

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                error!("Submission for '{}' failed: {}", business_name, e);
                self.view = previous_view;
                return Err(e);
            }
        };

        let record = match self.history.record(&business_name, reviews.len(), &result) {
            Ok(record) => record,
            Err(e) => {
                self.view = previous_view;
                return Err(e);
            }
        };

        self.current = Some(CurrentAnalysis {
            business_name,
            reviews,
            result,
        });
        self.view = View::Dashboard;
        info!("Analysis {} ready", record.id);

        Ok(SubmitOutcome::Completed(record))
    }

    /// Show a past analysis. Review text is not kept in history.
    pub fn open_history(&mut self, id: &str) -> Result<()> {
        let record = self.history.find(id)?;
        self.current = Some(CurrentAnalysis {
            business_name: record.business_name,
            reviews: Vec::new(),
            result: record.result,
        });
        self.view = View::Dashboard;
        Ok(())
    }
}
