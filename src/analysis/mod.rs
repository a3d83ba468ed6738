//! Review analysis via a hosted generative model
//!
//! One submission produces one request. The reply is parsed as an
//! [`AnalysisResult`] and its `individualAnalysis` indices are checked against
//! the submitted batch before anything is handed back to the caller.

pub mod client;
pub mod model;
pub mod prompt;

pub use client::{GeminiClient, ModelClient};
pub use model::{
    ActionSuggestions, AnalysisResult, EmotionShare, IndividualAnalysis, OverallSentiment,
    Sentiment, Theme, TopKeywords,
};
pub use prompt::AnalysisRequest;

use crate::config::LlmConfig;
use crate::error::{AnalysisFailure, Result, ReviewIqError};
use crate::reviews::{BusinessCategory, Review};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Runs analysis calls with the configured retry policy
pub struct Analyzer {
    client: Arc<dyn ModelClient>,
    temperature: f32,
    max_retries: u32,
    retry_backoff: Duration,
}

impl Analyzer {
    pub fn new(client: Arc<dyn ModelClient>, config: &LlmConfig) -> Self {
        Self {
            client,
            temperature: config.temperature,
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    /// Analyze a batch of reviews.
    ///
    /// Input is checked before dispatch; an empty batch or business name never
    /// reaches the model. Any failure after dispatch is returned as a single
    /// [`ReviewIqError::Analysis`].
    pub async fn analyze(
        &self,
        reviews: &[Review],
        business_name: &str,
        category: &BusinessCategory,
    ) -> Result<AnalysisResult> {
        validate_input(reviews, business_name)?;

        let request = AnalysisRequest::build(reviews, business_name, category, self.temperature);

        info!(
            "Analyzing {} reviews for '{}' ({})",
            reviews.len(),
            business_name,
            category
        );

        let text = self.generate_with_retry(&request).await?;
        let result = parse_response(&text, reviews.len())?;

        info!(
            "Analysis complete: {} (score {}), {} themes",
            result.overall_sentiment,
            result.sentiment_score,
            result.themes.len()
        );

        Ok(result)
    }

    async fn generate_with_retry(
        &self,
        request: &AnalysisRequest,
    ) -> std::result::Result<String, AnalysisFailure> {
        let attempts = self.max_retries + 1;
        let mut delay = self.retry_backoff;
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.client.generate(request).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < attempts => {
                    warn!(
                        "Model call failed (attempt {}/{}): {}. Retrying in {:?}...",
                        attempt, attempts, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    debug!("Giving up after {} attempt(s)", attempt);
                    return Err(e);
                }
            }
        }
    }
}

/// Reject input that must never be sent to the model
pub fn validate_input(reviews: &[Review], business_name: &str) -> Result<()> {
    if business_name.trim().is_empty() {
        return Err(ReviewIqError::InvalidInput(
            "business name cannot be empty".to_string(),
        ));
    }
    if reviews.is_empty() {
        return Err(ReviewIqError::InvalidInput(
            "at least one review is required".to_string(),
        ));
    }
    if let Some(pos) = reviews.iter().position(|r| r.text.trim().is_empty()) {
        return Err(ReviewIqError::InvalidInput(format!(
            "review #{} is empty",
            pos
        )));
    }
    Ok(())
}

/// Parse reply text and check it against a batch of `expected` reviews
pub fn parse_response(
    text: &str,
    expected: usize,
) -> std::result::Result<AnalysisResult, AnalysisFailure> {
    let mut result: AnalysisResult = serde_json::from_str(text)
        .map_err(|e| AnalysisFailure::MalformedResponse(e.to_string()))?;

    validate_indices(&mut result, expected)?;
    Ok(result)
}

/// Indices must cover `0..expected` exactly once. On success the list is
/// ordered by index so position and index agree.
pub fn validate_indices(
    result: &mut AnalysisResult,
    expected: usize,
) -> std::result::Result<(), AnalysisFailure> {
    let mut seen = vec![false; expected];

    for entry in &result.individual_analysis {
        match seen.get_mut(entry.index) {
            None => {
                return Err(AnalysisFailure::IndexMismatch(format!(
                    "index {} out of range for {} reviews",
                    entry.index, expected
                )))
            }
            Some(true) => {
                return Err(AnalysisFailure::IndexMismatch(format!(
                    "index {} appears more than once",
                    entry.index
                )))
            }
            Some(slot) => *slot = true,
        }
    }

    let missing: Vec<usize> = seen
        .iter()
        .enumerate()
        .filter(|(_, s)| !**s)
        .map(|(i, _)| i)
        .collect();
    if !missing.is_empty() {
        return Err(AnalysisFailure::IndexMismatch(format!(
            "missing indices {:?}",
            missing
        )));
    }

    result.individual_analysis.sort_by_key(|a| a.index);
    Ok(())
}
