//! Analysis Result document returned by the hosted model
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aggregate sentiment for the whole batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallSentiment {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for OverallSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OverallSentiment::Positive => "Positive",
            OverallSentiment::Neutral => "Neutral",
            OverallSentiment::Negative => "Negative",
        };
        f.pad(s)
    }
}

/// Sentiment of a single theme or review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(format!(
                "unknown sentiment '{}', expected positive, negative or neutral",
                other
            )),
        }
    }
}

/// A named topic cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub count: f64,
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopKeywords {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

/// Relative magnitude of one emotion; values need not sum to 100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionShare {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionSuggestions {
    pub improvements: Vec<String>,
    pub marketing: Vec<String>,
    pub support: Vec<String>,
}

/// Per-review annotation, correlated with the input by `index`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualAnalysis {
    #[serde(deserialize_with = "deserialize_index")]
    pub index: usize,
    pub sentiment: Sentiment,
    pub category: String,
    pub emotions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    pub overall_sentiment: OverallSentiment,
    /// Health index on a 0 to 100 scale, kept exactly as returned
    pub sentiment_score: f64,
    pub themes: Vec<Theme>,
    pub top_keywords: TopKeywords,
    pub emotion_distribution: Vec<EmotionShare>,
    pub repeated_complaints: Vec<String>,
    pub repeated_highlights: Vec<String>,
    pub action_suggestions: ActionSuggestions,
    pub individual_analysis: Vec<IndividualAnalysis>,
}

impl AnalysisResult {
    /// Annotation for the review at `index`, if the model produced one
    pub fn annotation(&self, index: usize) -> Option<&IndividualAnalysis> {
        self.individual_analysis.iter().find(|a| a.index == index)
    }
}

/// JSON numbers from the model may arrive as `3` or `3.0`
fn deserialize_index<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Number::deserialize(deserializer)?;

    if let Some(n) = value.as_u64() {
        return usize::try_from(n).map_err(serde::de::Error::custom);
    }

    match value.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= usize::MAX as f64 => Ok(f as usize),
        _ => Err(serde::de::Error::custom(format!(
            "index must be a non-negative integer, got {}",
            value
        ))),
    }
}
