//! Review input model and ingestion
//!
//! Turns pasted text or CSV content into an ordered list of reviews. The
//! position of a review in that list is the index the model must echo back.

use crate::config::InputConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// One customer review as submitted for analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub text: String,
}

impl Review {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Business category sent along with the reviews
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BusinessCategory {
    #[default]
    ECommerce,
    SaaS,
    LocalService,
    Restaurant,
    MobileApp,
    Other(String),
}

impl BusinessCategory {
    /// The built-in categories, in display order
    pub const BUILT_IN: [BusinessCategory; 5] = [
        BusinessCategory::ECommerce,
        BusinessCategory::SaaS,
        BusinessCategory::LocalService,
        BusinessCategory::Restaurant,
        BusinessCategory::MobileApp,
    ];

    pub fn label(&self) -> &str {
        match self {
            BusinessCategory::ECommerce => "E-commerce",
            BusinessCategory::SaaS => "SaaS",
            BusinessCategory::LocalService => "Local Service",
            BusinessCategory::Restaurant => "Restaurant",
            BusinessCategory::MobileApp => "Mobile App",
            BusinessCategory::Other(label) => label.as_str(),
        }
    }
}

impl fmt::Display for BusinessCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for BusinessCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("business category cannot be empty".to_string());
        }

        let found = Self::BUILT_IN
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(trimmed))
            .cloned();

        Ok(found.unwrap_or_else(|| BusinessCategory::Other(trimmed.to_string())))
    }
}

/// Where the raw review content came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// One review per line
    Text,
    /// One review per row, optional header row
    Csv,
}

/// Parses raw content into reviews using the configured length thresholds
#[derive(Debug, Clone)]
pub struct ReviewParser {
    text_min_chars: usize,
    csv_min_chars: usize,
}

impl Default for ReviewParser {
    fn default() -> Self {
        Self {
            text_min_chars: 3,
            csv_min_chars: 5,
        }
    }
}

impl ReviewParser {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            text_min_chars: config.text_min_chars,
            csv_min_chars: config.csv_min_chars,
        }
    }

    pub fn parse(&self, raw: &str, format: InputFormat) -> Vec<Review> {
        match format {
            InputFormat::Text => self.parse_text(raw),
            InputFormat::Csv => self.parse_csv(raw),
        }
    }

    /// One review per line; short lines are dropped
    pub fn parse_text(&self, raw: &str) -> Vec<Review> {
        let stamp = chrono::Utc::now().timestamp_millis();

        raw.lines()
            .map(str::trim)
            .filter(|line| line.chars().count() > self.text_min_chars)
            .enumerate()
            .map(|(i, line)| Review::new(format!("rev-{}-{}", stamp, i), line))
            .collect()
    }

    /// One review per row. A first row mentioning "review" is a header.
    pub fn parse_csv(&self, raw: &str) -> Vec<Review> {
        let stamp = chrono::Utc::now().timestamp_millis();

        let lines: Vec<&str> = line_break()
            .split(raw)
            .filter(|line| line.trim().chars().count() > self.csv_min_chars)
            .collect();

        let start = match lines.first() {
            Some(first) if first.to_lowercase().contains("review") => 1,
            _ => 0,
        };

        lines[start..]
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let content = outer_quotes().replace_all(line, "").replace("\"\"", "\"");
                Review::new(format!("csv-{}-{}", stamp, i), content)
            })
            .collect()
    }
}

fn line_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\r?\n").expect("valid line break pattern"))
}

fn outer_quotes() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^"|"$"#).expect("valid quote pattern"))
}
