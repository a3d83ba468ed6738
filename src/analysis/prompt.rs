//! Request construction: instruction text, review body, and response schema
use crate::reviews::{BusinessCategory, Review};
use serde_json::{json, Value};

/// Everything the model client needs for one call
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub system_instruction: String,
    pub contents: String,
    pub response_schema: Value,
    pub temperature: f32,
}

impl AnalysisRequest {
    pub fn build(
        reviews: &[Review],
        business_name: &str,
        category: &BusinessCategory,
        temperature: f32,
    ) -> Self {
        Self {
            system_instruction: system_instruction(business_name, category),
            contents: format!(
                "Analyze these reviews for {}:\n\n{}",
                business_name,
                review_body(reviews)
            ),
            response_schema: response_schema(),
            temperature,
        }
    }
}

pub fn system_instruction(business_name: &str, category: &BusinessCategory) -> String {
    format!(
        "You are a world-class customer experience and business analyst.\n\
         Analyze the provided customer reviews for \"{}\" ({}).\n\
         Extract sentiment, themes, emotions, and actionable insights.\n\
         Every review is labelled \"Review #<index>\"; return exactly one individualAnalysis \
         entry per review using that index.\n\
         Provide a comprehensive, high-quality JSON response.",
        business_name, category
    )
}

/// Index-tagged reviews separated by blank lines
pub fn review_body(reviews: &[Review]) -> String {
    reviews
        .iter()
        .enumerate()
        .map(|(i, r)| format!("Review #{}: \"{}\"", i, r.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn string_list() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

fn sentiment_enum() -> Value {
    json!({ "type": "STRING", "enum": ["positive", "negative", "neutral"] })
}

/// Structural schema for the Analysis Result, in the Gemini schema dialect
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "Executive summary of the overall analysis."
            },
            "overallSentiment": {
                "type": "STRING",
                "enum": ["Positive", "Neutral", "Negative"]
            },
            "sentimentScore": {
                "type": "NUMBER",
                "description": "Score from 0 to 100 representing health of customer satisfaction."
            },
            "themes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "count": { "type": "NUMBER" },
                        "sentiment": sentiment_enum()
                    },
                    "required": ["name", "count", "sentiment"]
                }
            },
            "topKeywords": {
                "type": "OBJECT",
                "properties": {
                    "positive": string_list(),
                    "negative": string_list()
                },
                "required": ["positive", "negative"]
            },
            "emotionDistribution": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "value": { "type": "NUMBER" }
                    },
                    "required": ["name", "value"]
                }
            },
            "repeatedComplaints": string_list(),
            "repeatedHighlights": string_list(),
            "actionSuggestions": {
                "type": "OBJECT",
                "properties": {
                    "improvements": string_list(),
                    "marketing": string_list(),
                    "support": string_list()
                },
                "required": ["improvements", "marketing", "support"]
            },
            "individualAnalysis": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "index": { "type": "NUMBER" },
                        "sentiment": sentiment_enum(),
                        "category": { "type": "STRING" },
                        "emotions": string_list()
                    },
                    "required": ["index", "sentiment", "category", "emotions"]
                }
            }
        },
        "required": [
            "summary", "overallSentiment", "sentimentScore", "themes",
            "topKeywords", "emotionDistribution", "repeatedComplaints",
            "repeatedHighlights", "actionSuggestions", "individualAnalysis"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_body_is_index_tagged() {
        let reviews = vec![Review::new("a", "Great"), Review::new("b", "Awful")];
        assert_eq!(
            review_body(&reviews),
            "Review #0: \"Great\"\n\nReview #1: \"Awful\""
        );
    }

    #[test]
    fn test_request_mentions_business() {
        let reviews = vec![Review::new("a", "Tasty ramen")];
        let req = AnalysisRequest::build(&reviews, "Noodle Bar", &BusinessCategory::Restaurant, 0.1);

        assert!(req.contents.starts_with("Analyze these reviews for Noodle Bar:\n\n"));
        assert!(req.system_instruction.contains("\"Noodle Bar\" (Restaurant)"));
        assert_eq!(req.temperature, 0.1);
    }

    #[test]
    fn test_schema_requires_every_field() {
        let schema = response_schema();
        let required = schema["required"].as_array().unwrap();
        let properties = schema["properties"].as_object().unwrap();

        assert_eq!(required.len(), 10);
        for field in required {
            assert!(properties.contains_key(field.as_str().unwrap()));
        }
    }
}
