//! Plain-text rendering of each view
use crate::analysis::{ActionSuggestions, AnalysisResult};
use crate::app::CurrentAnalysis;
use crate::filter::{FilteredReview, ReviewFilter};
use crate::history::HistoryRecord;
use crate::reviews::BusinessCategory;

const BAR_WIDTH: usize = 30;

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled.clamp(1, BAR_WIDTH))
}

fn bullet_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n{}:\n", title));
    for item in items {
        out.push_str(&format!("- {}\n", item));
    }
}

pub fn render_upload() -> String {
    let mut out = String::new();
    out.push_str("New Analysis\n");
    out.push_str("Provide a business name and reviews (one per line, or a CSV file).\n");
    out.push_str("Categories: ");
    let labels: Vec<&str> = BusinessCategory::BUILT_IN.iter().map(|c| c.label()).collect();
    out.push_str(&labels.join(", "));
    out.push_str(" (or any custom label)\n");
    out
}

pub fn render_dashboard(current: &CurrentAnalysis) -> String {
    let r: &AnalysisResult = &current.result;
    let mut out = String::new();

    out.push_str(&format!("{} | Report Ready\n\n", current.business_name));
    out.push_str(&format!("{}\n\n", r.summary.trim()));
    out.push_str(&format!(
        "Overall sentiment: {}   Score: {}   Reviews: {}\n",
        r.overall_sentiment,
        r.sentiment_score,
        current.review_count()
    ));

    if !r.themes.is_empty() {
        out.push_str("\nThemes:\n");
        let max = r.themes.iter().map(|t| t.count).fold(0.0_f64, f64::max);
        for t in &r.themes {
            out.push_str(&format!(
                "  {:<20} {:>5} {:<8} {}\n",
                t.name,
                t.count,
                t.sentiment,
                bar(t.count, max)
            ));
        }
    }

    if !r.emotion_distribution.is_empty() {
        out.push_str("\nEmotion breakdown:\n");
        let max = r
            .emotion_distribution
            .iter()
            .map(|e| e.value)
            .fold(0.0_f64, f64::max);
        for e in &r.emotion_distribution {
            out.push_str(&format!(
                "  {:<20} {:>6} {}\n",
                e.name,
                e.value,
                bar(e.value, max)
            ));
        }
    }

    bullet_list(&mut out, "Key strengths", &r.repeated_highlights);
    bullet_list(&mut out, "Frequent complaints", &r.repeated_complaints);

    if !r.top_keywords.positive.is_empty() || !r.top_keywords.negative.is_empty() {
        out.push_str("\nKeywords:\n");
        out.push_str(&format!("  + {}\n", r.top_keywords.positive.join(", ")));
        out.push_str(&format!("  - {}\n", r.top_keywords.negative.join(", ")));
    }

    out
}

pub fn render_reviews(current: &CurrentAnalysis, filter: &ReviewFilter) -> String {
    let individual = &current.result.individual_analysis;
    let mut out = String::new();

    if current.reviews.is_empty() {
        // Loaded from history: only the annotations survive
        out.push_str("Review text is not kept in history; showing annotations only.\n\n");
        for a in individual
            .iter()
            .filter(|a| filter.sentiment.map_or(true, |s| s == a.sentiment))
        {
            out.push_str(&format!(
                "#{:<3} {:<8} {:<16} {}\n",
                a.index,
                a.sentiment.as_str().to_uppercase(),
                a.category,
                a.emotions.join(", ")
            ));
        }
        return out;
    }

    let matches: Vec<FilteredReview<'_>> = filter.apply(&current.reviews, individual);
    out.push_str(&format!(
        "{} of {} reviews\n\n",
        matches.len(),
        current.reviews.len()
    ));

    for item in &matches {
        out.push_str(&format!("#{} {}\n", item.index, item.review.text));
        if let Some(a) = item.analysis {
            out.push_str(&format!(
                "    {} | {}",
                a.sentiment.as_str().to_uppercase(),
                a.category
            ));
            if !a.emotions.is_empty() {
                out.push_str(&format!(" | {}", a.emotions.join(", ")));
            }
            out.push('\n');
        }
    }

    if matches.is_empty() {
        out.push_str("No reviews match the current filters.\n");
    }

    out
}

pub fn render_actions(suggestions: &ActionSuggestions) -> String {
    let mut out = String::from("Suggested actions\n");
    bullet_list(&mut out, "Product improvements", &suggestions.improvements);
    bullet_list(&mut out, "Marketing ideas", &suggestions.marketing);
    bullet_list(&mut out, "Support", &suggestions.support);
    out
}

pub fn render_history(records: &[HistoryRecord]) -> String {
    let mut out = format!("Archive: {} reports\n", records.len());
    if records.is_empty() {
        out.push_str("No saved analyses yet.\n");
        return out;
    }

    out.push('\n');
    for r in records {
        out.push_str(&format!(
            "{}  {}  {:<24} {:>4} reviews  {}%\n",
            r.created_at().format("%Y-%m-%d"),
            r.id,
            r.business_name,
            r.review_count,
            r.result.sentiment_score
        ));
    }
    out
}
