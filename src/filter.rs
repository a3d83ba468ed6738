//! Review list filtering by sentiment and search term
use crate::analysis::{IndividualAnalysis, Sentiment};
use crate::reviews::Review;

/// Active filters for the review list; `None` means "all"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub search: Option<String>,
    pub sentiment: Option<Sentiment>,
}

/// A review that survived filtering, with its position and annotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilteredReview<'a> {
    pub index: usize,
    pub review: &'a Review,
    pub analysis: Option<&'a IndividualAnalysis>,
}

impl ReviewFilter {
    pub fn new(search: Option<String>, sentiment: Option<Sentiment>) -> Self {
        Self {
            search: search.filter(|s| !s.is_empty()),
            sentiment,
        }
    }

    /// Reviews matching every active filter, in input order.
    ///
    /// A sentiment filter drops reviews that have no annotation.
    pub fn apply<'a>(
        &self,
        reviews: &'a [Review],
        individual: &'a [IndividualAnalysis],
    ) -> Vec<FilteredReview<'a>> {
        let needle = self.search.as_ref().map(|s| s.to_lowercase());

        reviews
            .iter()
            .enumerate()
            .map(|(index, review)| FilteredReview {
                index,
                review,
                analysis: individual.iter().find(|a| a.index == index),
            })
            .filter(|item| match &needle {
                Some(n) => item.review.text.to_lowercase().contains(n.as_str()),
                None => true,
            })
            .filter(|item| match self.sentiment {
                Some(wanted) => item.analysis.map(|a| a.sentiment) == Some(wanted),
                None => true,
            })
            .collect()
    }
}
