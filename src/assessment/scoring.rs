use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Category, ResponseSet, MAX_TOTAL, QUESTION_COUNT};

/// Aggregate score over the full questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub total: u16,
    pub max: u16,
    pub percentage: u8,
}

/// Sum the recorded weights and express them as a rounded percentage of the
/// maximum attainable score. Pure and deterministic; rounding is
/// half-away-from-zero.
///
/// Scoring an incomplete response set still returns the arithmetic result,
/// but that result is meaningless; the submission validator rejects
/// incomplete sets before any score is acted upon.
pub fn score(responses: &ResponseSet) -> ScoreSummary {
    let total: u16 = responses.weights().map(u16::from).sum();
    ScoreSummary {
        total,
        max: MAX_TOTAL,
        percentage: percentage_of(total, MAX_TOTAL),
    }
}

fn percentage_of(total: u16, max: u16) -> u8 {
    if max == 0 {
        return 0;
    }
    ((f64::from(total) / f64::from(max)) * 100.0).round() as u8
}

/// Per-category slice of the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub total: u16,
    pub max: u16,
    pub percentage: u8,
}

/// Contract for producing a category-level breakdown of a response set.
///
/// The flat [`score`] function remains the source of truth for the submitted
/// score; breakdowns exist for report rendering only.
pub trait CategoryScorer {
    fn category_scores(&self, responses: &ResponseSet) -> BTreeMap<Category, CategoryScore>;
}

/// Standard section layout: the four categories cover three consecutive
/// questions each, in questionnaire order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionMap;

impl SectionMap {
    const QUESTIONS_PER_CATEGORY: usize = QUESTION_COUNT / Category::ordered().len();

    fn question_indices(category: Category) -> std::ops::Range<usize> {
        let position = Category::ordered()
            .iter()
            .position(|candidate| *candidate == category)
            .unwrap_or(0);
        let start = position * Self::QUESTIONS_PER_CATEGORY;
        start..start + Self::QUESTIONS_PER_CATEGORY
    }
}

impl CategoryScorer for SectionMap {
    fn category_scores(&self, responses: &ResponseSet) -> BTreeMap<Category, CategoryScore> {
        let mut scores = BTreeMap::new();
        for category in Category::ordered() {
            let total: u16 = Self::question_indices(category)
                .filter_map(|index| responses.get(index))
                .map(|answer| u16::from(answer.weight()))
                .sum();
            let max = (Self::QUESTIONS_PER_CATEGORY * 5) as u16;
            scores.insert(
                category,
                CategoryScore {
                    total,
                    max,
                    percentage: percentage_of(total, max),
                },
            );
        }
        scores
    }
}

/// Result shape consumed by the report renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResults {
    pub category_scores: BTreeMap<Category, CategoryScore>,
    pub overall_percentage: u8,
    pub overall_score: u16,
    pub max_score: u16,
}

impl AssessmentResults {
    /// Build results from a response set using the given breakdown.
    pub fn build<C: CategoryScorer>(responses: &ResponseSet, scorer: &C) -> Self {
        let summary = score(responses);
        Self {
            category_scores: scorer.category_scores(responses),
            overall_percentage: summary.percentage,
            overall_score: summary.total,
            max_score: summary.max,
        }
    }
}
