use super::common::*;
use crate::assessment::domain::{AnswerLabel, Category, ResponseSet};
use crate::assessment::scoring::{score, AssessmentResults, CategoryScorer, SectionMap};

#[test]
fn alternating_five_and_three_scores_eighty_percent() {
    let summary = score(&alternating_responses());
    assert_eq!(summary.total, 48);
    assert_eq!(summary.max, 60);
    assert_eq!(summary.percentage, 80);
}

#[test]
fn uniform_answers_hit_the_scale_ends() {
    let lowest = score(&uniform_responses(AnswerLabel::StronglyDisagree));
    assert_eq!(lowest.total, 12);
    assert_eq!(lowest.percentage, 20);

    let highest = score(&uniform_responses(AnswerLabel::StronglyAgree));
    assert_eq!(highest.total, 60);
    assert_eq!(highest.percentage, 100);
}

#[test]
fn percentage_rounds_to_nearest() {
    // 43/60 = 71.67 -> 72; 44/60 = 73.33 -> 73.
    let mut responses = uniform_responses(AnswerLabel::Maybe);
    for index in 0..7 {
        responses
            .record(index, AnswerLabel::Agree)
            .expect("index in range");
    }
    assert_eq!(score(&responses).total, 43);
    assert_eq!(score(&responses).percentage, 72);

    responses
        .record(7, AnswerLabel::Agree)
        .expect("index in range");
    assert_eq!(score(&responses).total, 44);
    assert_eq!(score(&responses).percentage, 73);
}

#[test]
fn every_complete_response_set_stays_in_range() {
    for weight in 1..=5u8 {
        let answer = AnswerLabel::from_weight(weight).expect("valid weight");
        let summary = score(&uniform_responses(answer));
        assert!((2..=100).contains(&summary.percentage));
    }
}

#[test]
fn scoring_is_deterministic_regardless_of_answer_order() {
    let forward = alternating_responses();
    let mut reversed = ResponseSet::new();
    for (index, answer) in forward.iter().collect::<Vec<_>>().into_iter().rev() {
        reversed.record(index, answer).expect("index in range");
    }
    assert_eq!(score(&forward), score(&reversed));
}

#[test]
fn section_map_splits_questions_into_four_categories() {
    let mut responses = uniform_responses(AnswerLabel::StronglyDisagree);
    // First section answered at the top of the scale.
    for index in 0..3 {
        responses
            .record(index, AnswerLabel::StronglyAgree)
            .expect("index in range");
    }

    let breakdown = SectionMap.category_scores(&responses);
    assert_eq!(breakdown.len(), 4);

    let strategy = breakdown[&Category::BrandStrategy];
    assert_eq!(strategy.total, 15);
    assert_eq!(strategy.max, 15);
    assert_eq!(strategy.percentage, 100);

    let execution = breakdown[&Category::BrandExecution];
    assert_eq!(execution.total, 3);
    assert_eq!(execution.percentage, 20);
}

#[test]
fn results_carry_flat_score_as_source_of_truth() {
    let responses = alternating_responses();
    let results = AssessmentResults::build(&responses, &SectionMap);
    assert_eq!(results.overall_score, 48);
    assert_eq!(results.max_score, 60);
    assert_eq!(results.overall_percentage, 80);

    let category_total: u16 = results
        .category_scores
        .values()
        .map(|category| category.total)
        .sum();
    assert_eq!(category_total, results.overall_score);
}
