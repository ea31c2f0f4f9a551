use chrono::NaiveDate;

use super::scoring::AssessmentResults;

const RECOMMENDATIONS: &str = "Recommendations\n\
    1. Focus on categories scoring below 70%\n\
    2. Conduct employee training for brand alignment\n\
    3. Review customer feedback regularly\n\
    4. Strengthen brand communication channels\n\
    5. Monitor competitor positioning\n";

/// Render the fixed-layout assessment report as plain text: title,
/// per-category score lines, a placeholder visualization region, the overall
/// block, the five standing recommendations, and the footer.
pub fn render(results: &AssessmentResults, date: NaiveDate) -> String {
    let mut out = format!("Brand Health Assessment Report\nGenerated on {date}\n\n");

    out.push_str("Category Scores\n");
    for (category, score) in &results.category_scores {
        out.push_str(&format!(
            "- {}: {}% ({}/{} points)\n",
            category.label(),
            score.percentage,
            score.total,
            score.max
        ));
    }

    out.push_str("\n[ Brand Health Score Visualization ]\n\n");

    out.push_str(&format!(
        "Overall Brand Health\n\
         Your brand achieved an overall score of {}% ({}/{} points)\n\n",
        results.overall_percentage, results.overall_score, results.max_score
    ));

    out.push_str(RECOMMENDATIONS);
    out.push_str("\nConfidential - Brand Health Assessment Report\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::Category;
    use crate::assessment::scoring::CategoryScore;
    use std::collections::BTreeMap;

    #[test]
    fn renders_the_fixed_layout() {
        let mut category_scores = BTreeMap::new();
        for category in Category::ordered() {
            category_scores.insert(
                category,
                CategoryScore {
                    total: 12,
                    max: 15,
                    percentage: 80,
                },
            );
        }
        let results = AssessmentResults {
            category_scores,
            overall_percentage: 80,
            overall_score: 48,
            max_score: 60,
        };
        let date = NaiveDate::from_ymd_opt(2026, 8, 23).expect("valid date");

        let rendered = render(&results, date);
        assert!(rendered.starts_with("Brand Health Assessment Report\n"));
        assert!(rendered.contains("Generated on 2026-08-23"));
        assert!(rendered.contains("- Brand Strategy: 80% (12/15 points)"));
        assert!(rendered.contains("[ Brand Health Score Visualization ]"));
        assert!(rendered.contains("overall score of 80% (48/60 points)"));
        assert_eq!(rendered.matches("\nRecommendations\n").count(), 1);
        assert!(rendered.contains("5. Monitor competitor positioning"));
        assert!(rendered.trim_end().ends_with("Confidential - Brand Health Assessment Report"));
    }
}
