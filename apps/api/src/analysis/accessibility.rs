use serde::Serialize;

use super::contrast::pair_contrast;
use crate::models::portfolio::Portfolio;
use crate::models::project::Project;

const MIN_SCORE: i64 = 30;
/// WCAG AA for body text.
pub const MIN_CONTRAST: f64 = 4.5;

pub const ALT_TEXT_NOTE: &str =
    "Add descriptive alt text to every project image to improve accessibility.";
pub const CONTRAST_NOTE: &str =
    "Adjust primary and background colors to meet WCAG AA contrast ratio (4.5:1).";
pub const HEADING_NOTE: &str =
    "Ensure project sections follow a logical heading hierarchy (e.g., H2 for section titles).";

/// These counts come from stored project fields, not from the rendered page.
pub const HEURISTICS: &[&str] = &[
    "missingAltTags: projects with an image but no description",
    "headingIssues: projects with an empty tag list",
    "lowContrastPairs: primary color on background color",
];

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityReport {
    pub score: u32,
    pub missing_alt_tags: usize,
    pub low_contrast_pairs: usize,
    pub heading_issues: usize,
    pub contrast_ratio: f64,
    pub notes: Vec<String>,
    pub heuristics: Vec<String>,
}

fn is_missing_alt(project: &Project) -> bool {
    let has_image = project.image_url.as_deref().is_some_and(|url| !url.is_empty());
    let has_description = project.description.as_deref().is_some_and(|d| !d.is_empty());
    has_image && !has_description
}

fn has_heading_issue(project: &Project) -> bool {
    matches!(&project.tags, Some(tags) if tags.is_empty())
}

pub fn analyze_accessibility(portfolio: &Portfolio, projects: &[Project]) -> AccessibilityReport {
    let missing_alt_tags = projects.iter().filter(|p| is_missing_alt(p)).count();
    let heading_issues = projects.iter().filter(|p| has_heading_issue(p)).count();

    let pair = portfolio.customization.contrast_pair();
    let contrast_ratio = pair_contrast(pair);
    let low_contrast_pairs = usize::from(pair.is_some() && contrast_ratio < MIN_CONTRAST);

    let mut notes = Vec::new();
    if missing_alt_tags > 0 {
        notes.push(ALT_TEXT_NOTE.to_string());
    }
    if low_contrast_pairs > 0 {
        notes.push(CONTRAST_NOTE.to_string());
    }
    if heading_issues > 0 {
        notes.push(HEADING_NOTE.to_string());
    }

    let raw = 100
        - 10 * missing_alt_tags as i64
        - 15 * low_contrast_pairs as i64
        - 5 * heading_issues as i64;

    AccessibilityReport {
        score: raw.max(MIN_SCORE) as u32,
        missing_alt_tags,
        low_contrast_pairs,
        heading_issues,
        contrast_ratio,
        notes,
        heuristics: HEURISTICS.iter().map(|h| h.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customization::{ColorPalette, Customization};
    use crate::models::portfolio::sample_portfolio;
    use crate::models::project::sample_project;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn with_colors(primary: &str, background: &str) -> Portfolio {
        let mut portfolio = sample_portfolio(Uuid::new_v4());
        portfolio.customization = Json(Customization {
            colors: Some(ColorPalette {
                primary: Some(primary.to_string()),
                background: Some(background.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });
        portfolio
    }

    #[test]
    fn test_clean_portfolio_scores_100() {
        let portfolio = with_colors("#000000", "#ffffff");
        let mut project = sample_project(portfolio.id);
        project.image_url = Some("https://cdn.example.com/a.png".into());
        project.description = Some("A checkout flow".into());
        project.tags = Some(vec!["ux".into()]);

        let report = analyze_accessibility(&portfolio, &[project]);
        assert_eq!(report.score, 100);
        assert_eq!(report.contrast_ratio, 21.0);
        assert!(report.notes.is_empty());
        assert_eq!(report.heuristics.len(), 3);
    }

    #[test]
    fn test_counts_each_issue() {
        let portfolio = with_colors("#777777", "#ffffff");
        let mut no_alt = sample_project(portfolio.id);
        no_alt.image_url = Some("https://cdn.example.com/a.png".into());
        no_alt.description = Some(String::new());
        let mut empty_tags = sample_project(portfolio.id);
        empty_tags.tags = Some(Vec::new());

        let report = analyze_accessibility(&portfolio, &[no_alt, empty_tags]);
        assert_eq!(report.missing_alt_tags, 1);
        assert_eq!(report.heading_issues, 1);
        assert_eq!(report.low_contrast_pairs, 1);
        assert_eq!(report.contrast_ratio, 4.48);
        // 100 - 10 - 15 - 5
        assert_eq!(report.score, 70);
        assert_eq!(
            report.notes,
            vec![
                ALT_TEXT_NOTE.to_string(),
                CONTRAST_NOTE.to_string(),
                HEADING_NOTE.to_string()
            ]
        );
    }

    #[test]
    fn test_missing_pair_is_not_a_low_contrast_pair() {
        let portfolio = sample_portfolio(Uuid::new_v4());
        let report = analyze_accessibility(&portfolio, &[]);
        assert_eq!(report.contrast_ratio, 1.0);
        assert_eq!(report.low_contrast_pairs, 0);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_absent_tags_are_not_a_heading_issue() {
        let portfolio = sample_portfolio(Uuid::new_v4());
        let project = sample_project(portfolio.id);
        assert_eq!(analyze_accessibility(&portfolio, &[project]).heading_issues, 0);
    }

    #[test]
    fn test_score_floor() {
        let portfolio = with_colors("#eeeeee", "#ffffff");
        let projects: Vec<_> = (0..10)
            .map(|_| {
                let mut p = sample_project(portfolio.id);
                p.image_url = Some("https://cdn.example.com/a.png".into());
                p.tags = Some(Vec::new());
                p
            })
            .collect();
        let report = analyze_accessibility(&portfolio, &projects);
        assert_eq!(report.score, 30);
    }
}
