use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::models::portfolio::Portfolio;
use crate::models::project::Project;

const MIN_SCORE: i64 = 40;
const PENALTY_PER_RECOMMENDATION: i64 = 10;
const LARGE_IMAGE_PENALTY: i64 = 10;
const PENALTY_PER_EXTRA_PROJECT: i64 = 2;
const PROJECTS_BEFORE_PENALTY: usize = 6;

const LAZY_LOAD_THRESHOLD: usize = 8;
const DESCRIPTION_WORD_THRESHOLD: usize = 160;
const SCRIPT_BLOCK_THRESHOLD: usize = 2;

pub const LAZY_LOAD_ADVICE: &str =
    "Consider lazy loading or splitting projects into categories to reduce initial load.";
pub const TRIM_DESCRIPTIONS_ADVICE: &str =
    "Trim project descriptions to keep them scannable and avoid large blocks of text.";
pub const OPTIMIZE_IMAGES_ADVICE: &str =
    "Optimize or convert large hero images to next-gen formats like WebP or AVIF.";
pub const DEFER_SCRIPTS_ADVICE: &str =
    "Review custom script blocks to ensure they are deferred or loaded asynchronously.";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub score: u32,
    pub project_count: usize,
    pub average_description_length: usize,
    pub has_large_images: bool,
    pub custom_script_blocks: usize,
    pub recommendations: Vec<String>,
}

/// The raw measurements a performance score is computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceMetrics {
    pub project_count: usize,
    pub average_description_length: usize,
    pub has_large_images: bool,
    pub custom_script_blocks: usize,
}

impl PerformanceMetrics {
    pub fn collect(portfolio: &Portfolio, projects: &[Project]) -> Self {
        let project_count = projects.len();
        let average_description_length = if project_count == 0 {
            0
        } else {
            let total: usize = projects
                .iter()
                .map(|p| word_count(p.description.as_deref()))
                .sum();
            (total as f64 / project_count as f64).round() as usize
        };

        Self {
            project_count,
            average_description_length,
            has_large_images: projects
                .iter()
                .any(|p| p.image_url.as_deref().is_some_and(is_large_image)),
            custom_script_blocks: portfolio.customization.scripts.len(),
        }
    }
}

fn tag_pattern() -> &'static Regex {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    TAGS.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"))
}

fn large_image_pattern() -> &'static Regex {
    static LARGE: OnceLock<Regex> = OnceLock::new();
    LARGE.get_or_init(|| Regex::new(r"(?i)original|large|full").expect("valid image pattern"))
}

/// Whitespace-separated tokens after HTML tags are stripped.
pub fn word_count(text: Option<&str>) -> usize {
    match text {
        Some(text) if !text.is_empty() => {
            tag_pattern().replace_all(text, " ").split_whitespace().count()
        }
        _ => 0,
    }
}

/// Heuristic on the URL alone: names like `original`/`large`/`full`, or raw GitHub blobs.
pub fn is_large_image(url: &str) -> bool {
    !url.is_empty() && (large_image_pattern().is_match(url) || url.contains("?raw=true"))
}

pub fn score(metrics: PerformanceMetrics) -> PerformanceReport {
    let mut recommendations = Vec::new();
    if metrics.project_count > LAZY_LOAD_THRESHOLD {
        recommendations.push(LAZY_LOAD_ADVICE.to_string());
    }
    if metrics.average_description_length > DESCRIPTION_WORD_THRESHOLD {
        recommendations.push(TRIM_DESCRIPTIONS_ADVICE.to_string());
    }
    if metrics.has_large_images {
        recommendations.push(OPTIMIZE_IMAGES_ADVICE.to_string());
    }
    if metrics.custom_script_blocks > SCRIPT_BLOCK_THRESHOLD {
        recommendations.push(DEFER_SCRIPTS_ADVICE.to_string());
    }

    let extra_projects = metrics
        .project_count
        .saturating_sub(PROJECTS_BEFORE_PENALTY) as i64;
    let raw = 100
        - PENALTY_PER_RECOMMENDATION * recommendations.len() as i64
        - if metrics.has_large_images {
            LARGE_IMAGE_PENALTY
        } else {
            0
        }
        - PENALTY_PER_EXTRA_PROJECT * extra_projects;

    PerformanceReport {
        score: raw.max(MIN_SCORE) as u32,
        project_count: metrics.project_count,
        average_description_length: metrics.average_description_length,
        has_large_images: metrics.has_large_images,
        custom_script_blocks: metrics.custom_script_blocks,
        recommendations,
    }
}

pub fn analyze_performance(portfolio: &Portfolio, projects: &[Project]) -> PerformanceReport {
    score(PerformanceMetrics::collect(portfolio, projects))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customization::{Customization, ScriptBlock};
    use crate::models::portfolio::sample_portfolio;
    use crate::models::project::sample_project;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn metrics(projects: usize, words: usize, large: bool, scripts: usize) -> PerformanceMetrics {
        PerformanceMetrics {
            project_count: projects,
            average_description_length: words,
            has_large_images: large,
            custom_script_blocks: scripts,
        }
    }

    #[test]
    fn test_nine_empty_projects_scores_84() {
        let portfolio = sample_portfolio(Uuid::new_v4());
        let projects: Vec<_> = (0..9).map(|_| sample_project(portfolio.id)).collect();

        let report = analyze_performance(&portfolio, &projects);
        assert_eq!(report.recommendations, vec![LAZY_LOAD_ADVICE.to_string()]);
        assert_eq!(report.score, 84);
        assert_eq!(report.average_description_length, 0);
        assert!(!report.has_large_images);
    }

    #[test]
    fn test_empty_portfolio_is_perfect() {
        let report = score(metrics(0, 0, false, 0));
        assert_eq!(report.score, 100);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_large_image_costs_twenty() {
        // Recommendation (10) plus the flat large-image penalty (10).
        let report = score(metrics(1, 10, true, 0));
        assert_eq!(report.score, 80);
        assert_eq!(report.recommendations, vec![OPTIMIZE_IMAGES_ADVICE.to_string()]);
    }

    #[test]
    fn test_score_never_below_floor() {
        let report = score(metrics(200, 10_000, true, 50));
        assert_eq!(report.score, 40);
        assert_eq!(report.recommendations.len(), 4);
    }

    #[test]
    fn test_score_is_monotonic_in_each_input() {
        for large in [false, true] {
            for projects in 0..20 {
                for scripts in 0..6 {
                    for words in [0, 100, 160, 161, 400] {
                        let base = score(metrics(projects, words, large, scripts)).score;
                        assert!(score(metrics(projects + 1, words, large, scripts)).score <= base);
                        assert!(score(metrics(projects, words + 1, large, scripts)).score <= base);
                        assert!(score(metrics(projects, words, large, scripts + 1)).score <= base);
                        assert!(base >= 40);
                    }
                }
            }
        }
    }

    #[test]
    fn test_word_count_strips_html() {
        assert_eq!(word_count(None), 0);
        assert_eq!(word_count(Some("")), 0);
        assert_eq!(word_count(Some("<p>Hello <b>big</b> world</p>")), 3);
        assert_eq!(word_count(Some("one<br/>two")), 2);
        assert_eq!(word_count(Some("  spaced   out  ")), 2);
    }

    #[test]
    fn test_average_description_rounds() {
        let portfolio = sample_portfolio(Uuid::new_v4());
        let mut a = sample_project(portfolio.id);
        a.description = Some("one two".into());
        let mut b = sample_project(portfolio.id);
        b.description = Some("one two three".into());

        // (2 + 3) / 2 = 2.5 rounds up
        let report = analyze_performance(&portfolio, &[a, b]);
        assert_eq!(report.average_description_length, 3);
    }

    #[test]
    fn test_large_image_heuristic() {
        assert!(is_large_image("https://cdn.example.com/hero-ORIGINAL.png"));
        assert!(is_large_image("https://cdn.example.com/large/hero.png"));
        assert!(is_large_image("https://github.com/jane/repo/blob/main/a.png?raw=true"));
        assert!(!is_large_image("https://cdn.example.com/thumb.webp"));
        assert!(!is_large_image(""));
    }

    #[test]
    fn test_script_blocks_counted_from_customization() {
        let mut portfolio = sample_portfolio(Uuid::new_v4());
        portfolio.customization = Json(Customization {
            scripts: (0..3)
                .map(|i| ScriptBlock {
                    name: None,
                    source: format!("console.log({i})"),
                })
                .collect(),
            ..Default::default()
        });
        let report = analyze_performance(&portfolio, &[]);
        assert_eq!(report.custom_script_blocks, 3);
        assert_eq!(report.recommendations, vec![DEFER_SCRIPTS_ADVICE.to_string()]);
        assert_eq!(report.score, 90);
    }
}
