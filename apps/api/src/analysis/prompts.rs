use super::accessibility::AccessibilityReport;
use super::performance::PerformanceReport;

pub fn performance_advice_prompt(report: &PerformanceReport) -> String {
    let images = if report.has_large_images {
        "Images exceed the recommended size.".to_string()
    } else {
        "Images are within recommended sizes.".to_string()
    };
    let scripts = if report.custom_script_blocks > 0 {
        format!(
            "There are {} custom script blocks that may affect performance.",
            report.custom_script_blocks
        )
    } else {
        "There are no custom script blocks.".to_string()
    };

    [
        "You are optimizing a web portfolio for performance.".to_string(),
        format!(
            "Projects: {} projects with average description length {} words.",
            report.project_count, report.average_description_length
        ),
        images,
        scripts,
        "Suggest concrete steps to improve loading speed in bullet points.".to_string(),
    ]
    .join("\n")
}

pub fn accessibility_advice_prompt(report: &AccessibilityReport) -> String {
    [
        "You are an accessibility auditor for digital portfolios.".to_string(),
        format!(
            "Found {} images missing alt text, {} color combinations with insufficient contrast, and {} heading structure issues.",
            report.missing_alt_tags, report.low_contrast_pairs, report.heading_issues
        ),
        "Provide prioritized recommendations using markdown bullet lists.".to_string(),
    ]
    .join(" ")
}
