//! Portfolio export as a downloadable JSON, Markdown or HTML document.

pub mod handlers;

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::portfolio::Portfolio;
use crate::models::project::Project;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Markdown,
    Html,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Html => "text/html; charset=utf-8",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
        }
    }

    pub fn content_disposition(self, slug: &str) -> String {
        format!("attachment; filename=\"{slug}.{}\"", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "html" => Ok(ExportFormat::Html),
            other => Err(AppError::BadRequest(format!(
                "Unsupported export format '{other}'; expected json, markdown or html"
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioExport<'a> {
    pub portfolio: &'a Portfolio,
    pub projects: &'a [Project],
    pub exported_at: DateTime<Utc>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn project_tags(project: &Project) -> Option<String> {
    project
        .tags
        .as_ref()
        .filter(|tags| !tags.is_empty())
        .map(|tags| tags.join(", "))
}

pub fn render_markdown(portfolio: &Portfolio, projects: &[Project]) -> String {
    let mut md = format!("# {}\n\n", portfolio.name);
    if let Some(description) = non_empty(&portfolio.description) {
        md.push_str(&format!("{description}\n\n"));
    }

    if !projects.is_empty() {
        md.push_str("## Projects\n\n");
    }
    for project in projects {
        md.push_str(&format!("### {}\n\n", project.title));
        if let Some(description) = non_empty(&project.description) {
            md.push_str(&format!("{description}\n\n"));
        }
        if let Some(tags) = project_tags(project) {
            md.push_str(&format!("Tags: {tags}\n"));
        }
        if let Some(url) = non_empty(&project.project_url) {
            md.push_str(&format!("Link: {url}\n"));
        }
        md.push('\n');
    }

    md.truncate(md.trim_end().len());
    md.push('\n');
    md
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn render_html(portfolio: &Portfolio, projects: &[Project]) -> String {
    let title = escape_html(&portfolio.name);
    let mut body = format!("  <h1>{title}</h1>\n");
    if let Some(description) = non_empty(&portfolio.description) {
        body.push_str(&format!("  <p>{}</p>\n", escape_html(description)));
    }

    if !projects.is_empty() {
        body.push_str("  <h2>Projects</h2>\n");
    }
    for project in projects {
        body.push_str("  <section>\n");
        body.push_str(&format!("    <h3>{}</h3>\n", escape_html(&project.title)));
        if let Some(description) = non_empty(&project.description) {
            body.push_str(&format!("    <p>{}</p>\n", escape_html(description)));
        }
        if let Some(tags) = project_tags(project) {
            body.push_str(&format!("    <p>Tags: {}</p>\n", escape_html(&tags)));
        }
        if let Some(url) = non_empty(&project.project_url) {
            let url = escape_html(url);
            body.push_str(&format!("    <p>Link: <a href=\"{url}\">{url}</a></p>\n"));
        }
        body.push_str("  </section>\n");
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <title>{title}</title>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}
