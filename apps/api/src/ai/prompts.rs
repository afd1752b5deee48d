//! Prompt builders for the writing-assist endpoints. Pure string assembly.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl TextLength {
    fn instruction(self) -> &'static str {
        match self {
            TextLength::Short => "Keep the response concise (under 80 words).",
            TextLength::Medium => "Aim for 120 words on average.",
            TextLength::Long => "Provide a detailed response (around 200 words).",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTextInput {
    pub prompt: String,
    pub tone: Option<String>,
    pub length: Option<TextLength>,
    pub existing_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateIdeasInput {
    pub industry: String,
    pub goals: Option<String>,
    pub tone: Option<String>,
    #[serde(default)]
    pub must_have_sections: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateInput {
    pub text: String,
    pub target_language: String,
    pub source_language: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn generate_text_prompt(input: &GenerateTextInput) -> String {
    let mut lines = vec![
        "You are an expert portfolio copywriter.".to_string(),
        format!(
            "Write in a {} tone.",
            non_blank(&input.tone).unwrap_or("professional")
        ),
        input.length.unwrap_or_default().instruction().to_string(),
    ];

    if let Some(existing) = non_blank(&input.existing_text) {
        lines.push(
            "Improve the existing text. Keep the original meaning while improving clarity, flow, and impact."
                .to_string(),
        );
        lines.push(format!("Existing text: {existing}"));
    }

    lines.push(format!("Task: {}", input.prompt.trim()));
    lines.join("\n")
}

pub fn outline_prompt(input: &TemplateIdeasInput) -> String {
    let mut parts = vec![
        "You are helping a user plan a portfolio layout.".to_string(),
        format!("Industry: {}.", input.industry.trim()),
    ];
    if let Some(tone) = non_blank(&input.tone) {
        parts.push(format!("Preferred tone: {tone}."));
    }
    if let Some(goals) = non_blank(&input.goals) {
        parts.push(format!("Goals: {goals}."));
    }
    if !input.must_have_sections.is_empty() {
        parts.push(format!(
            "Required sections: {}.",
            input.must_have_sections.join(", ")
        ));
    }
    parts.push(
        "Suggest an ordered list of sections, recommended color accents, and unique interactive ideas."
            .to_string(),
    );
    parts.push(
        "Return clear markdown with headings for sections, color palette, and interactive ideas."
            .to_string(),
    );
    parts.join(" ")
}

pub fn translate_prompt(input: &TranslateInput) -> String {
    let target = input.target_language.trim();
    let instruction = match non_blank(&input.source_language) {
        Some(source) => format!(
            "Translate the following {source} text into {target} while preserving tone and intent."
        ),
        None => {
            format!("Translate the following text into {target} while preserving tone and intent.")
        }
    };

    [
        "You are a professional translator for portfolio content.".to_string(),
        instruction,
        "Return only the translated text without additional commentary.".to_string(),
        format!("Text: {}", input.text),
    ]
    .join("\n")
}

pub fn improvements_prompt(content: &str) -> String {
    [
        "Review the portfolio content below and suggest improvements.".to_string(),
        "Provide a short summary, a list of strengths, and actionable recommendations.".to_string(),
        "Keep the response concise and formatted as markdown.".to_string(),
        format!("Content: {content}"),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_input(value: serde_json::Value) -> GenerateTextInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_generate_text_defaults() {
        let prompt = generate_text_prompt(&text_input(json!({ "prompt": "Write my bio" })));
        assert_eq!(
            prompt,
            "You are an expert portfolio copywriter.\n\
             Write in a professional tone.\n\
             Aim for 120 words on average.\n\
             Task: Write my bio"
        );
    }

    #[test]
    fn test_generate_text_with_existing_text() {
        let prompt = generate_text_prompt(&text_input(json!({
            "prompt": "Tighten this",
            "tone": "playful",
            "length": "short",
            "existingText": "I make things."
        })));
        assert!(prompt.contains("Write in a playful tone."));
        assert!(prompt.contains("under 80 words"));
        assert!(prompt.contains("Existing text: I make things."));
        assert!(prompt.ends_with("Task: Tighten this"));
    }

    #[test]
    fn test_unknown_length_is_rejected() {
        let result: Result<GenerateTextInput, _> =
            serde_json::from_value(json!({ "prompt": "x", "length": "epic" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_outline_skips_absent_parts() {
        let input: TemplateIdeasInput =
            serde_json::from_value(json!({ "industry": "Fintech" })).unwrap();
        let prompt = outline_prompt(&input);
        assert!(prompt.starts_with("You are helping a user plan a portfolio layout. Industry: Fintech."));
        assert!(!prompt.contains("Goals:"));
        assert!(!prompt.contains("Required sections:"));

        let input: TemplateIdeasInput = serde_json::from_value(json!({
            "industry": "Fintech",
            "goals": "land a job",
            "mustHaveSections": ["About", "Case studies"]
        }))
        .unwrap();
        let prompt = outline_prompt(&input);
        assert!(prompt.contains("Goals: land a job."));
        assert!(prompt.contains("Required sections: About, Case studies."));
    }

    #[test]
    fn test_translate_names_source_when_given() {
        let mut input = TranslateInput {
            text: "Hola".to_string(),
            target_language: "English".to_string(),
            source_language: None,
        };
        assert!(translate_prompt(&input).contains("Translate the following text into English"));

        input.source_language = Some("Spanish".to_string());
        let prompt = translate_prompt(&input);
        assert!(prompt.contains("Translate the following Spanish text into English"));
        assert!(prompt.ends_with("Text: Hola"));
    }

    #[test]
    fn test_improvements_prompt_appends_content() {
        let prompt = improvements_prompt("My portfolio");
        assert_eq!(prompt.lines().count(), 4);
        assert!(prompt.ends_with("Content: My portfolio"));
    }
}
