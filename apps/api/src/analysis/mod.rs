//! Performance and accessibility scoring for a portfolio.
//!
//! Both reports are heuristics over stored data. Nothing here renders or
//! fetches the published page. Each report is followed by a best-effort
//! request for model-written advice.

pub mod accessibility;
pub mod contrast;
pub mod handlers;
pub mod performance;
pub mod prompts;

use tracing::warn;

use crate::llm_client::TextGenerator;

/// Advice is optional: a failed generation is logged and reported as `None`.
pub async fn advise(llm: &dyn TextGenerator, prompt: &str) -> Option<String> {
    match llm.generate(prompt).await {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("Advice generation failed, returning report without it: {e}");
            None
        }
    }
}
