use geo_core::{GenerationRequest, GenerationResult};
use geo_logging::geo_debug;
use tokio_util::sync::CancellationToken;

use crate::{catalog, GenerationError, GeneratorSettings};

/// Produces the result for one request. Implementations must return
/// [`GenerationError::Cancelled`] promptly once `cancel` fires.
#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult, GenerationError>;
}

/// Stand-in for the real recommendation, rewriting and analysis backends:
/// waits, then answers from the canned catalog.
#[derive(Debug, Clone, Default)]
pub struct MockGenerator {
    settings: GeneratorSettings,
}

impl MockGenerator {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl Generator for MockGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationResult, GenerationError> {
        check_input(request)?;

        let delay = self.settings.delay_for(request);
        tokio::select! {
            _ = cancel.cancelled() => {
                geo_debug!("{} generator cancelled", request.tool());
                return Err(GenerationError::Cancelled);
            }
            _ = tokio::time::sleep(delay) => {}
        }

        let mut rng = rand::thread_rng();
        Ok(catalog::respond(request, &mut rng))
    }
}

fn check_input(request: &GenerationRequest) -> Result<(), GenerationError> {
    let missing = match request {
        GenerationRequest::Recommend {
            business_description,
        }
        | GenerationRequest::RegeneratePrompts {
            business_description,
        } => blank(business_description).then_some("business description"),
        GenerationRequest::ReplacePrompt { .. } => None,
        GenerationRequest::Rewrite {
            content, prompts, ..
        }
        | GenerationRequest::RegenerateRewrite {
            content, prompts, ..
        } => {
            if blank(content) {
                Some("content")
            } else {
                prompts.iter().all(|p| blank(p)).then_some("target prompts")
            }
        }
        GenerationRequest::AdjustRewrite { content, .. } => blank(content).then_some("content"),
        GenerationRequest::Analyze {
            industry, website, ..
        }
        | GenerationRequest::RegenerateInsights {
            industry, website, ..
        } => {
            if blank(industry) {
                Some("industry")
            } else {
                blank(website).then_some("website")
            }
        }
    };
    match missing {
        Some(field) => Err(GenerationError::InvalidInput(format!("{field} is empty"))),
        None => Ok(()),
    }
}

fn blank(text: &str) -> bool {
    text.trim().is_empty()
}
