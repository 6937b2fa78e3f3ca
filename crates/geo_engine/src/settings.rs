use std::time::Duration;

use geo_core::GenerationRequest;

/// Simulated latency of the mock generators, per kind of request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub submit_delay: Duration,
    pub regenerate_delay: Duration,
    pub prompt_delay: Duration,
    pub adjust_delay: Duration,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            submit_delay: Duration::from_millis(3000),
            regenerate_delay: Duration::from_millis(3000),
            prompt_delay: Duration::from_millis(1500),
            adjust_delay: Duration::from_millis(2000),
        }
    }
}

impl GeneratorSettings {
    /// Same delay for every request.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            submit_delay: delay,
            regenerate_delay: delay,
            prompt_delay: delay,
            adjust_delay: delay,
        }
    }

    pub fn immediate() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    pub fn delay_for(&self, request: &GenerationRequest) -> Duration {
        match request {
            GenerationRequest::Recommend { .. }
            | GenerationRequest::Rewrite { .. }
            | GenerationRequest::Analyze { .. } => self.submit_delay,
            GenerationRequest::RegeneratePrompts { .. }
            | GenerationRequest::RegenerateRewrite { .. }
            | GenerationRequest::RegenerateInsights { .. } => self.regenerate_delay,
            GenerationRequest::ReplacePrompt { .. } => self.prompt_delay,
            GenerationRequest::AdjustRewrite { .. } => self.adjust_delay,
        }
    }
}
