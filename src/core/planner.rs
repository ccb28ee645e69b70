use crate::core::prompt::build_prompt;
use crate::domain::model::{ChatMessage, CompletionRequest, CompletionSettings, StudentProfile};
use crate::domain::ports::CompletionProvider;
use crate::utils::error::Result;

/// Asks a completion provider for a next-semester plan.
///
/// Each call builds its own prompt and request and sends exactly one request.
/// Provider failures are returned unchanged; nothing is retried.
pub struct PlanRequester<P: CompletionProvider> {
    provider: P,
    settings: CompletionSettings,
}

impl<P: CompletionProvider> PlanRequester<P> {
    pub fn new(provider: P, settings: CompletionSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    pub fn build_request(&self, profile: &StudentProfile) -> CompletionRequest {
        let prompt = build_prompt(profile);

        CompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::system(prompt.system_instruction),
                ChatMessage::user(prompt.user_instruction),
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }

    pub async fn create_plan(&self, profile: &StudentProfile) -> Result<String> {
        let request = self.build_request(profile);
        tracing::debug!(
            "Built completion request for {} ({} messages, model {})",
            profile.name,
            request.messages.len(),
            request.model
        );

        tracing::info!("Requesting plan from model {}", request.model);
        let response = self.provider.complete(&request).await?;
        tracing::debug!("Provider returned {} choice(s)", response.choices.len());

        response.into_first_content()
    }
}
