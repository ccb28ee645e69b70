use crate::config::ProviderConfig;
use crate::domain::model::{CompletionRequest, CompletionResponse};
use crate::domain::ports::CompletionProvider;
use crate::utils::error::{PlannerError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Chat-completions client for OpenAI-compatible endpoints.
pub struct OpenAiProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl OpenAiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
            api_key: config.resolve_api_key(),
            api_key_env: config.api_key_env.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| PlannerError::MissingCredential {
                var: self.api_key_env.clone(),
            })?;

        tracing::debug!("POST {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Provider response status: {}", status);
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body);
            tracing::error!("Provider rejected request ({}): {}", status, message);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    PlannerError::Authentication {
                        status: status.as_u16(),
                        message,
                    }
                }
                _ => PlannerError::Provider {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        serde_json::from_str(&body).map_err(|e| PlannerError::MalformedResponse {
            message: format!("could not decode completion body: {}", e),
        })
    }
}

/// Prefers the `error.message` field providers put in JSON error bodies.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
