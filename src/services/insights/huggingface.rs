/// HuggingFace Inference API text generator
///
/// Sends one POST per prompt to `{api_url}/{model}`. The client-level timeout
/// bounds the whole exchange. Every failure is logged here and reported as
/// `None`, so callers only ever see "text" or "no text".
use crate::{error::AppResult, services::insights::TextGenerator};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MAX_NEW_TOKENS: u32 = 150;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    do_sample: bool,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    #[serde(default)]
    generated_text: String,
}

#[derive(Clone)]
pub struct HuggingFaceGenerator {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    model: String,
}

impl HuggingFaceGenerator {
    pub fn new(
        api_key: Option<String>,
        api_url: String,
        model: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.api_url, self.model)
    }
}

#[async_trait::async_trait]
impl TextGenerator for HuggingFaceGenerator {
    async fn generate(&self, prompt: &str) -> Option<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("No HuggingFace API key configured");
            return None;
        };

        let payload = GenerationRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
                do_sample: true,
                return_full_text: false,
            },
        };

        let response = match self
            .http_client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                tracing::error!(error = %e, model = %self.model, "HuggingFace API request timed out");
                return None;
            }
            Err(e) => {
                tracing::error!(error = %e, model = %self.model, "HuggingFace API connection error");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                model = %self.model,
                "HuggingFace API error"
            );
            return None;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(error = %e, model = %self.model, "Failed to read HuggingFace API response");
                return None;
            }
        };

        let results: Vec<GeneratedText> = match serde_json::from_str(&body) {
            Ok(results) => results,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body,
                    model = %self.model,
                    "Unexpected HuggingFace API response format"
                );
                return None;
            }
        };

        match results.into_iter().next() {
            Some(first) => {
                tracing::debug!(model = %self.model, "HuggingFace generation completed");
                Some(first.generated_text.trim().to_string())
            }
            None => {
                tracing::error!(model = %self.model, "HuggingFace API returned no results");
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "huggingface"
    }
}
