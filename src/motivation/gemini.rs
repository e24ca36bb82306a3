//! An [AlertGenerator] backed by the Google Gemini `generateContent` API.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{
    Error,
    motivation::{
        AlertGenerator, MotivationalAlertInput, MotivationalAlertOutput, prompt::render_prompt,
        schema::response_schema,
    },
};

/// The public Gemini API.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// The model used when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Writes motivational messages with a Gemini model.
#[derive(Debug, Clone)]
pub struct GeminiAlertGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiAlertGenerator {
    /// Create a generator for `model` served from `base_url`.
    ///
    /// Without an API key every request fails with [Error::GenerationFailed].
    pub fn new(base_url: &str, model: &str, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            model: model.to_owned(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    fn request_body(input: &MotivationalAlertInput) -> Value {
        json!({
            "contents": [{ "role": "user", "parts": [{ "text": render_prompt(input) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema()
            }
        })
    }
}

#[async_trait]
impl AlertGenerator for GeminiAlertGenerator {
    async fn generate(
        &self,
        input: &MotivationalAlertInput,
    ) -> Result<MotivationalAlertOutput, Error> {
        input.validate()?;

        let Some(api_key) = &self.api_key else {
            return Err(Error::GenerationFailed(
                "no Gemini API key has been configured".to_owned(),
            ));
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        tracing::debug!("requesting motivational alert from {url}");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&Self::request_body(input))
            .send()
            .await
            .map_err(|error| Error::GenerationFailed(format!("request failed: {error}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GenerationFailed(format!(
                "Gemini responded with {status}: {body}"
            )));
        }

        let json: Value = response.json().await.map_err(|error| {
            Error::GenerationFailed(format!("response was not valid JSON: {error}"))
        })?;

        let Some(text) = json["candidates"][0]["content"]["parts"][0]["text"].as_str() else {
            return Err(Error::GenerationFailed(
                "response did not contain a candidate".to_owned(),
            ));
        };

        MotivationalAlertOutput::parse(text)
    }
}
