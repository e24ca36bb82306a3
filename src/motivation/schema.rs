//! The typed request and response of the motivational text generator.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::Error;

/// What the generator is told about the sales representative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MotivationalAlertInput {
    pub sales_representative_name: String,
    pub current_commission: f64,
    pub target_commission: f64,
}

impl MotivationalAlertInput {
    /// Check that the name is not blank and that both amounts are finite.
    pub fn validate(&self) -> Result<(), Error> {
        if self.sales_representative_name.trim().is_empty() {
            return Err(Error::GenerationFailed(
                "the sales representative name is empty".to_owned(),
            ));
        }

        if !self.current_commission.is_finite() || !self.target_commission.is_finite() {
            return Err(Error::GenerationFailed(format!(
                "commission amounts must be finite, got current {} and target {}",
                self.current_commission, self.target_commission
            )));
        }

        Ok(())
    }
}

/// The message written by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MotivationalAlertOutput {
    pub alert_message: String,
    /// Whether the message is worth showing to the user.
    pub is_relevant: bool,
}

impl MotivationalAlertOutput {
    /// Parse the generator's raw JSON text.
    ///
    /// Markdown code fences around the JSON are tolerated. Missing fields,
    /// extra fields, wrong types and blank messages are rejected.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let cleaned = text
            .trim()
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim();

        let output: Self = serde_json::from_str(cleaned).map_err(|error| {
            Error::GenerationFailed(format!("response did not match the schema: {error}"))
        })?;

        if output.alert_message.trim().is_empty() {
            return Err(Error::GenerationFailed(
                "response contained an empty message".to_owned(),
            ));
        }

        Ok(output)
    }
}

/// The response schema sent with each request, in the OpenAPI subset the
/// Gemini API accepts.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "alertMessage": {
                "type": "STRING",
                "description": "A mensagem motivacional."
            },
            "isRelevant": {
                "type": "BOOLEAN",
                "description": "Se a mensagem é relevante para o representante."
            }
        },
        "required": ["alertMessage", "isRelevant"],
        "propertyOrdering": ["alertMessage", "isRelevant"]
    })
}
