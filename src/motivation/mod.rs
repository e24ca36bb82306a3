//! Motivational messages about progress towards the commission goal,
//! written by a hosted language model.
//!
//! The generator sits behind the [AlertGenerator] trait. The server uses
//! [GeminiAlertGenerator] and tests substitute their own implementation.

mod endpoint;
mod gemini;
mod prompt;
mod schema;

use async_trait::async_trait;

use crate::Error;

pub use endpoint::generate_alert_endpoint;
pub use gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, GeminiAlertGenerator};
pub use schema::{MotivationalAlertInput, MotivationalAlertOutput};

/// The name the generator addresses when none is configured.
pub const DEFAULT_REPRESENTATIVE_NAME: &str = "Campeão(a) de Vendas";

/// Shown in place of a generated message whenever generation fails.
pub const GENERATION_FAILED_MESSAGE: &str = "Erro ao buscar mensagem. Tente novamente mais tarde.";

/// Shown when the generator decides its message is not worth showing.
pub const NEUTRAL_MESSAGE: &str =
    "Nenhum alerta específico no momento, mas continue focado no seu objetivo!";

/// Writes a short motivational message for a sales representative.
///
/// Each call is a single request. Failures are not retried.
#[async_trait]
pub trait AlertGenerator: Send + Sync + std::fmt::Debug {
    async fn generate(
        &self,
        input: &MotivationalAlertInput,
    ) -> Result<MotivationalAlertOutput, Error>;
}
