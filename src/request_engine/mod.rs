pub mod gateway;
mod orchestrator;
#[cfg(test)]
pub(crate) mod testing;

use anyhow::Result;
use tracing::warn;

use crate::model::{CopyVariant, GenerationInput};
use crate::session::CopySession;

pub use orchestrator::{RetryPolicy, generate_with_retry};

/// Outcome of a successful generation.
#[derive(Debug)]
pub struct Submission<'s> {
    /// The generated variants, as shown in the current view.
    pub outputs: &'s [CopyVariant],
    /// Set when the variants could not be written to history.
    pub history_error: Option<anyhow::Error>,
}

/// Runs the generation pipeline and records successful results.
pub struct RequestEngine<'a> {
    gateway: &'a dyn gateway::GenerationGateway,
    policy: RetryPolicy,
}

impl<'a> RequestEngine<'a> {
    pub fn new(gateway: &'a dyn gateway::GenerationGateway, policy: RetryPolicy) -> Self {
        Self { gateway, policy }
    }

    /// Generates copy for `input`. On success the variants become the current
    /// view and are prepended to history; a history write failure is carried
    /// in the [`Submission`] rather than discarding the variants. On failure
    /// nothing is stored and the [`crate::llm::GenerationError`] is returned
    /// inside the error.
    pub async fn submit<'s>(
        &self,
        input: GenerationInput,
        session: &'s mut CopySession,
    ) -> Result<Submission<'s>> {
        let outputs = generate_with_retry(self.gateway, &input, self.policy).await?;
        let history_error = session.record_generation(input, outputs).err();
        if let Some(err) = &history_error {
            warn!("generated copy was not saved to history: {err:#}");
        }
        Ok(Submission {
            outputs: session.current(),
            history_error,
        })
    }
}
