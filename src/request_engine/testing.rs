use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::time::Instant;

use super::gateway::{GatewayFuture, GenerationGateway};
use crate::llm::GenerationError;
use crate::model::{CopyVariant, GenerationInput};

/// Replays scripted results and records when each attempt started.
pub(crate) struct ScriptedGateway {
    results: Mutex<VecDeque<Result<Vec<CopyVariant>, GenerationError>>>,
    pub(crate) calls: Mutex<Vec<Instant>>,
}

impl ScriptedGateway {
    pub(crate) fn new(results: Vec<Result<Vec<CopyVariant>, GenerationError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl GenerationGateway for ScriptedGateway {
    fn model_name(&self) -> &str {
        "scripted"
    }

    fn call<'a>(&'a self, _input: &'a GenerationInput) -> GatewayFuture<'a> {
        self.calls.lock().unwrap().push(Instant::now());
        let next = self
            .results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GenerationError::EmptyResponse));
        Box::pin(async move { next })
    }
}
