use std::future::Future;
use std::pin::Pin;

use crate::llm::{GenerationError, LlmClient};
use crate::model::{CopyVariant, GenerationInput};

pub type GatewayFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<CopyVariant>, GenerationError>> + Send + 'a>>;

/// One attempt at turning an input into copy variants.
pub trait GenerationGateway: Send + Sync {
    fn model_name(&self) -> &str;

    fn call<'a>(&'a self, input: &'a GenerationInput) -> GatewayFuture<'a>;
}

impl GenerationGateway for LlmClient {
    fn model_name(&self) -> &str {
        self.model_name()
    }

    fn call<'a>(&'a self, input: &'a GenerationInput) -> GatewayFuture<'a> {
        Box::pin(self.call(input))
    }
}
