//! Named, typed operations over a model provider.
//!
//! A flow is one request/response call with a declared input and output
//! type. It holds no state between runs, so a single instance can be shared
//! across tasks (behind an `Arc`) and driven concurrently.

use async_trait::async_trait;

use crate::error::ForgeError;

/// A reusable generation operation.
#[async_trait]
pub trait Flow: Send + Sync {
    type Input: Send + 'static;
    type Output: Send + 'static;

    /// Stable name used in logs.
    fn name(&self) -> &str;

    /// Run the operation once.
    async fn run(&self, input: Self::Input) -> Result<Self::Output, ForgeError>;
}

/// Receives a flow's output after it has been validated.
pub trait FlowObserver<T>: Send + Sync {
    fn on_output(&self, flow: &str, output: &T);
}

impl<T, F> FlowObserver<T> for F
where
    F: Fn(&str, &T) + Send + Sync,
{
    fn on_output(&self, flow: &str, output: &T) {
        self(flow, output)
    }
}
